use serde::{Deserialize, Serialize};

/// Allowed challenge ratings: thumbs down, neutral, thumbs up.
pub const RATING_DOWN: i64 = -1;
pub const RATING_UP: i64 = 1;

pub fn is_valid_rating(rating: i64) -> bool {
    (RATING_DOWN..=RATING_UP).contains(&rating)
}

/// One rating event for a challenge the user was recommended.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackEventInsert {
    pub user_id: i64,
    pub record_id: i64,
    pub challenge_title: String,
    pub rating: i64,
    pub timestamp: String,
}
