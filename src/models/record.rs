use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::challenge::RecommendedChallenge;
use crate::models::mood::{EmotionStatus, ScoreBreakdown, SentimentLabel};

/// A persisted journal entry. `feedback_given` grows as the user rates
/// the recommended challenges; records are never deleted by the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalRecord {
    pub id: i64,
    pub user_id: i64,
    pub date: String,
    pub score: f64,
    pub status: EmotionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub recommended_challenges: Vec<RecommendedChallenge>,
    pub feedback_given: HashMap<String, i64>,
}

#[derive(Debug, Clone)]
pub struct JournalRecordInsert {
    pub user_id: i64,
    pub date: String,
    pub score: f64,
    pub status: EmotionStatus,
    pub text: Option<String>,
    pub recommended_challenges_json: String,
    pub feedback_given_json: String,
}

/// Result of the evaluate-day operation. Field names are the wire keys
/// consumed by the frontend, hence snake_case throughout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayEvaluation {
    pub record_id: i64,
    pub score: f64,
    pub text_emotion: SentimentLabel,
    pub emotion_status: EmotionStatus,
    pub challenges: Vec<RecommendedChallenge>,
    pub breakdown: ScoreBreakdown,
}
