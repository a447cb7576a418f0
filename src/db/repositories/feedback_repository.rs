use std::collections::HashMap;

use rusqlite::{named_params, Connection};

use crate::error::{AppError, AppResult};
use crate::models::feedback::FeedbackEventInsert;

pub struct FeedbackRepository;

impl FeedbackRepository {
    pub fn insert(conn: &Connection, insert: &FeedbackEventInsert) -> AppResult<i64> {
        conn.execute(
            r#"
                INSERT INTO challenge_feedback (
                    user_id,
                    record_id,
                    challenge_title,
                    rating,
                    timestamp
                ) VALUES (
                    :user_id,
                    :record_id,
                    :challenge_title,
                    :rating,
                    :timestamp
                )
            "#,
            named_params! {
                ":user_id": insert.user_id,
                ":record_id": insert.record_id,
                ":challenge_title": &insert.challenge_title,
                ":rating": insert.rating,
                ":timestamp": &insert.timestamp,
            },
        )?;

        Ok(conn.last_insert_rowid())
    }

    /// Net feedback score per challenge title across all users: sum of
    /// +1/-1 ratings, zeros contributing nothing. Recomputed on demand;
    /// the recommender wants committed feedback, not a cache.
    pub fn aggregate_scores(conn: &Connection) -> AppResult<HashMap<String, i64>> {
        let mut stmt = conn.prepare(
            r#"
                SELECT
                    challenge_title,
                    SUM(CASE rating WHEN 1 THEN 1 WHEN -1 THEN -1 ELSE 0 END) AS net_score
                FROM challenge_feedback
                GROUP BY challenge_title
            "#,
        )?;

        let scores = stmt
            .query_map([], |row| {
                Ok((row.get::<_, String>("challenge_title")?, row.get::<_, i64>("net_score")?))
            })?
            .collect::<Result<HashMap<_, _>, _>>()
            .map_err(AppError::from)?;

        Ok(scores)
    }
}
