use std::collections::HashMap;

use rusqlite::{named_params, Connection, OptionalExtension, Row};

use crate::error::{AppError, AppResult};
use crate::models::challenge::RecommendedChallenge;
use crate::models::mood::EmotionStatus;
use crate::models::record::{JournalRecord, JournalRecordInsert};

#[derive(Debug, Clone)]
pub struct RecordRow {
    pub id: i64,
    pub user_id: i64,
    pub date: String,
    pub score: f64,
    pub status: String,
    pub text: Option<String>,
    pub recommended_challenges_json: Option<String>,
    pub feedback_given_json: Option<String>,
}

impl RecordRow {
    pub fn into_record(self) -> AppResult<JournalRecord> {
        let status = EmotionStatus::try_from(self.status.as_str()).map_err(AppError::validation)?;

        let recommended_challenges: Vec<RecommendedChallenge> = match self
            .recommended_challenges_json
            .as_deref()
        {
            Some(json) if !json.is_empty() => serde_json::from_str(json)?,
            _ => Vec::new(),
        };

        let feedback_given: HashMap<String, i64> = match self.feedback_given_json.as_deref() {
            Some(json) if !json.is_empty() => serde_json::from_str(json)?,
            _ => HashMap::new(),
        };

        Ok(JournalRecord {
            id: self.id,
            user_id: self.user_id,
            date: self.date,
            score: self.score,
            status,
            text: self.text,
            recommended_challenges,
            feedback_given,
        })
    }
}

impl TryFrom<&Row<'_>> for RecordRow {
    type Error = rusqlite::Error;

    fn try_from(row: &Row<'_>) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.get("id")?,
            user_id: row.get("user_id")?,
            date: row.get("date")?,
            score: row.get("score")?,
            status: row.get("status")?,
            text: row.get("text")?,
            recommended_challenges_json: row.get("recommended_challenges_json")?,
            feedback_given_json: row.get("feedback_given_json")?,
        })
    }
}

pub struct RecordRepository;

impl RecordRepository {
    pub fn insert(conn: &Connection, insert: &JournalRecordInsert) -> AppResult<i64> {
        conn.execute(
            r#"
                INSERT INTO records (
                    user_id,
                    date,
                    score,
                    status,
                    text,
                    recommended_challenges_json,
                    feedback_given_json
                ) VALUES (
                    :user_id,
                    :date,
                    :score,
                    :status,
                    :text,
                    :recommended_challenges_json,
                    :feedback_given_json
                )
            "#,
            named_params! {
                ":user_id": insert.user_id,
                ":date": &insert.date,
                ":score": insert.score,
                ":status": insert.status.as_str(),
                ":text": &insert.text,
                ":recommended_challenges_json": &insert.recommended_challenges_json,
                ":feedback_given_json": &insert.feedback_given_json,
            },
        )?;

        Ok(conn.last_insert_rowid())
    }

    /// A user's full history, date ascending.
    pub fn list_by_user(conn: &Connection, user_id: i64) -> AppResult<Vec<JournalRecord>> {
        let mut stmt = conn.prepare(
            r#"
                SELECT
                    id,
                    user_id,
                    date,
                    score,
                    status,
                    text,
                    recommended_challenges_json,
                    feedback_given_json
                FROM records
                WHERE user_id = :user_id
                ORDER BY date ASC, id ASC
            "#,
        )?;

        let records = stmt
            .query_map(named_params! {":user_id": user_id}, |row| {
                RecordRow::try_from(row)
            })?
            .map(|row| {
                row.map_err(AppError::from)
                    .and_then(|row| row.into_record())
            })
            .collect::<AppResult<Vec<_>>>()?;

        Ok(records)
    }

    pub fn find_for_user(
        conn: &Connection,
        record_id: i64,
        user_id: i64,
    ) -> AppResult<JournalRecord> {
        let mut stmt = conn.prepare(
            r#"
                SELECT
                    id,
                    user_id,
                    date,
                    score,
                    status,
                    text,
                    recommended_challenges_json,
                    feedback_given_json
                FROM records
                WHERE id = :id AND user_id = :user_id
            "#,
        )?;

        let row = stmt
            .query_row(named_params! {":id": record_id, ":user_id": user_id}, |row| {
                RecordRow::try_from(row)
            })
            .optional()?;

        match row {
            Some(row) => row.into_record(),
            None => Err(AppError::not_found()),
        }
    }

    pub fn update_feedback_json(
        conn: &Connection,
        record_id: i64,
        feedback_given_json: &str,
    ) -> AppResult<()> {
        let affected = conn.execute(
            r#"
                UPDATE records SET
                    feedback_given_json = :feedback_given_json
                WHERE id = :id
            "#,
            named_params! {
                ":id": record_id,
                ":feedback_given_json": feedback_given_json,
            },
        )?;

        if affected == 0 {
            return Err(AppError::not_found());
        }

        Ok(())
    }
}
