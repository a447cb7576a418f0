use chrono::Utc;
use rusqlite::{named_params, Connection};
use tracing::info;

use crate::error::AppResult;

const USER_VERSION: i32 = 2;

pub fn run(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS migration_history (
            version INTEGER PRIMARY KEY,
            description TEXT NOT NULL,
            applied_at TEXT NOT NULL
        );
        "#,
    )?;

    let current: i32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;
    if current >= USER_VERSION {
        return Ok(());
    }

    if current < 1 {
        // Base tables come from schema.sql; version 1 only records that
        // the schema is in place.
        record_migration(conn, 1, "initial schema: users, records, challenge_feedback")?;
    }

    if current < 2 {
        conn.execute_batch(
            r#"
            CREATE INDEX IF NOT EXISTS idx_challenge_feedback_title
                ON challenge_feedback (challenge_title);
            CREATE INDEX IF NOT EXISTS idx_records_user_date
                ON records (user_id, date);
            "#,
        )?;
        record_migration(conn, 2, "indexes for feedback aggregation and history listing")?;
    }

    conn.pragma_update(None, "user_version", &USER_VERSION)?;
    info!(target: "app::db", from = current, to = USER_VERSION, "applied migrations");

    Ok(())
}

fn record_migration(conn: &Connection, version: i32, description: &str) -> AppResult<()> {
    conn.execute(
        r#"
            INSERT OR IGNORE INTO migration_history (version, description, applied_at)
            VALUES (:version, :description, :applied_at)
        "#,
        named_params! {
            ":version": version,
            ":description": description,
            ":applied_at": Utc::now().to_rfc3339(),
        },
    )?;
    Ok(())
}
