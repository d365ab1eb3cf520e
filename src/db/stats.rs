//! Per-user aggregate counters and streak state.

use super::Database;
use crate::types::UserStats;
use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::{params, Connection, Row};

fn parse_stats_row(row: &Row) -> rusqlite::Result<UserStats> {
    let last_activity: Option<String> = row.get("last_activity_date")?;

    Ok(UserStats {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        focus_points: row.get("focus_points")?,
        current_streak: row.get("current_streak")?,
        best_streak: row.get("best_streak")?,
        last_activity_date: last_activity
            .and_then(|s| NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok()),
        total_tasks_completed: row.get("total_tasks_completed")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

/// Aggregate row lookup using an existing connection (shared with the
/// completion transaction).
pub(crate) fn get_stats_internal(conn: &Connection, user_id: i64) -> Result<Option<UserStats>> {
    let mut stmt = conn.prepare("SELECT * FROM user_stats WHERE user_id = ?1")?;

    match stmt.query_row(params![user_id], parse_stats_row) {
        Ok(stats) => Ok(Some(stats)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

impl Database {
    /// A user's aggregate row, if the account exists.
    pub fn get_stats(&self, user_id: i64) -> Result<Option<UserStats>> {
        self.with_conn(|conn| get_stats_internal(conn, user_id))
    }
}
