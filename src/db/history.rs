//! Append-only ledger of completed tasks.

use super::Database;
use crate::types::{HistoryEntry, Priority, Task, TaskKind};
use anyhow::Result;
use rusqlite::{params, Connection, Row};

/// Points awarded per completed task.
pub const FOCUS_POINTS_PER_TASK: i64 = 1;

/// Default number of entries returned by `list_history`.
pub const DEFAULT_HISTORY_LIMIT: i64 = 50;

fn parse_history_row(row: &Row) -> rusqlite::Result<HistoryEntry> {
    let priority: String = row.get("priority")?;
    let kind: String = row.get("kind")?;

    Ok(HistoryEntry {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        task_title: row.get("task_title")?,
        task_description: row.get("task_description")?,
        priority: Priority::parse(&priority).unwrap_or_default(),
        kind: TaskKind::parse(&kind).unwrap_or_default(),
        completed_at: row.get("completed_at")?,
        focus_points_earned: row.get("focus_points_earned")?,
    })
}

/// Snapshot a completed task into the ledger. Only the completion
/// transaction writes here; entries are never updated afterwards.
pub(crate) fn append_history(conn: &Connection, task: &Task, completed_at_ms: i64) -> Result<()> {
    conn.execute(
        "INSERT INTO task_history (user_id, task_title, task_description, priority, kind, completed_at, focus_points_earned)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            task.user_id,
            task.title,
            task.description,
            task.priority.as_str(),
            task.kind.as_str(),
            completed_at_ms,
            FOCUS_POINTS_PER_TASK,
        ],
    )?;
    Ok(())
}

/// Count a user's completions with `completed_at` in `[start_ms, end_ms)`.
pub(crate) fn count_completions_between(
    conn: &Connection,
    user_id: i64,
    start_ms: i64,
    end_ms: i64,
) -> Result<i64> {
    let count = conn.query_row(
        "SELECT COUNT(*) FROM task_history
         WHERE user_id = ?1 AND completed_at >= ?2 AND completed_at < ?3",
        params![user_id, start_ms, end_ms],
        |row| row.get(0),
    )?;
    Ok(count)
}

impl Database {
    /// A user's completion history, most recent first. Default limit is 50.
    pub fn list_history(&self, user_id: i64, limit: Option<i64>) -> Result<Vec<HistoryEntry>> {
        let limit = limit.unwrap_or(DEFAULT_HISTORY_LIMIT);

        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT * FROM task_history WHERE user_id = ?1
                 ORDER BY completed_at DESC, id DESC LIMIT ?2",
            )?;

            let entries = stmt
                .query_map(params![user_id, limit], parse_history_row)?
                .filter_map(|r| r.ok())
                .collect();

            Ok(entries)
        })
    }
}
