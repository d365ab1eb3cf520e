//! The completion transaction: task flag, history snapshot, counters, streak.

use super::history::{append_history, count_completions_between, FOCUS_POINTS_PER_TASK};
use super::stats::get_stats_internal;
use super::tasks::get_task_internal;
use super::{day_bounds_ms, Database};
use crate::error::ServiceError;
use crate::streak;
use crate::types::Task;
use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use rusqlite::params;
use tracing::info;

impl Database {
    /// Complete a task and settle the user's points and streak, atomically.
    ///
    /// The already-completed check is part of the conditional update itself,
    /// so two concurrent attempts on the same task have exactly one winner;
    /// the loser gets `TaskNotFound` and no partial writes. The same outcome
    /// covers missing ids and ids owned by another user.
    pub fn complete_task(&self, task_id: i64, user_id: i64) -> Result<Task> {
        self.complete_task_at(task_id, user_id, Utc::now())
    }

    /// Completion with an explicit clock, for tests and backfills.
    pub fn complete_task_at(
        &self,
        task_id: i64,
        user_id: i64,
        now: DateTime<Utc>,
    ) -> Result<Task> {
        let now_ms = now.timestamp_millis();
        let today = now.date_naive();
        let yesterday = today - Duration::days(1);

        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;

            // Step 1: conditional flip. Zero rows means missing, foreign, or
            // already completed; all three abort the transaction identically.
            let updated = tx.execute(
                "UPDATE tasks SET completed = 1, completed_at = ?1, updated_at = ?1
                 WHERE id = ?2 AND user_id = ?3 AND completed = 0",
                params![now_ms, task_id, user_id],
            )?;
            if updated == 0 {
                return Err(ServiceError::task_not_found(task_id).into());
            }

            let task = get_task_internal(&tx, task_id, user_id)?
                .ok_or_else(|| ServiceError::task_not_found(task_id))?;

            // Step 2: immutable snapshot into the ledger.
            append_history(&tx, &task, now_ms)?;

            // Step 3: counters. Accounts are created together with their
            // aggregate row, so a missing row is corrupted state and aborts
            // the whole unit.
            let stats_updated = tx.execute(
                "UPDATE user_stats SET
                    focus_points = focus_points + ?1,
                    total_tasks_completed = total_tasks_completed + 1,
                    last_activity_date = ?2,
                    updated_at = ?3
                 WHERE user_id = ?4",
                params![FOCUS_POINTS_PER_TASK, today.to_string(), now_ms, user_id],
            )?;
            if stats_updated == 0 {
                return Err(ServiceError::stats_not_found(user_id).into());
            }

            // Step 4: streak. The snapshot above guarantees today has at
            // least one entry, so only yesterday decides extend vs reset.
            let (y_start, y_end) = day_bounds_ms(yesterday);
            let yesterday_count = count_completions_between(&tx, user_id, y_start, y_end)?;

            let stats = get_stats_internal(&tx, user_id)?
                .ok_or_else(|| ServiceError::stats_not_found(user_id))?;
            let update =
                streak::advance(stats.current_streak, stats.best_streak, yesterday_count > 0);

            tx.execute(
                "UPDATE user_stats SET current_streak = ?1, best_streak = ?2, updated_at = ?3
                 WHERE user_id = ?4",
                params![update.current, update.best, now_ms, user_id],
            )?;

            tx.commit()?;

            info!(
                task_id,
                user_id,
                current_streak = update.current,
                best_streak = update.best,
                "task completed"
            );
            Ok(task)
        })
    }
}
