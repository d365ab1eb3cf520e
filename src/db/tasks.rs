//! Task CRUD, manual ordering, and the reorder transaction.

use super::{now_ms, Database};
use crate::error::ServiceError;
use crate::types::{Priority, Task, TaskFilter, TaskKind, TaskUpdate};
use anyhow::Result;
use rusqlite::{params, Connection, Row};
use tracing::debug;

pub(crate) fn parse_task_row(row: &Row) -> rusqlite::Result<Task> {
    let priority: String = row.get("priority")?;
    let kind: String = row.get("kind")?;
    let completed: i64 = row.get("completed")?;

    Ok(Task {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        title: row.get("title")?,
        description: row.get("description")?,
        priority: Priority::parse(&priority).unwrap_or_default(),
        kind: TaskKind::parse(&kind).unwrap_or_default(),
        completed: completed != 0,
        completed_at: row.get("completed_at")?,
        position: row.get("position")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

/// Scoped lookup using an existing connection (shared with the completion
/// transaction). A task owned by another user behaves exactly like a missing
/// one.
pub(crate) fn get_task_internal(
    conn: &Connection,
    task_id: i64,
    user_id: i64,
) -> Result<Option<Task>> {
    let mut stmt = conn.prepare("SELECT * FROM tasks WHERE id = ?1 AND user_id = ?2")?;

    match stmt.query_row(params![task_id, user_id], parse_task_row) {
        Ok(task) => Ok(Some(task)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

impl Database {
    /// Create a task at the end of the user's incomplete list for that kind.
    pub fn create_task(
        &self,
        user_id: i64,
        title: &str,
        description: Option<String>,
        priority: Priority,
        kind: TaskKind,
    ) -> Result<Task> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ServiceError::missing_field("title").into());
        }

        let now = now_ms();

        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;

            // max+1 over the user's incomplete tasks of this kind. The
            // connection mutex serializes concurrent creates in-process;
            // cross-process collisions are cosmetic, not corrupting.
            let position: i64 = tx.query_row(
                "SELECT COALESCE(MAX(position), 0) + 1 FROM tasks
                 WHERE user_id = ?1 AND kind = ?2 AND completed = 0",
                params![user_id, kind.as_str()],
                |row| row.get(0),
            )?;

            tx.execute(
                "INSERT INTO tasks (user_id, title, description, priority, kind, completed, position, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, 0, ?6, ?7, ?7)",
                params![
                    user_id,
                    title,
                    &description,
                    priority.as_str(),
                    kind.as_str(),
                    position,
                    now,
                ],
            )?;
            let id = tx.last_insert_rowid();

            tx.commit()?;

            debug!(task_id = id, user_id, position, "task created");
            Ok(Task {
                id,
                user_id,
                title: title.to_string(),
                description,
                priority,
                kind,
                completed: false,
                completed_at: None,
                position,
                created_at: now,
                updated_at: now,
            })
        })
    }

    /// List a user's tasks, position ascending then newest first.
    pub fn list_tasks(&self, user_id: i64, filter: TaskFilter) -> Result<Vec<Task>> {
        self.with_conn(|conn| {
            let mut sql = String::from("SELECT * FROM tasks WHERE user_id = ?");
            let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = vec![Box::new(user_id)];

            if let Some(kind) = filter.kind {
                sql.push_str(" AND kind = ?");
                params_vec.push(Box::new(kind.as_str().to_string()));
            }

            if let Some(completed) = filter.completed {
                sql.push_str(" AND completed = ?");
                params_vec.push(Box::new(completed));
            }

            sql.push_str(" ORDER BY position ASC, created_at DESC");

            let params_refs: Vec<&dyn rusqlite::ToSql> =
                params_vec.iter().map(|b| b.as_ref()).collect();

            let mut stmt = conn.prepare(&sql)?;
            let tasks = stmt
                .query_map(params_refs.as_slice(), parse_task_row)?
                .filter_map(|r| r.ok())
                .collect();

            Ok(tasks)
        })
    }

    /// Get a task by id, scoped to its owner.
    pub fn get_task(&self, task_id: i64, user_id: i64) -> Result<Option<Task>> {
        self.with_conn(|conn| get_task_internal(conn, task_id, user_id))
    }

    /// Apply a typed partial update to a task.
    pub fn update_task(&self, task_id: i64, user_id: i64, update: TaskUpdate) -> Result<Task> {
        if update.is_empty() {
            return Err(ServiceError::empty_update().into());
        }
        if let Some(ref title) = update.title {
            if title.trim().is_empty() {
                return Err(ServiceError::invalid_value("title", "title cannot be empty").into());
            }
        }

        let now = now_ms();

        self.with_conn(|conn| {
            let task = get_task_internal(conn, task_id, user_id)?
                .ok_or_else(|| ServiceError::task_not_found(task_id))?;

            let new_title = update
                .title
                .map(|t| t.trim().to_string())
                .unwrap_or(task.title.clone());
            let new_description = update.description.unwrap_or(task.description.clone());
            let new_priority = update.priority.unwrap_or(task.priority);
            let new_position = update.position.unwrap_or(task.position);

            conn.execute(
                "UPDATE tasks SET title = ?1, description = ?2, priority = ?3, position = ?4, updated_at = ?5
                 WHERE id = ?6 AND user_id = ?7",
                params![
                    new_title,
                    new_description,
                    new_priority.as_str(),
                    new_position,
                    now,
                    task_id,
                    user_id,
                ],
            )?;

            Ok(Task {
                title: new_title,
                description: new_description,
                priority: new_priority,
                position: new_position,
                updated_at: now,
                ..task
            })
        })
    }

    /// Delete a task, returning the deleted row.
    ///
    /// History entries keep their copied snapshot; nothing cascades.
    pub fn delete_task(&self, task_id: i64, user_id: i64) -> Result<Task> {
        self.with_conn(|conn| {
            let task = get_task_internal(conn, task_id, user_id)?
                .ok_or_else(|| ServiceError::task_not_found(task_id))?;

            conn.execute(
                "DELETE FROM tasks WHERE id = ?1 AND user_id = ?2",
                params![task_id, user_id],
            )?;

            debug!(task_id, user_id, "task deleted");
            Ok(task)
        })
    }

    /// Assign dense positions 1..N following the order of `task_ids`, in one
    /// transaction.
    ///
    /// Ids the user does not own are silently skipped, matching the store's
    /// find semantics. The list is not required to be a permutation of the
    /// user's incomplete set: a subset or duplicate list leaves the remaining
    /// positions untouched and possibly non-contiguous. That looseness is
    /// accepted, not corrected, at this layer.
    pub fn reorder_tasks(&self, user_id: i64, task_ids: &[i64]) -> Result<()> {
        let now = now_ms();

        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;

            for (i, task_id) in task_ids.iter().enumerate() {
                tx.execute(
                    "UPDATE tasks SET position = ?1, updated_at = ?2
                     WHERE id = ?3 AND user_id = ?4",
                    params![(i as i64) + 1, now, task_id, user_id],
                )?;
            }

            tx.commit()?;

            debug!(user_id, count = task_ids.len(), "tasks reordered");
            Ok(())
        })
    }
}
