//! Core types for the focusboard tracker.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Task priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Normal,
    Critical,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Normal => "normal",
            Priority::Critical => "critical",
        }
    }

    /// Parse a priority string. Returns `None` for unrecognized values.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(Priority::Low),
            "normal" => Some(Priority::Normal),
            "critical" => Some(Priority::Critical),
            _ => None,
        }
    }
}

/// Task cadence: daily tasks and weekly tasks keep separate manual orderings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    #[default]
    Daily,
    Weekly,
}

impl TaskKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskKind::Daily => "daily",
            TaskKind::Weekly => "weekly",
        }
    }

    /// Parse a kind string. Returns `None` for unrecognized values.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "daily" => Some(TaskKind::Daily),
            "weekly" => Some(TaskKind::Weekly),
            _ => None,
        }
    }
}

/// A user account. Credentials and sessions are owned by the (excluded)
/// auth layer; the core only needs the identity row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub created_at: i64,
}

/// A task on a user's board.
///
/// `position` orders the incomplete tasks of one (user, kind) pair; it is
/// meaningless for completed tasks. `completed = true` implies `completed_at`
/// is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub kind: TaskKind,
    pub completed: bool,
    pub completed_at: Option<i64>,
    pub position: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// An immutable completion record. Copies the task fields at completion time
/// rather than referencing the task row, so it survives task deletion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: i64,
    pub user_id: i64,
    pub task_title: String,
    pub task_description: Option<String>,
    pub priority: Priority,
    pub kind: TaskKind,
    pub completed_at: i64,
    pub focus_points_earned: i64,
}

/// Per-user aggregate counters and streak state. Exactly one row per user,
/// mutated only by the completion transaction.
///
/// Invariant after any commit: `best_streak >= current_streak`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserStats {
    pub id: i64,
    pub user_id: i64,
    pub focus_points: i64,
    pub current_streak: i64,
    pub best_streak: i64,
    pub last_activity_date: Option<NaiveDate>,
    pub total_tasks_completed: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Typed partial update for a task. Only title, description, priority, and
/// position are editable; anything else is unrepresentable here, so invalid
/// field names are a compile error rather than a runtime filter.
#[derive(Debug, Clone, Default)]
pub struct TaskUpdate {
    pub title: Option<String>,
    /// `Some(None)` clears the description.
    pub description: Option<Option<String>>,
    pub priority: Option<Priority>,
    pub position: Option<i64>,
}

impl TaskUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(Some(description.into()));
        self
    }

    pub fn clear_description(mut self) -> Self {
        self.description = Some(None);
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn position(mut self, position: i64) -> Self {
        self.position = Some(position);
        self
    }

    /// True when no field is set; such an update is rejected before it
    /// reaches the store.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.priority.is_none()
            && self.position.is_none()
    }
}

/// Filters for listing a user's tasks.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaskFilter {
    pub kind: Option<TaskKind>,
    pub completed: Option<bool>,
}
