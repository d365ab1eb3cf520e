//! Consecutive-day streak bookkeeping.

/// New streak state after a completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreakUpdate {
    pub current: i64,
    pub best: i64,
}

/// Decide the next streak state for a completion happening today.
///
/// `completed_yesterday` is whether the user has at least one history entry
/// dated the previous calendar day. A completion with activity yesterday
/// extends the run; otherwise the run restarts at 1. The best-streak
/// high-water mark never decreases.
///
/// This runs once per completed task, not once per day, so a second
/// completion on the same day advances the run again. Existing accounts
/// depend on that accounting; see DESIGN.md before changing it.
pub fn advance(current: i64, best: i64, completed_yesterday: bool) -> StreakUpdate {
    let next = if completed_yesterday { current + 1 } else { 1 };
    StreakUpdate {
        current: next,
        best: best.max(next),
    }
}
