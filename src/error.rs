use thiserror::Error;

/// Raised when a day has no task list. Travels inside [anyhow::Error], so callers that want to
/// show a placeholder instead of failing should `downcast_ref` it.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("No tasks found for day {day}")]
pub struct NoScheduleError {
    pub day: i64,
}
