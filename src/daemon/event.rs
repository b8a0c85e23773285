use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Fires at local midnight so the current day gets resolved again.
    Rollover,
    /// Fires at 23:59 local time to export progress of the day.
    AutoExport,
}

/// Sent by a timer every time it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleEvent {
    pub kind: TimerKind,
    pub fired_at: DateTime<Utc>,
}
