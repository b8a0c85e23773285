//! One-shot timers that re-arm themselves. Every firing time is computed from the current time,
//! so a timer never drifts even if the machine was asleep.

pub mod timer;

use chrono::{DateTime, TimeZone};

use crate::utils::time::{next_auto_export, next_day_start};

use super::event::TimerKind;

impl TimerKind {
    /// The next moment this timer should fire, strictly after `now`.
    pub fn next_after<Tz: TimeZone>(&self, now: DateTime<Tz>) -> DateTime<Tz> {
        match self {
            TimerKind::Rollover => next_day_start(now),
            TimerKind::AutoExport => next_auto_export(now),
        }
    }
}
