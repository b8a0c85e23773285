use anyhow::Result;

use crate::daemon::event::ScheduleEvent;

/// Reacts to timer events.
pub trait EventProcessor {
    /// Called once before the first event.
    fn initialize(&mut self) -> impl std::future::Future<Output = Result<()>>;

    fn process_next(&mut self, event: ScheduleEvent) -> impl std::future::Future<Output = Result<()>>;
}
