use std::path::PathBuf;

use anyhow::Result;
use tracing::info;

use crate::{
    daemon::event::{ScheduleEvent, TimerKind},
    schedule::resolver::Resolution,
    storage::kv::KeyValueStore,
    tracker::Tracker,
    utils::clock::Clock,
};

use super::module::EventProcessor;

/// Keeps the current day up to date and exports its progress when asked to.
pub struct DayActions<S> {
    tracker: Tracker<S>,
    export_dir: PathBuf,
    current: Option<Resolution>,
    date_provider: Box<dyn Clock>,
}

impl<S: KeyValueStore> DayActions<S> {
    pub fn new(tracker: Tracker<S>, export_dir: PathBuf, date_provider: Box<dyn Clock>) -> Self {
        Self {
            tracker,
            export_dir,
            current: None,
            date_provider,
        }
    }

    pub fn current(&self) -> Option<Resolution> {
        self.current
    }

    fn refresh(&mut self, resolution: Resolution) {
        let changed = self
            .current
            .map_or(true, |current| current.day_index != resolution.day_index);
        if changed {
            let tasks = self.tracker.schedule().get_tasks(resolution.day_index).len();
            match resolution.active_day() {
                Some(_) => info!("Now on {resolution} with {tasks} tasks"),
                None => info!("{resolution}"),
            }
        }
        self.current = Some(resolution);
    }

    async fn auto_export(&mut self, resolution: Resolution) -> Result<()> {
        let Some(day) = resolution.active_day() else {
            info!("Skipping auto export: {resolution}");
            return Ok(());
        };
        let path = self.tracker.export(day, &self.export_dir).await?;
        info!("Day progress auto-exported! {path:?}");
        Ok(())
    }
}

impl<S: KeyValueStore> EventProcessor for DayActions<S> {
    async fn initialize(&mut self) -> Result<()> {
        let resolution = self.tracker.resolve(self.date_provider.time());
        self.refresh(resolution);
        Ok(())
    }

    async fn process_next(&mut self, event: ScheduleEvent) -> Result<()> {
        let resolution = self.tracker.resolve(event.fired_at);
        self.refresh(resolution);
        match event.kind {
            TimerKind::Rollover => Ok(()),
            TimerKind::AutoExport => self.auto_export(resolution).await,
        }
    }
}
