//! [Tracker] ties the schedule, the program start and the stored progress together. It is
//! created once on startup and passed to whatever needs it, time is always given explicitly.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};

use crate::{
    export::export_snapshot,
    schedule::{
        resolver::{resolve_day, Resolution},
        ScheduleTable, PROGRAM_DAYS,
    },
    storage::{
        kv::KeyValueStore,
        progress::{ProgressSnapshot, ProgressStore},
    },
};

/// Everything needed to display a single day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayView {
    pub day: i64,
    pub has_schedule: bool,
    pub tasks: Vec<(&'static str, bool)>,
}

pub struct Tracker<S> {
    schedule: ScheduleTable,
    start: DateTime<Utc>,
    progress: ProgressStore<S>,
}

impl<S: KeyValueStore> Tracker<S> {
    pub fn new(schedule: ScheduleTable, start: DateTime<Utc>, store: S) -> Self {
        Self {
            schedule,
            start,
            progress: ProgressStore::new(store),
        }
    }

    pub fn schedule(&self) -> &ScheduleTable {
        &self.schedule
    }

    pub fn resolve(&self, now: DateTime<Utc>) -> Resolution {
        resolve_day(now, self.start)
    }

    pub async fn day_view(&self, day: i64) -> Result<DayView> {
        let mut tasks = Vec::new();
        for (index, task) in self.schedule.get_tasks(day).iter().enumerate() {
            tasks.push((*task, self.progress.get_flag(day, index).await?));
        }
        Ok(DayView {
            day,
            has_schedule: self.schedule.has_schedule(day),
            tasks,
        })
    }

    /// Marks a task of a day. Only tasks that actually exist on that day can be marked.
    pub async fn set_task(&self, day: i64, task: usize, completed: bool) -> Result<()> {
        self.check_task(day, task)?;
        self.progress.set_flag(day, task, completed).await
    }

    /// Flips a task and returns its new state.
    pub async fn toggle_task(&self, day: i64, task: usize) -> Result<bool> {
        self.check_task(day, task)?;
        let completed = !self.progress.get_flag(day, task).await?;
        self.progress.set_flag(day, task, completed).await?;
        Ok(completed)
    }

    pub async fn snapshot(&self, day: i64) -> Result<ProgressSnapshot> {
        self.progress.snapshot(day, &self.schedule).await
    }

    pub async fn export(&self, day: i64, dir: &Path) -> Result<PathBuf> {
        let snapshot = self.snapshot(day).await?;
        export_snapshot(day, &snapshot, dir).await
    }

    fn check_task(&self, day: i64, task: usize) -> Result<()> {
        if !self.schedule.has_schedule(day) {
            return Err(anyhow!("Day {day} has no tasks"));
        }
        let count = self.schedule.get_tasks(day).len();
        if task >= count {
            return Err(anyhow!(
                "Day {day} has only {count} tasks, there is no task {task}"
            ));
        }
        Ok(())
    }
}

/// Keeps track of the displayed day. Moving past either end of the program does nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCursor {
    current: i64,
}

impl DayCursor {
    pub fn new(day: i64) -> Self {
        Self { current: day }
    }

    pub fn current(&self) -> i64 {
        self.current
    }

    pub fn jump(&mut self, day: i64) {
        self.current = day;
    }

    pub fn prev(&mut self) -> bool {
        if self.current > 1 {
            self.current -= 1;
            true
        } else {
            false
        }
    }

    pub fn next(&mut self) -> bool {
        if self.current < PROGRAM_DAYS {
            self.current += 1;
            true
        } else {
            false
        }
    }
}
