use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::{Local, TimeZone};
use processing::{day_actions::DayActions, ProcessingModule};
use timers::timer::TimerModule;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::{
    config::{ProgramConfig, EXPORT_DIR, PROGRESS_FILE},
    schedule::ScheduleTable,
    storage::kv::{FileKeyValueStore, KeyValueStore},
    tracker::Tracker,
    utils::clock::{Clock, DefaultClock},
};

pub mod args;
pub mod event;
pub mod processing;
pub mod shutdown;
pub mod timers;

#[cfg(test)]
pub(crate) mod test_clock;

use event::{ScheduleEvent, TimerKind};

/// Represents the starting point for the daemon
pub async fn start_daemon(dir: PathBuf) -> Result<()> {
    let dir = std::path::absolute(dir)?;
    let config = ProgramConfig::require(&dir).await?;
    std::env::set_current_dir("/")?;
    info!("Starting daemon in {dir:?}, program started at {}", config.start);

    let tracker = create_tracker(&dir, &config)?;
    let shutdown_token = CancellationToken::new();

    run_daemon(
        tracker,
        dir.join(EXPORT_DIR),
        &shutdown_token,
        DefaultClock,
        Local,
        shutdown::detect_shutdown(shutdown_token.clone()),
    )
    .await;

    Ok(())
}

pub fn create_tracker(dir: &Path, config: &ProgramConfig) -> Result<Tracker<FileKeyValueStore>> {
    let store = FileKeyValueStore::new(dir.join(PROGRESS_FILE))?;
    Ok(Tracker::new(ScheduleTable::new(), config.start, store))
}

/// Runs both timers and the processor until `shutdown_token` is cancelled. `until` is driven
/// alongside them and is expected to cancel the token at some point.
async fn run_daemon<S: KeyValueStore, Tz: TimeZone>(
    tracker: Tracker<S>,
    export_dir: PathBuf,
    shutdown_token: &CancellationToken,
    clock: impl Clock + Clone,
    timezone: Tz,
    until: impl std::future::Future<Output = ()>,
) {
    let (sender, receiver) = mpsc::channel::<ScheduleEvent>(10);

    let rollover = create_timer(
        TimerKind::Rollover,
        sender.clone(),
        shutdown_token,
        clock.clone(),
        timezone.clone(),
    );
    let auto_export = create_timer(
        TimerKind::AutoExport,
        sender,
        shutdown_token,
        clock.clone(),
        timezone,
    );
    let processor = create_processor(tracker, export_dir, receiver, clock);

    let (_, rollover_result, export_result, processing_result) = tokio::join!(
        until,
        rollover.run(),
        auto_export.run(),
        processor.run(),
    );

    for (name, result) in [
        ("Rollover timer", rollover_result),
        ("Auto export timer", export_result),
        ("Processing module", processing_result),
    ] {
        if let Err(e) = result {
            error!("{name} got an error {e:?}");
        }
    }
}

fn create_timer<Tz: TimeZone>(
    kind: TimerKind,
    sender: mpsc::Sender<ScheduleEvent>,
    shutdown_token: &CancellationToken,
    clock: impl Clock,
    timezone: Tz,
) -> TimerModule<Tz> {
    TimerModule::new(
        sender,
        kind,
        shutdown_token.clone(),
        Box::new(clock),
        timezone,
    )
}

fn create_processor<S: KeyValueStore>(
    tracker: Tracker<S>,
    export_dir: PathBuf,
    receiver: mpsc::Receiver<ScheduleEvent>,
    clock: impl Clock,
) -> ProcessingModule<DayActions<S>> {
    ProcessingModule::new(receiver, DayActions::new(tracker, export_dir, Box::new(clock)))
}
