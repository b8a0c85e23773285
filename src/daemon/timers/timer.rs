use anyhow::Result;
use chrono::{TimeZone, Utc};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::{
    daemon::event::{ScheduleEvent, TimerKind},
    utils::clock::{schedule_once, Clock},
};

pub struct TimerModule<Tz: TimeZone> {
    next: mpsc::Sender<ScheduleEvent>,
    kind: TimerKind,
    shutdown: CancellationToken,
    time_provider: Box<dyn Clock>,
    timezone: Tz,
}

impl<Tz: TimeZone> TimerModule<Tz> {
    pub fn new(
        next: mpsc::Sender<ScheduleEvent>,
        kind: TimerKind,
        shutdown: CancellationToken,
        time_provider: Box<dyn Clock>,
        timezone: Tz,
    ) -> Self {
        Self {
            next,
            kind,
            shutdown,
            time_provider,
            timezone,
        }
    }

    /// Executes the timer loop. Every iteration arms a single one-shot wait and sends an event
    /// once it elapses.
    pub async fn run(self) -> Result<()> {
        loop {
            let now = self.time_provider.time().with_timezone(&self.timezone);
            let fire_at = self.kind.next_after(now).with_timezone(&Utc);
            debug!("Armed {:?} timer for {fire_at}", self.kind);

            tokio::select! {
                // Cancelation means we stop execution of the loop. Which means we also drop
                // the sender channel and consequently stop processing module.
                _ = self.shutdown.cancelled() => {
                    return Ok(())
                }
                _ = schedule_once(self.time_provider.as_ref(), fire_at) => ()
            }

            let event = ScheduleEvent {
                kind: self.kind,
                fired_at: self.time_provider.time(),
            };
            self.next
                .send(event)
                .await
                .inspect_err(|e| error!("Unexpected error during sending {e:?}"))?;
            info!("{:?} timer fired", self.kind);
        }
    }
}
