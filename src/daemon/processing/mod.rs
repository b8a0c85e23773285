use anyhow::Result;
use module::EventProcessor;
use tokio::sync::mpsc::Receiver;
use tracing::{debug, error, info};

use super::event::ScheduleEvent;

pub mod day_actions;
pub mod module;

/// Receives timer events and hands them to a processor. A failed event is logged and skipped, it
/// never stops the daemon.
pub struct ProcessingModule<Processor> {
    receiver: Receiver<ScheduleEvent>,
    processor: Processor,
}

impl<P: EventProcessor> ProcessingModule<P> {
    pub fn new(receiver: Receiver<ScheduleEvent>, processor: P) -> Self {
        Self {
            receiver,
            processor,
        }
    }

    pub async fn run(mut self) -> Result<()> {
        if let Err(e) = self.processor.initialize().await {
            error!("Error initializing processor: {e:?}")
        }

        while let Some(event) = self.receiver.recv().await {
            debug!("Processing event {:?}", event);
            match self.processor.process_next(event).await {
                Ok(_) => {
                    info!("Processed event {:?}", event)
                }
                Err(e) => {
                    error!("Error processing event {:?}: {e:?}", event)
                }
            }
        }

        self.receiver.close();
        Ok(())
    }
}
