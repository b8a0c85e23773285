use std::{io::Write, path::PathBuf};

use anyhow::{anyhow, Result};
use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::debug;

use crate::{
    schedule::{
        resolver::{ProgramState, Resolution},
        PROGRAM_DAYS,
    },
    storage::kv::KeyValueStore,
    tracker::{DayCursor, Tracker},
    utils::{
        clock::{schedule_once, Clock},
        time::next_day_start,
    },
};

use super::render::{render_day, render_inactive, SAVED_MESSAGE};

const HELP: &str = "n/next, p/prev: change day\n\
                    t/toggle <task>: tick or untick a task\n\
                    e/export: export the displayed day\n\
                    r/refresh: go to today\n\
                    q/quit";

#[derive(Debug, PartialEq, Eq)]
pub enum Reply {
    Output(String),
    /// Input didn't change anything, e.g. moving past the last day.
    Ignored,
    Quit,
}

/// Navigation over the program days with the same commands a button panel would have.
pub struct InteractiveSession<'a, S> {
    tracker: &'a Tracker<S>,
    cursor: DayCursor,
    export_dir: PathBuf,
}

impl<'a, S: KeyValueStore> InteractiveSession<'a, S> {
    pub fn new(tracker: &'a Tracker<S>, export_dir: PathBuf) -> Self {
        Self {
            tracker,
            cursor: DayCursor::new(1),
            export_dir,
        }
    }

    pub fn current_day(&self) -> i64 {
        self.cursor.current()
    }

    pub fn resolve(&self, now: DateTime<Utc>) -> Resolution {
        self.tracker.resolve(now)
    }

    /// Moves to the day `now` falls into and renders it. Outside of the program the cursor is
    /// kept within the program days so navigation keeps working.
    pub async fn refresh(&mut self, now: DateTime<Utc>) -> Result<String> {
        let resolution = self.tracker.resolve(now);
        self.cursor.jump(resolution.day_index.clamp(1, PROGRAM_DAYS));
        match render_inactive(&resolution) {
            Some(inactive) => Ok(inactive),
            None => self.render().await,
        }
    }

    pub async fn handle(&mut self, input: &str, now: DateTime<Utc>) -> Result<Reply> {
        let mut parts = input.split_whitespace();
        let Some(command) = parts.next() else {
            return Ok(Reply::Ignored);
        };
        debug!("Interactive command {input:?}");

        match command {
            "n" | "next" => {
                let moved = self.cursor.next();
                self.moved(moved).await
            }
            "p" | "prev" => {
                let moved = self.cursor.prev();
                self.moved(moved).await
            }
            "t" | "toggle" => {
                let task = parts
                    .next()
                    .ok_or_else(|| anyhow!("Specify which task to toggle"))?
                    .parse::<usize>()?;
                self.tracker.toggle_task(self.cursor.current(), task).await?;
                Ok(Reply::Output(format!("{}\n{SAVED_MESSAGE}\n", self.render().await?)))
            }
            "e" | "export" => {
                let path = self
                    .tracker
                    .export(self.cursor.current(), &self.export_dir)
                    .await?;
                Ok(Reply::Output(format!("Exported into {}\n", path.display())))
            }
            "r" | "refresh" => Ok(Reply::Output(self.refresh(now).await?)),
            "h" | "help" => Ok(Reply::Output(format!("{HELP}\n"))),
            "q" | "quit" => Ok(Reply::Quit),
            other => Err(anyhow!("Unknown command {other:?}, type h for help")),
        }
    }

    async fn moved(&self, moved: bool) -> Result<Reply> {
        if moved {
            Ok(Reply::Output(self.render().await?))
        } else {
            Ok(Reply::Ignored)
        }
    }

    async fn render(&self) -> Result<String> {
        Ok(render_day(&self.tracker.day_view(self.cursor.current()).await?))
    }
}

/// Reads commands from stdin until it closes or the user quits.
pub async fn run_interactive<S: KeyValueStore>(
    tracker: &Tracker<S>,
    export_dir: PathBuf,
    clock: &dyn Clock,
) -> Result<()> {
    let session = InteractiveSession::new(tracker, export_dir);
    let input = BufReader::new(tokio::io::stdin());
    drive_session(session, input, &mut std::io::stdout(), clock, &Local).await
}

/// Serves commands from `input` while keeping the output current. The view jumps to the new day
/// at every midnight of `timezone`, and before the start the countdown is redrawn every second.
async fn drive_session<S, R, W, Tz>(
    mut session: InteractiveSession<'_, S>,
    input: R,
    out: &mut W,
    clock: &dyn Clock,
    timezone: &Tz,
) -> Result<()>
where
    S: KeyValueStore,
    R: AsyncBufRead + Unpin,
    W: Write,
    Tz: TimeZone,
{
    write!(out, "{}", session.refresh(clock.time()).await?)?;
    writeln!(out, "Type h for help")?;
    out.flush()?;

    let mut lines = input.lines();
    loop {
        let now = clock.time();
        let counting_down = matches!(session.resolve(now).state, ProgramState::NotStarted(_));
        let wake = if counting_down {
            now + Duration::seconds(1)
        } else {
            next_day_start(now.with_timezone(timezone)).with_timezone(&Utc)
        };

        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                match session.handle(&line, clock.time()).await {
                    Ok(Reply::Output(output)) => write!(out, "{output}")?,
                    Ok(Reply::Ignored) => {}
                    Ok(Reply::Quit) => break,
                    Err(e) => writeln!(out, "{e}")?,
                }
            }
            _ = schedule_once(clock, wake) => {
                let now = clock.time();
                let resolution = session.resolve(now);
                if matches!(resolution.state, ProgramState::NotStarted(_)) {
                    write!(out, "\r{resolution}")?;
                } else {
                    if counting_down {
                        writeln!(out)?;
                    }
                    debug!("Moving interactive view to {resolution}");
                    write!(out, "{}", session.refresh(now).await?)?;
                }
            }
        }
        out.flush()?;
    }
    Ok(())
}
