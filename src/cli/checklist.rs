use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};

use crate::{
    error::NoScheduleError,
    schedule::PROGRAM_DAYS,
    storage::kv::KeyValueStore,
    tracker::Tracker,
};

use super::render::{render_day, render_inactive, SAVED_MESSAGE};

/// Picks the day a command works with. Without an explicit day only a running program has one.
fn target_day<S: KeyValueStore>(
    tracker: &Tracker<S>,
    day: Option<i64>,
    now: DateTime<Utc>,
) -> Result<i64, String> {
    if let Some(day) = day {
        return Ok(day);
    }
    let resolution = tracker.resolve(now);
    resolution
        .active_day()
        .ok_or_else(|| render_inactive(&resolution).unwrap_or_default())
}

pub async fn status<S: KeyValueStore>(tracker: &Tracker<S>, now: DateTime<Utc>) -> Result<String> {
    let resolution = tracker.resolve(now);
    let Some(day) = resolution.active_day() else {
        return Ok(render_inactive(&resolution).unwrap_or_default());
    };

    let snapshot = tracker.snapshot(day).await?;
    let phase = tracker
        .schedule()
        .phase_for(day)
        .map_or(0, |phase| phase.number);
    Ok(format!(
        "{resolution} (phase {phase})\n{}/{} tasks done today\n{} days left\n",
        snapshot.completed_count(),
        snapshot.0.len(),
        PROGRAM_DAYS - day
    ))
}

pub async fn show<S: KeyValueStore>(
    tracker: &Tracker<S>,
    day: Option<i64>,
    now: DateTime<Utc>,
) -> Result<String> {
    match target_day(tracker, day, now) {
        Ok(day) => Ok(render_day(&tracker.day_view(day).await?)),
        Err(inactive) => Ok(inactive),
    }
}

pub async fn mark<S: KeyValueStore>(
    tracker: &Tracker<S>,
    day: Option<i64>,
    task: usize,
    completed: bool,
    now: DateTime<Utc>,
) -> Result<String> {
    let day = target_day(tracker, day, now)
        .map_err(|inactive| anyhow!("{inactive}Pass --day to update a specific day"))?;
    tracker.set_task(day, task, completed).await?;
    Ok(format!(
        "{}\n{SAVED_MESSAGE}\n",
        render_day(&tracker.day_view(day).await?)
    ))
}

pub async fn export<S: KeyValueStore>(
    tracker: &Tracker<S>,
    day: Option<i64>,
    out: &Path,
    now: DateTime<Utc>,
) -> Result<PathBuf> {
    let day = target_day(tracker, day, now).map_err(|_| anyhow!("No tasks found for today."))?;
    tracker.export(day, out).await.map_err(|e| {
        if e.downcast_ref::<NoScheduleError>().is_some() {
            anyhow!("No tasks found for today.")
        } else {
            e
        }
    })
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use chrono::Duration;
    use tempfile::tempdir;

    use crate::tracker::tests::{test_start, test_tracker};

    use super::{export, mark, show, status};

    #[tokio::test]
    async fn test_show_today() -> Result<()> {
        let dir = tempdir()?;
        let tracker = test_tracker(&dir)?;

        let output = show(&tracker, None, test_start() + Duration::days(16)).await?;
        assert!(output.contains("Day 17 Checklist"));
        assert!(output.contains("5:45 AM - 6:30 AM: Wake up & meditation"));
        Ok(())
    }

    #[tokio::test]
    async fn test_show_before_start() -> Result<()> {
        let dir = tempdir()?;
        let tracker = test_tracker(&dir)?;

        let output = show(&tracker, None, test_start() - Duration::hours(2)).await?;
        assert!(output.contains("Bootcamp starts in: 0d 2h 0m 0s"));

        let output = show(&tracker, Some(4), test_start() - Duration::hours(2)).await?;
        assert!(output.contains("Day 4 Checklist"));
        Ok(())
    }

    #[tokio::test]
    async fn test_mark_and_status() -> Result<()> {
        let dir = tempdir()?;
        let tracker = test_tracker(&dir)?;
        let now = test_start() + Duration::days(49);

        let output = mark(&tracker, None, 0, true, now).await?;
        assert!(output.contains("[x] 0:"));
        assert!(output.contains("Progress saved"));

        let output = status(&tracker, now).await?;
        assert!(output.contains("Day 50 of 90 (phase 3)"));
        assert!(output.contains("1/5 tasks done today"));
        assert!(output.contains("40 days left"));
        Ok(())
    }

    #[tokio::test]
    async fn test_mark_requires_running_program() -> Result<()> {
        let dir = tempdir()?;
        let tracker = test_tracker(&dir)?;

        let now = test_start() + Duration::days(120);
        assert!(mark(&tracker, None, 0, true, now).await.is_err());
        assert!(mark(&tracker, Some(90), 0, true, now).await.is_ok());
        Ok(())
    }

    #[tokio::test]
    async fn test_export_without_schedule() -> Result<()> {
        let dir = tempdir()?;
        let tracker = test_tracker(&dir)?;

        let error = export(&tracker, Some(0), dir.path(), test_start())
            .await
            .unwrap_err();
        assert_eq!(error.to_string(), "No tasks found for today.");

        let path = export(&tracker, None, dir.path(), test_start()).await?;
        assert_eq!(path, dir.path().join("Day1_progress.json"));
        Ok(())
    }
}
