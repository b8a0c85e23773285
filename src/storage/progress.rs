use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{error::NoScheduleError, schedule::ScheduleTable};

use super::kv::KeyValueStore;

const CHECKED: &str = "true";
const UNCHECKED: &str = "false";

/// Key under which completion of a single task is stored. Existing saved progress depends on this
/// exact shape.
pub fn flag_key(day: i64, task: usize) -> String {
    format!("day{day}-task{task}")
}

#[derive(PartialEq, Eq, Debug, Serialize, Deserialize, Clone)]
pub struct TaskProgress {
    pub task: String,
    pub completed: bool,
}

/// Tasks of a single day joined with their completion flags, in schedule order.
#[derive(PartialEq, Eq, Debug, Serialize, Deserialize, Clone, Default)]
#[serde(transparent)]
pub struct ProgressSnapshot(pub Vec<TaskProgress>);

impl ProgressSnapshot {
    pub fn completed_count(&self) -> usize {
        self.0.iter().filter(|v| v.completed).count()
    }
}

/// Owner of the completion flags. Nothing else should touch flag keys in the underlying store.
pub struct ProgressStore<S> {
    store: S,
}

impl<S: KeyValueStore> ProgressStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Unset flags are unchecked.
    pub async fn get_flag(&self, day: i64, task: usize) -> Result<bool> {
        let value = self.store.get(&flag_key(day, task)).await?;
        Ok(value.as_deref() == Some(CHECKED))
    }

    pub async fn set_flag(&self, day: i64, task: usize, value: bool) -> Result<()> {
        let stored = if value { CHECKED } else { UNCHECKED };
        self.store.set(&flag_key(day, task), stored).await?;
        debug!("Saved day {day} task {task} as {stored}");
        Ok(())
    }

    /// Fails with [NoScheduleError] if `day` has nothing planned.
    pub async fn snapshot(&self, day: i64, schedule: &ScheduleTable) -> Result<ProgressSnapshot> {
        if !schedule.has_schedule(day) {
            return Err(NoScheduleError { day }.into());
        }

        let mut progress = Vec::new();
        for (index, task) in schedule.get_tasks(day).iter().enumerate() {
            progress.push(TaskProgress {
                task: task.to_string(),
                completed: self.get_flag(day, index).await?,
            });
        }
        Ok(ProgressSnapshot(progress))
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use tempfile::tempdir;

    use crate::{
        error::NoScheduleError,
        schedule::ScheduleTable,
        storage::kv::{FileKeyValueStore, MockKeyValueStore},
    };

    use super::{flag_key, ProgressSnapshot, ProgressStore};

    fn file_store(dir: &tempfile::TempDir) -> Result<ProgressStore<FileKeyValueStore>> {
        Ok(ProgressStore::new(FileKeyValueStore::new(
            dir.path().join("progress.json"),
        )?))
    }

    #[test]
    fn test_flag_key_shape() {
        assert_eq!(flag_key(5, 2), "day5-task2");
        assert_eq!(flag_key(-1, 0), "day-1-task0");
    }

    #[tokio::test]
    async fn test_set_flag_writes_exact_key() -> Result<()> {
        let mut store = MockKeyValueStore::new();
        store
            .expect_set()
            .withf(|key, value| key == "day5-task2" && value == "true")
            .times(1)
            .returning(|_, _| Ok(()));
        store
            .expect_set()
            .withf(|key, value| key == "day5-task3" && value == "false")
            .times(1)
            .returning(|_, _| Ok(()));

        let progress = ProgressStore::new(store);
        progress.set_flag(5, 2, true).await?;
        progress.set_flag(5, 3, false).await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_only_true_string_is_checked() -> Result<()> {
        let mut store = MockKeyValueStore::new();
        store.expect_get().returning(|key| {
            Ok(match key {
                "day1-task0" => Some("true".to_string()),
                "day1-task1" => Some("false".to_string()),
                "day1-task2" => Some("yes".to_string()),
                _ => None,
            })
        });

        let progress = ProgressStore::new(store);
        assert!(progress.get_flag(1, 0).await?);
        assert!(!progress.get_flag(1, 1).await?);
        assert!(!progress.get_flag(1, 2).await?);
        assert!(!progress.get_flag(1, 3).await?);
        Ok(())
    }

    #[tokio::test]
    async fn test_set_flag_is_idempotent() -> Result<()> {
        let dir = tempdir()?;
        let progress = file_store(&dir)?;

        progress.set_flag(7, 1, true).await?;
        let once = std::fs::read_to_string(dir.path().join("progress.json"))?;
        progress.set_flag(7, 1, true).await?;
        let twice = std::fs::read_to_string(dir.path().join("progress.json"))?;

        assert_eq!(once, twice);
        assert!(progress.get_flag(7, 1).await?);
        Ok(())
    }

    #[tokio::test]
    async fn test_snapshot_joins_flags() -> Result<()> {
        let dir = tempdir()?;
        let progress = file_store(&dir)?;
        let schedule = ScheduleTable::new();

        progress.set_flag(5, 2, true).await?;
        let snapshot = progress.snapshot(5, &schedule).await?;

        assert_eq!(snapshot.0.len(), 5);
        for (index, entry) in snapshot.0.iter().enumerate() {
            assert_eq!(entry.task, schedule.get_tasks(5)[index]);
            assert_eq!(entry.completed, index == 2);
        }
        assert_eq!(snapshot.completed_count(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_snapshot_survives_json() -> Result<()> {
        let dir = tempdir()?;
        let progress = file_store(&dir)?;
        let schedule = ScheduleTable::new();

        progress.set_flag(80, 0, true).await?;
        progress.set_flag(80, 4, true).await?;
        progress.set_flag(80, 4, false).await?;
        let snapshot = progress.snapshot(80, &schedule).await?;

        let json = serde_json::to_string_pretty(&snapshot)?;
        assert!(json.starts_with('['));
        let parsed: ProgressSnapshot = serde_json::from_str(&json)?;
        assert_eq!(parsed, snapshot);
        assert_eq!(
            parsed.0.iter().map(|v| v.completed).collect::<Vec<_>>(),
            vec![true, false, false, false, false]
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_snapshot_without_schedule_fails() -> Result<()> {
        let dir = tempdir()?;
        let progress = file_store(&dir)?;

        for day in [0, 91] {
            let error = progress
                .snapshot(day, &ScheduleTable::new())
                .await
                .unwrap_err();
            assert_eq!(error.downcast_ref::<NoScheduleError>(), Some(&NoScheduleError { day }));
        }
        Ok(())
    }
}
