use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::info;

use crate::storage::progress::ProgressSnapshot;

/// This is the standard way of naming exported progress of a day.
pub fn export_file_name(day: i64) -> String {
    format!("Day{day}_progress.json")
}

/// Writes `snapshot` into `dir` as a pretty printed JSON array and returns the created file.
pub async fn export_snapshot(day: i64, snapshot: &ProgressSnapshot, dir: &Path) -> Result<PathBuf> {
    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(export_file_name(day));
    let content = serde_json::to_string_pretty(snapshot)?;
    tokio::fs::write(&path, content).await?;
    info!("Exported progress of day {day} into {path:?}");
    Ok(path)
}
