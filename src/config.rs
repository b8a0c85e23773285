//! Program configuration. The only setting is the instant day 1 starts, which is written once
//! by `bootcamp begin` and read by every other command.

use std::{io::ErrorKind, path::Path};

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

pub const CONFIG_FILE: &str = "config.json";
/// Key-value store holding the completion flags.
pub const PROGRESS_FILE: &str = "progress.json";
/// Default destination of exported progress.
pub const EXPORT_DIR: &str = "exports";

#[derive(PartialEq, Eq, Debug, Serialize, Deserialize, Clone)]
pub struct ProgramConfig {
    pub start: DateTime<Utc>,
}

impl ProgramConfig {
    pub async fn load(app_dir: &Path) -> Result<Option<ProgramConfig>> {
        let path = app_dir.join(CONFIG_FILE);
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(
                serde_json::from_str(&content)
                    .with_context(|| format!("Config {path:?} is corrupted"))?,
            )),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e)?,
        }
    }

    /// Same as [ProgramConfig::load], but a missing config is an error.
    pub async fn require(app_dir: &Path) -> Result<ProgramConfig> {
        Self::load(app_dir).await?.ok_or_else(|| {
            anyhow!("The program hasn't been started yet. Run `bootcamp begin` first")
        })
    }

    /// Persists the config. An existing start is kept unless `force` is set.
    pub async fn save(&self, app_dir: &Path, force: bool) -> Result<()> {
        if !force {
            if let Some(existing) = Self::load(app_dir).await? {
                return Err(anyhow!(
                    "The program already started at {}. Use --force to override it",
                    existing.start
                ));
            }
        }
        tokio::fs::create_dir_all(app_dir).await?;
        tokio::fs::write(
            app_dir.join(CONFIG_FILE),
            serde_json::to_string_pretty(self)?,
        )
        .await?;
        info!("Program start set to {}", self.start);
        Ok(())
    }
}
