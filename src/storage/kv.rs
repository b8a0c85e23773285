use std::{
    collections::BTreeMap,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use async_trait::async_trait;
use fs4::tokio::AsyncFileExt;
use tokio::{fs::File, io::AsyncWriteExt};
use tracing::debug;

type Entries = BTreeMap<String, String>;

/// Durable string to string storage. Values survive process restarts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Overwrites any previous value stored under `key`.
    async fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// The main realization of [KeyValueStore]. All entries live in a single JSON object file. A
/// sibling `.lock` file is locked for the duration of every read or write so that the cli and the
/// daemon can share the store. Writes go to a temporary file that is renamed over the store, so
/// a failed write leaves the previous content in place.
pub struct FileKeyValueStore {
    path: PathBuf,
    lock_path: PathBuf,
    temp_path: PathBuf,
}

impl FileKeyValueStore {
    pub fn new(path: PathBuf) -> Result<Self, std::io::Error> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        Ok(Self {
            lock_path: sibling(&path, "lock"),
            temp_path: sibling(&path, "tmp"),
            path,
        })
    }

    async fn open_lock(&self) -> Result<File, std::io::Error> {
        File::options()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&self.lock_path)
            .await
    }

    async fn read_entries(&self) -> Result<Entries> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => parse_entries(&content, &self.path),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Entries::new()),
            Err(e) => Err(e)?,
        }
    }

    async fn write_entry(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.read_entries().await?;
        entries.insert(key.to_owned(), value.to_owned());
        let buffer = serde_json::to_vec_pretty(&entries)?;

        let mut temp = File::create(&self.temp_path).await?;
        temp.write_all(&buffer).await?;
        temp.sync_all().await?;
        drop(temp);

        tokio::fs::rename(&self.temp_path, &self.path).await?;
        Ok(())
    }
}

fn sibling(path: &Path, extension: &str) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".");
    name.push(extension);
    path.with_file_name(name)
}

fn parse_entries(content: &str, path: &Path) -> Result<Entries> {
    if content.trim().is_empty() {
        return Ok(Entries::new());
    }
    serde_json::from_str(content).with_context(|| format!("Store {path:?} is corrupted"))
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        debug!("Reading {:?}", self.path);
        let lock = self.open_lock().await?;
        lock.lock_shared()?;
        let entries = self.read_entries().await;
        lock.unlock_async().await?;
        Ok(entries?.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let lock = self.open_lock().await?;

        // Semi-safe acquire-release for a file
        lock.lock_exclusive()?;
        let result = self.write_entry(key, value).await;
        lock.unlock_async().await?;
        result.inspect(|_| debug!("Stored {key}={value}"))
    }
}
