//! Key-value persistence areas behind the result store.
//!
//! An area holds whole values under string keys and broadcasts the key of
//! every write to in-process subscribers. Writes are atomic for a single
//! caller; nothing serializes read-modify-write cycles across processes.

use crate::store::StoreError;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tokio::sync::broadcast;
use tracing::{debug, instrument, trace};

/// Capacity of the change-notification channel.
const CHANGE_CHANNEL_CAPACITY: usize = 32;

/// Key-value persistence area.
pub trait StorageArea: std::fmt::Debug + Send + Sync {
    /// Reads the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backing medium cannot be read.
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replaces the value stored under `key` and notifies subscribers.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backing medium cannot be written.
    fn write(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Subscribes to change notifications. Each message is a written key.
    fn subscribe(&self) -> broadcast::Receiver<String>;
}

/// Announces a write to subscribers. Having none is fine.
fn notify(changes: &broadcast::Sender<String>, key: &str) {
    match changes.send(key.to_string()) {
        Ok(receivers) => trace!(key, receivers, "Change broadcast"),
        Err(_) => trace!(key, "Change broadcast with no subscribers"),
    }
}

/// In-process area, shared by wrapping it in an `Arc`.
#[derive(Debug)]
pub struct MemoryArea {
    values: Mutex<HashMap<String, String>>,
    changes: broadcast::Sender<String>,
}

impl MemoryArea {
    /// Creates an empty area.
    #[instrument]
    pub fn new() -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            values: Mutex::new(HashMap::new()),
            changes,
        }
    }
}

impl Default for MemoryArea {
    fn default() -> Self {
        Self::new()
    }
}

impl StorageArea for MemoryArea {
    #[instrument(skip(self))]
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        let values = self
            .values
            .lock()
            .map_err(|_| StoreError::new("Memory area lock poisoned"))?;
        Ok(values.get(key).cloned())
    }

    #[instrument(skip(self, value), fields(bytes = value.len()))]
    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        {
            let mut values = self
                .values
                .lock()
                .map_err(|_| StoreError::new("Memory area lock poisoned"))?;
            values.insert(key.to_string(), value.to_string());
        }
        debug!("Value written");
        notify(&self.changes, key);
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<String> {
        self.changes.subscribe()
    }
}

/// Directory-backed area storing each key as `<key>.json`.
///
/// Change notifications reach subscribers of this handle only; another
/// process writing the same directory is seen on the next read.
#[derive(Debug)]
pub struct FileArea {
    dir: PathBuf,
    changes: broadcast::Sender<String>,
}

impl FileArea {
    /// Creates an area rooted at `dir`. The directory is created on first
    /// write.
    #[instrument(skip(dir), fields(dir = %dir.as_ref().display()))]
    pub fn new(dir: impl AsRef<Path>) -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            dir: dir.as_ref().to_path_buf(),
            changes,
        }
    }

    /// Root directory of the area.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StoreError::new(format!("Invalid storage key '{}'", key)));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl StorageArea for FileArea {
    #[instrument(skip(self), fields(dir = %self.dir.display()))]
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No stored value");
                Ok(None)
            }
            Err(e) => Err(StoreError::new(format!(
                "Failed to read '{}': {}",
                path.display(),
                e
            ))),
        }
    }

    #[instrument(skip(self, value), fields(dir = %self.dir.display(), bytes = value.len()))]
    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.dir)?;

        // Write-then-rename so readers never observe a half-written file.
        let staging = path.with_extension("json.tmp");
        std::fs::write(&staging, value)?;
        std::fs::rename(&staging, &path)?;

        debug!(path = %path.display(), "Value written");
        notify(&self.changes, key);
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<String> {
        self.changes.subscribe()
    }
}
