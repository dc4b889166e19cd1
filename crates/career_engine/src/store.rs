//! Client-side key/value persistence.

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store directory missing or not writable: {0}")]
    Directory(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("cannot decode store file {path}: {message}")]
    Decode { path: PathBuf, message: String },
    #[error("cannot encode store contents: {0}")]
    Encode(String),
    #[error("store lock poisoned")]
    Poisoned,
}

/// String key/value storage. `None` in a batch removes the key.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Applies every change in one write.
    fn write_batch(&self, batch: &[(&str, Option<&str>)]) -> Result<(), StoreError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.write_batch(&[(key, Some(value))])
    }
}

fn apply_batch(entries: &mut BTreeMap<String, String>, batch: &[(&str, Option<&str>)]) {
    for (key, value) in batch {
        match value {
            Some(value) => {
                entries.insert((*key).to_string(), (*value).to_string());
            }
            None => {
                entries.remove(*key);
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn write_batch(&self, batch: &[(&str, Option<&str>)]) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().map_err(|_| StoreError::Poisoned)?;
        apply_batch(&mut entries, batch);
        Ok(())
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct PersistedEntries {
    entries: BTreeMap<String, String>,
}

/// RON file holding all entries, rewritten atomically on every change.
///
/// The file is re-read on each access so that a login in another process is
/// picked up.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    guard: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            guard: Mutex::new(()),
        }
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(err) => return Err(err.into()),
        };
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        let persisted: PersistedEntries =
            ron::from_str(&content).map_err(|err| StoreError::Decode {
                path: self.path.clone(),
                message: err.to_string(),
            })?;
        Ok(persisted.entries)
    }

    fn write_entries(&self, entries: BTreeMap<String, String>) -> Result<(), StoreError> {
        let persisted = PersistedEntries { entries };
        let content = ron::ser::to_string_pretty(&persisted, ron::ser::PrettyConfig::new())
            .map_err(|err| StoreError::Encode(err.to_string()))?;
        let dir = self
            .path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| StoreError::Directory("store path has no file name".into()))?;
        AtomicFileWriter::new(dir).write(Path::new(file_name), &content)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let _guard = self.guard.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(self.read_entries()?.remove(key))
    }

    fn write_batch(&self, batch: &[(&str, Option<&str>)]) -> Result<(), StoreError> {
        let _guard = self.guard.lock().map_err(|_| StoreError::Poisoned)?;
        // An unreadable file is replaced rather than blocking logout.
        let mut entries = self.read_entries().unwrap_or_else(|err| {
            career_logging::career_warn!("Discarding unreadable store {:?}: {}", self.path, err);
            BTreeMap::new()
        });
        apply_batch(&mut entries, batch);
        self.write_entries(entries)
    }
}

/// Ensure the store directory exists; create if missing.
pub fn ensure_store_dir(dir: &Path) -> Result<(), StoreError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| StoreError::Directory(e.to_string()))?;
        if !meta.is_dir() {
            return Err(StoreError::Directory("path is not a directory".into()));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| StoreError::Directory(e.to_string()))?;
    }
    Ok(())
}

/// Atomically write content to `{dir}/{filename}` by writing a temp file then renaming.
///
/// Temp files are created owner-readable only, so the token never sits in a
/// world-readable file.
pub struct AtomicFileWriter {
    dir: PathBuf,
}

impl AtomicFileWriter {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn write(&self, filename: &Path, content: &str) -> Result<PathBuf, StoreError> {
        ensure_store_dir(&self.dir)?;

        let target = self.dir.join(filename);
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;

        tmp.persist(&target).map_err(|e| StoreError::Io(e.error))?;
        Ok(target)
    }
}
