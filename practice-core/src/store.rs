//! # Progress Store Module
//!
//! JSON file-based persistent storage for the learner's progress, plus an
//! in-memory store for hosts and tests that do not want durability.
//!
//! The aggregate is one small document, so load/save read and rewrite the
//! whole file. Saves go through a temp file and a rename so an interrupted
//! write never truncates the previous snapshot.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::Result;
use crate::progress::Progress;

/// Durable storage contract. `load` returns `None` on first launch, which
/// the engine treats as "initialize defaults".
pub trait ProgressStore {
    fn load(&self) -> Result<Option<Progress>>;
    fn save(&self, progress: &Progress) -> Result<()>;
}

impl<S: ProgressStore + ?Sized> ProgressStore for &S {
    fn load(&self) -> Result<Option<Progress>> {
        (**self).load()
    }

    fn save(&self, progress: &Progress) -> Result<()> {
        (**self).save(progress)
    }
}

/// Progress persisted as pretty JSON at a single path.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProgressStore for JsonFileStore {
    fn load(&self) -> Result<Option<Progress>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)?;
        let progress = serde_json::from_str(&content)?;
        Ok(Some(progress))
    }

    fn save(&self, progress: &Progress) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(progress)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// Volatile store, mainly for tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    saved: Mutex<Option<Progress>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressStore for MemoryStore {
    fn load(&self) -> Result<Option<Progress>> {
        Ok(self.saved.lock().unwrap().clone())
    }

    fn save(&self, progress: &Progress) -> Result<()> {
        *self.saved.lock().unwrap() = Some(progress.clone());
        Ok(())
    }
}
