//! Key-value storage adapter
//!
//! The progress functions never touch storage. Hosts keep the canonical
//! record and use these helpers to read it once at startup and write it back
//! after each change.

use std::collections::HashMap;

use log::error;

use super::state::{deserialize_progress, serialize_progress, LearningProgress};
use crate::error::MuseError;

/// Key the progress blob is stored under unless configured otherwise
pub const STORAGE_KEY: &str = "music-learning-progress";

/// A string-to-string store, e.g. browser local storage or a settings file
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, MuseError>;
    fn set(&mut self, key: &str, value: String) -> Result<(), MuseError>;
}

/// In-process store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, MuseError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), MuseError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}

/// Load the record under `key`, tracking at least `modules`.
///
/// A missing entry is a new learner. An unreadable or corrupt entry is logged
/// and replaced by a fresh record rather than failing the host.
pub fn load_progress<S, I, M>(store: &S, key: &str, modules: I) -> LearningProgress
where
    S: KeyValueStore + ?Sized,
    I: IntoIterator<Item = M>,
    M: AsRef<str>,
{
    let progress = match store.get(key) {
        Ok(Some(data)) => deserialize_progress(&data).unwrap_or_else(|e| {
            error!("failed to load learning progress from '{}': {}", key, e);
            LearningProgress::default()
        }),
        Ok(None) => LearningProgress::default(),
        Err(e) => {
            error!("failed to read learning progress from '{}': {}", key, e);
            LearningProgress::default()
        }
    };
    progress.track_modules(modules)
}

pub fn save_progress<S>(store: &mut S, key: &str, progress: &LearningProgress) -> Result<(), MuseError>
where
    S: KeyValueStore + ?Sized,
{
    let data = serialize_progress(progress)?;
    store.set(key, data).map_err(|e| {
        error!("failed to save learning progress to '{}': {}", key, e);
        e
    })
}

/// Overwrite the stored record with a fresh one and return it
pub fn reset_progress<S>(store: &mut S, key: &str) -> Result<LearningProgress, MuseError>
where
    S: KeyValueStore + ?Sized,
{
    let progress = LearningProgress::reset();
    save_progress(store, key, &progress)?;
    Ok(progress)
}
