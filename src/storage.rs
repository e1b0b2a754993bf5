use std::{
    fs,
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

use chrono::Utc;
use log::{debug, error, info, trace, warn};
use tempfile::NamedTempFile;

use crate::{Config, GardenError, RecordStore, Result};

/// Reads and writes the single JSON slot holding every record.
#[derive(Debug, Clone)]
pub struct RecordStorage {
    /// Directory holding the slot file
    data_dir: PathBuf,

    /// Slot name without extension
    slot_name: String,

    /// Copy the previous slot aside before overwriting it
    backup_on_write: bool,
}

impl RecordStorage {
    pub fn new(config: &Config) -> Self {
        Self {
            data_dir: config.data_dir.clone(),
            slot_name: config.slot_name.clone(),
            backup_on_write: config.backup_on_write,
        }
    }

    pub fn slot_path(&self) -> PathBuf {
        self.data_dir.join(format!("{}.json", self.slot_name))
    }

    fn backup_path(&self) -> PathBuf {
        self.data_dir.join(format!("{}.bak.json", self.slot_name))
    }

    /// Loads the persisted store.
    ///
    /// Never fails: a missing slot is an empty store, and an unreadable or
    /// malformed slot is logged, set aside, and replaced by an empty store.
    pub fn load(&self) -> RecordStore {
        let path = self.slot_path();
        debug!("Loading records from {}", path.display());

        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("No records slot at {}, starting empty", path.display());
                return RecordStore::new();
            }
            Err(e) => {
                warn!("Failed to read records from {}: {}", path.display(), e);
                return RecordStore::new();
            }
        };

        match serde_json::from_str::<RecordStore>(&raw) {
            Ok(store) => {
                let store = store.normalized();
                info!(
                    "Loaded {} notes across {} days",
                    store.note_count(),
                    store.days().count()
                );
                store
            }
            Err(e) => {
                warn!("Records slot {} is malformed, starting empty: {}", path.display(), e);
                self.quarantine(&path);
                RecordStore::new()
            }
        }
    }

    /// Writes the whole store, replacing the previous slot content atomically.
    pub fn persist(&self, store: &RecordStore) -> Result<()> {
        let path = self.slot_path();
        info!("Saving {} notes to {}", store.note_count(), path.display());

        if !self.data_dir.exists() {
            debug!("Creating data directory: {}", self.data_dir.display());
            fs::create_dir_all(&self.data_dir).map_err(|e| {
                error!("Failed to create data directory: {}", e);
                GardenError::DirectoryError {
                    path: self.data_dir.clone(),
                }
            })?;
        }

        if self.backup_on_write && path.is_file() {
            match fs::copy(&path, self.backup_path()) {
                Ok(_) => trace!("Previous slot copied to {}", self.backup_path().display()),
                Err(e) => warn!("Failed to back up previous slot: {}", e),
            }
        }

        // Write next to the target so the final rename stays on one filesystem
        let mut temp_file = NamedTempFile::new_in(&self.data_dir).map_err(|e| {
            error!("Failed to create temporary file: {}", e);
            GardenError::Io(e)
        })?;

        let json = serde_json::to_string_pretty(store).map_err(|e| {
            error!("Failed to serialize records: {}", e);
            GardenError::Serialization(e)
        })?;

        temp_file.write_all(json.as_bytes()).map_err(|e| {
            error!("Failed to write to temporary file: {}", e);
            GardenError::Io(e)
        })?;
        temp_file.flush()?;

        temp_file.persist(&path).map_err(|e| {
            error!("Failed to persist file {}: {}", path.display(), e.error);
            GardenError::Io(e.error)
        })?;

        debug!("Records saved");
        Ok(())
    }

    /// Moves an unreadable slot aside so the next save cannot destroy it.
    fn quarantine(&self, path: &Path) {
        let target = self.data_dir.join(format!(
            "{}.corrupt-{}.json",
            self.slot_name,
            Utc::now().timestamp()
        ));
        match fs::copy(path, &target) {
            Ok(_) => warn!("Malformed slot copied to {}", target.display()),
            Err(e) => warn!("Failed to keep a copy of the malformed slot: {}", e),
        }
    }
}
