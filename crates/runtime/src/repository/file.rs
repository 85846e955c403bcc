//! File-backed save repository.
//!
//! One JSON file per slot plus a `slots.json` index holding the slot list
//! and the active slot id. All writes go through a temp file and an atomic
//! rename so a crash never leaves a half-written snapshot behind.

use std::fs;
use std::path::{Path, PathBuf};

use doors_core::SaveGame;
use serde::{Deserialize, Serialize};

use crate::error::RepositoryError;
use crate::repository::{SaveRepository, SaveSlotMeta};

const INDEX_FILE: &str = "slots.json";

#[derive(Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SlotsIndex {
    slots: Vec<SaveSlotMeta>,
    active_slot_id: Option<String>,
}

/// Stores each slot as `{slot_id}.json` under a base directory.
pub struct FileSaveRepository {
    base_dir: PathBuf,
}

impl FileSaveRepository {
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self, RepositoryError> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    fn save_path(&self, slot_id: &str) -> PathBuf {
        self.base_dir.join(format!("{slot_id}.json"))
    }

    fn index_path(&self) -> PathBuf {
        self.base_dir.join(INDEX_FILE)
    }

    fn write_atomic(&self, path: &Path, contents: &str) -> Result<(), RepositoryError> {
        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, contents)?;
        fs::rename(&temp_path, path)?;
        Ok(())
    }

    /// Reads the index, treating a missing or corrupt file as empty.
    fn read_index(&self) -> Result<SlotsIndex, RepositoryError> {
        let path = self.index_path();
        if !path.exists() {
            return Ok(SlotsIndex::default());
        }
        let raw = fs::read_to_string(&path)?;
        match serde_json::from_str(&raw) {
            Ok(index) => Ok(index),
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "discarding corrupt slot index");
                Ok(SlotsIndex::default())
            }
        }
    }

    fn write_index(&self, index: &SlotsIndex) -> Result<(), RepositoryError> {
        let contents = serde_json::to_string(index)
            .map_err(|error| RepositoryError::Serialization(error.to_string()))?;
        self.write_atomic(&self.index_path(), &contents)
    }
}

impl SaveRepository for FileSaveRepository {
    fn load(&self, slot_id: &str) -> Result<Option<SaveGame>, RepositoryError> {
        let path = self.save_path(slot_id);
        if !path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&path)?;
        match serde_json::from_str(&raw) {
            Ok(save) => Ok(Some(save)),
            Err(error) => {
                tracing::warn!(slot_id, %error, "treating unreadable save as absent");
                Ok(None)
            }
        }
    }

    fn save(&self, save: &SaveGame) -> Result<(), RepositoryError> {
        let contents = serde_json::to_string(save)
            .map_err(|error| RepositoryError::Serialization(error.to_string()))?;
        self.write_atomic(&self.save_path(&save.meta.slot_id), &contents)?;
        tracing::debug!(slot_id = %save.meta.slot_id, "persisted save");
        Ok(())
    }

    fn delete(&self, slot_id: &str) -> Result<(), RepositoryError> {
        let path = self.save_path(slot_id);
        if path.exists() {
            fs::remove_file(&path)?;
            tracing::debug!(slot_id, "deleted save");
        }
        Ok(())
    }

    fn list_slots(&self) -> Result<Vec<SaveSlotMeta>, RepositoryError> {
        Ok(self.read_index()?.slots)
    }

    fn save_slots(&self, slots: &[SaveSlotMeta]) -> Result<(), RepositoryError> {
        let mut index = self.read_index()?;
        index.slots = slots.to_vec();
        self.write_index(&index)
    }

    fn active_slot(&self) -> Result<Option<String>, RepositoryError> {
        Ok(self.read_index()?.active_slot_id)
    }

    fn set_active(&self, slot_id: Option<&str>) -> Result<(), RepositoryError> {
        let mut index = self.read_index()?;
        index.active_slot_id = slot_id.map(str::to_string);
        self.write_index(&index)
    }
}
