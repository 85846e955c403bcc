//! In-memory save repository for tests.

use std::collections::BTreeMap;
use std::sync::Mutex;

use doors_core::SaveGame;

use crate::error::RepositoryError;
use crate::repository::{SaveRepository, SaveSlotMeta};

#[derive(Default)]
struct Inner {
    saves: BTreeMap<String, String>,
    slots: Vec<SaveSlotMeta>,
    active: Option<String>,
}

/// Keeps saves as serialized JSON so tests observe the exact persisted
/// bytes, not a shortcut through the in-memory structs.
#[derive(Default)]
pub struct InMemorySaveRepository {
    inner: Mutex<Inner>,
}

impl InMemorySaveRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// The raw persisted JSON for a slot, if any.
    pub fn raw_save(&self, slot_id: &str) -> Result<Option<String>, RepositoryError> {
        let inner = self
            .inner
            .lock()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(inner.saves.get(slot_id).cloned())
    }
}

impl SaveRepository for InMemorySaveRepository {
    fn load(&self, slot_id: &str) -> Result<Option<SaveGame>, RepositoryError> {
        let inner = self
            .inner
            .lock()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        let Some(raw) = inner.saves.get(slot_id) else {
            return Ok(None);
        };
        match serde_json::from_str(raw) {
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
        let mut inner = self
            .inner
            .lock()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        inner.saves.insert(save.meta.slot_id.clone(), contents);
        Ok(())
    }

    fn delete(&self, slot_id: &str) -> Result<(), RepositoryError> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        inner.saves.remove(slot_id);
        Ok(())
    }

    fn list_slots(&self) -> Result<Vec<SaveSlotMeta>, RepositoryError> {
        let inner = self
            .inner
            .lock()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(inner.slots.clone())
    }

    fn save_slots(&self, slots: &[SaveSlotMeta]) -> Result<(), RepositoryError> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        inner.slots = slots.to_vec();
        Ok(())
    }

    fn active_slot(&self) -> Result<Option<String>, RepositoryError> {
        let inner = self
            .inner
            .lock()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(inner.active.clone())
    }

    fn set_active(&self, slot_id: Option<&str>) -> Result<(), RepositoryError> {
        let mut inner = self
            .inner
            .lock()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        inner.active = slot_id.map(str::to_string);
        Ok(())
    }
}
