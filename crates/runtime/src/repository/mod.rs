//! Save persistence contracts and implementations.

mod file;
mod memory;

pub use file::FileSaveRepository;
pub use memory::InMemorySaveRepository;

use doors_core::SaveGame;
use serde::{Deserialize, Serialize};

use crate::error::RepositoryError;

/// Index entry describing one save slot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveSlotMeta {
    pub id: String,
    pub name: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Storage backend for save snapshots and the slot index.
///
/// Implementations persist each slot's snapshot independently of the slot
/// index; keeping the two consistent (for example bumping a slot's
/// `updated_at` after a save) is the caller's job.
pub trait SaveRepository: Send + Sync {
    /// Loads a slot's snapshot. A missing or unreadable snapshot is `None`.
    fn load(&self, slot_id: &str) -> Result<Option<SaveGame>, RepositoryError>;

    /// Persists a snapshot under its own slot id.
    fn save(&self, save: &SaveGame) -> Result<(), RepositoryError>;

    /// Removes a slot's snapshot. Deleting an absent slot is a no-op.
    fn delete(&self, slot_id: &str) -> Result<(), RepositoryError>;

    fn list_slots(&self) -> Result<Vec<SaveSlotMeta>, RepositoryError>;

    fn save_slots(&self, slots: &[SaveSlotMeta]) -> Result<(), RepositoryError>;

    fn rename_slot(&self, slot_id: &str, name: &str) -> Result<(), RepositoryError> {
        let mut slots = self.list_slots()?;
        for slot in &mut slots {
            if slot.id == slot_id {
                slot.name = name.to_string();
            }
        }
        self.save_slots(&slots)
    }

    fn active_slot(&self) -> Result<Option<String>, RepositoryError>;

    fn set_active(&self, slot_id: Option<&str>) -> Result<(), RepositoryError>;
}
