//! File repository behavior: round-trips, corrupt-data handling, and the
//! slot index.

use std::fs;

use doors_core::{SaveGame, Timestamp};
use doors_runtime::{FileSaveRepository, SaveRepository, SaveSlotMeta};

fn sample_save(slot_id: &str) -> SaveGame {
    SaveGame::template(
        slot_id,
        1234,
        Vec::new(),
        Vec::new(),
        0.002,
        Timestamp::from("2024-06-01T12:00:00.000Z"),
    )
}

fn slot_meta(id: &str, name: &str) -> SaveSlotMeta {
    SaveSlotMeta {
        id: id.to_string(),
        name: name.to_string(),
        created_at: "2024-06-01T12:00:00.000Z".to_string(),
        updated_at: "2024-06-01T12:00:00.000Z".to_string(),
    }
}

#[test]
fn save_round_trips_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let repo = FileSaveRepository::new(dir.path()).unwrap();

    let save = sample_save("slot-1");
    repo.save(&save).unwrap();
    let loaded = repo.load("slot-1").unwrap().unwrap();
    assert_eq!(loaded, save);
}

#[test]
fn missing_slot_loads_as_none() {
    let dir = tempfile::tempdir().unwrap();
    let repo = FileSaveRepository::new(dir.path()).unwrap();
    assert!(repo.load("slot-missing").unwrap().is_none());
}

#[test]
fn corrupt_save_file_loads_as_none() {
    let dir = tempfile::tempdir().unwrap();
    let repo = FileSaveRepository::new(dir.path()).unwrap();

    fs::write(dir.path().join("slot-bad.json"), "{ not json").unwrap();
    assert!(repo.load("slot-bad").unwrap().is_none());
}

#[test]
fn saving_twice_overwrites_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let repo = FileSaveRepository::new(dir.path()).unwrap();

    let mut save = sample_save("slot-1");
    repo.save(&save).unwrap();
    save.inventory.coins = 99;
    repo.save(&save).unwrap();

    let loaded = repo.load("slot-1").unwrap().unwrap();
    assert_eq!(loaded.inventory.coins, 99);
    assert!(!dir.path().join("slot-1.json.tmp").exists());
}

#[test]
fn delete_removes_the_file_and_tolerates_absence() {
    let dir = tempfile::tempdir().unwrap();
    let repo = FileSaveRepository::new(dir.path()).unwrap();

    repo.save(&sample_save("slot-1")).unwrap();
    repo.delete("slot-1").unwrap();
    assert!(repo.load("slot-1").unwrap().is_none());

    repo.delete("slot-1").unwrap();
}

#[test]
fn slot_index_round_trips_with_active_slot() {
    let dir = tempfile::tempdir().unwrap();
    let repo = FileSaveRepository::new(dir.path()).unwrap();

    assert!(repo.list_slots().unwrap().is_empty());
    assert!(repo.active_slot().unwrap().is_none());

    let slots = vec![slot_meta("slot-1", "Primo"), slot_meta("slot-2", "Secondo")];
    repo.save_slots(&slots).unwrap();
    repo.set_active(Some("slot-2")).unwrap();

    let reopened = FileSaveRepository::new(dir.path()).unwrap();
    assert_eq!(reopened.list_slots().unwrap(), slots);
    assert_eq!(reopened.active_slot().unwrap().as_deref(), Some("slot-2"));

    reopened.set_active(None).unwrap();
    assert!(reopened.active_slot().unwrap().is_none());
    assert_eq!(reopened.list_slots().unwrap(), slots);
}

#[test]
fn rename_updates_only_the_matching_slot() {
    let dir = tempfile::tempdir().unwrap();
    let repo = FileSaveRepository::new(dir.path()).unwrap();

    repo.save_slots(&[slot_meta("slot-1", "Primo"), slot_meta("slot-2", "Secondo")])
        .unwrap();
    repo.rename_slot("slot-1", "Rinominato").unwrap();

    let slots = repo.list_slots().unwrap();
    assert_eq!(slots[0].name, "Rinominato");
    assert_eq!(slots[1].name, "Secondo");
}

#[test]
fn corrupt_index_reads_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let repo = FileSaveRepository::new(dir.path()).unwrap();

    fs::write(dir.path().join("slots.json"), "garbage").unwrap();
    assert!(repo.list_slots().unwrap().is_empty());
    assert!(repo.active_slot().unwrap().is_none());
}
