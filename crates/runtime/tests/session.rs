//! Session behavior: slot lifecycle, battle projections, and persistence
//! failure handling.

mod common;

use std::fs;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use doors_core::{
    ActionResult, AnimalInstance, DoorType, SaveGame, Timestamp, WeaponName, WeaponState,
};
use doors_runtime::{
    FixedClock, InMemorySaveRepository, RepositoryError, SaveRepository, SaveSlotMeta, Session,
};

#[test]
fn create_slot_activates_and_persists_the_template() {
    let mut session = common::session(common::peaceful_configs());
    let slot_id = session.create_slot(None).unwrap();

    assert_eq!(session.active_slot_id(), Some(slot_id.as_str()));
    let save = session.save().unwrap();
    assert_eq!(save.meta.slot_id, slot_id);
    assert_eq!(save.progress.turn, 0);
    assert_eq!(save.inventory.ammo.darts, 8);
    let pistol = save.weapon(WeaponName::Pistol).unwrap();
    assert!(pistol.unlocked);

    let slots = session.slots();
    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0].name, "Salvataggio");
    assert!(session.repository().raw_save(&slot_id).unwrap().is_some());
}

#[test]
fn from_config_dir_loads_the_bundle_into_the_session() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("config_animali.json"),
        r#"{
            "animali": [
                {
                    "id": 1,
                    "animale": "Lupo",
                    "vita": 30,
                    "danno": 4,
                    "velocita_di_attacco": 3,
                    "eta": "Grande",
                    "stamina_max": 20,
                    "upgradable_armature": "no",
                    "costo_crescita_cibo": 6
                }
            ]
        }"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("config_armi.json"),
        r#"{
            "armi": [
                {
                    "nome": "Pistola",
                    "munizioni": "proiettili",
                    "danno_per_colpo": 5,
                    "capacita_massima": 12
                }
            ]
        }"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("door_loot_tables.json"),
        r#"{
            "loottables": [
                {
                    "porta": "Bianca",
                    "ricompense": [ { "loot": "Monete", "peso": 100, "quantita": "2-4" } ]
                }
            ]
        }"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("config_arredamento.json"),
        r#"{
            "arredamento": [
                {
                    "id": 1,
                    "nome": "Poltrona",
                    "pezzi": 4,
                    "bonus": { "tipo": "Monete", "quantita": 10, "cooldown": 5 }
                }
            ]
        }"#,
    )
    .unwrap();

    let mut session = Session::from_config_dir(
        dir.path(),
        InMemorySaveRepository::new(),
        Box::new(FixedClock::new(common::FIXED_NOW)),
    )
    .unwrap();

    let configs = session.configs();
    assert_eq!(configs.animals[0].kind, "Lupo");
    assert_eq!(configs.weapons[0].name, WeaponName::Pistol);
    assert!(configs.loot_table(DoorType::White).is_some());
    assert_eq!(configs.house[0].name, "Poltrona");

    // The loaded bundle feeds straight into new-slot templates.
    session.create_slot(None).unwrap();
    let save = session.save().unwrap();
    assert_eq!(save.weapons.len(), 1);
    assert_eq!(save.house.objects[0].name, "Poltrona");
}

#[test]
fn from_config_dir_surfaces_loader_failures() {
    let dir = tempfile::tempdir().unwrap();
    let result = Session::from_config_dir(
        dir.path(),
        InMemorySaveRepository::new(),
        Box::new(FixedClock::new(common::FIXED_NOW)),
    );
    let error = result.err().unwrap();
    assert!(error.to_string().contains("failed to load configs"));
}

#[test]
fn bootstrap_creates_a_slot_only_when_storage_is_empty() {
    let mut session = common::session(common::peaceful_configs());
    let created = session.bootstrap().unwrap().meta.slot_id.clone();
    assert_eq!(session.slots().len(), 1);
    assert_eq!(session.slots()[0].name, "Nuovo salvataggio");

    let existing = session.bootstrap().unwrap().meta.slot_id.clone();
    assert_eq!(created, existing);
    assert_eq!(session.slots().len(), 1);
}

#[test]
fn duplicate_slot_copies_state_under_a_fresh_identity() {
    let mut session = common::session(common::peaceful_configs());
    let original = session.create_slot(Some("Partita")).unwrap();
    let drawn = session.draw_lobby_doors().unwrap();
    session.open_door(drawn[0]).unwrap();

    let copy = session.duplicate_slot(&original).unwrap();
    assert_ne!(copy, original);
    assert_eq!(session.active_slot_id(), Some(original.as_str()));

    let slots = session.slots();
    assert_eq!(slots.len(), 2);
    assert_eq!(slots[1].name, "Partita (Copia)");

    let duplicated = session.repository().load(&copy).unwrap().unwrap();
    let source = session.save().unwrap();
    assert_eq!(duplicated.meta.slot_id, copy);
    assert_ne!(duplicated.meta.rng_seed, source.meta.rng_seed);
    assert_eq!(duplicated.progress, source.progress);
    assert_eq!(duplicated.inventory, source.inventory);

    let second_copy = session.duplicate_slot(&original).unwrap();
    let slots = session.slots();
    assert_eq!(slots[2].name, "Partita (Copia) 2");
    assert_ne!(second_copy, copy);
}

#[test]
fn rename_and_delete_update_index_and_snapshot() {
    let mut session = common::session(common::peaceful_configs());
    let first = session.create_slot(Some("Prima")).unwrap();
    let second = session.create_slot(Some("Seconda")).unwrap();
    assert_eq!(session.active_slot_id(), Some(second.as_str()));

    session.rename_slot(&first, "Archivio").unwrap();
    assert_eq!(session.slots()[0].name, "Archivio");

    session.delete_slot(&first).unwrap();
    assert_eq!(session.slots().len(), 1);
    assert!(session.save().is_some());

    session.delete_slot(&second).unwrap();
    assert!(session.slots().is_empty());
    assert!(session.save().is_none());
    assert!(session.active_slot_id().is_none());
}

#[test]
fn load_slot_rejects_unknown_ids() {
    let mut session = common::session(common::peaceful_configs());
    session.create_slot(None).unwrap();
    assert!(session.load_slot("slot-missing").is_err());
}

#[test]
fn reward_path_sets_and_hands_over_the_pending_reward() {
    let mut session = common::session(common::peaceful_configs());
    session.create_slot(None).unwrap();

    let drawn = session.draw_lobby_doors().unwrap();
    let result = session.open_door(drawn[0]).unwrap();
    assert!(matches!(result, ActionResult::Reward(_)));
    assert_eq!(
        session.battle_result(),
        Some(doors_runtime::BattleResult::Victory)
    );

    let reward = session.collect_reward().unwrap();
    assert_eq!(reward.door, drawn[0]);
    assert!(session.battle_result().is_none());
    assert!(session.collect_reward().is_none());
}

#[test]
fn weapon_victory_clears_the_battle_without_a_pending_reward() {
    let mut session = encounter_session(common::hostile_configs());

    let result = session
        .resolve_weapon_attack(WeaponName::Blowgun, 1)
        .unwrap();
    assert!(matches!(result, ActionResult::Victory(None)));
    assert_eq!(
        session.battle_result(),
        Some(doors_runtime::BattleResult::Victory)
    );
    assert!(session.collect_reward().is_none());
    assert!(!session.save().unwrap().battle_state.active);
    assert_eq!(session.save().unwrap().progress.turn, 1);

    // No pending reward to collect, so the flag stays until reset.
    assert_eq!(
        session.battle_result(),
        Some(doors_runtime::BattleResult::Victory)
    );
    session.reset_battle_result();
    assert!(session.battle_result().is_none());
}

#[test]
fn missed_attack_locks_the_weapon_phase_until_the_next_draw() {
    // A one-damage blowgun cannot drop a 30-life enemy in one shot.
    let mut configs = common::hostile_configs();
    for weapon in &mut configs.weapons {
        weapon.damage_per_shot = 1;
    }
    let mut session = encounter_session(configs);

    let result = session
        .resolve_weapon_attack(WeaponName::Blowgun, 1)
        .unwrap();
    assert!(matches!(
        result,
        ActionResult::BattleProgress {
            enemy_defeated: false,
            weapons_locked: true,
        }
    ));
    assert!(session.weapons_phase_locked());

    // Locked phase downgrades further attacks to no-ops.
    let retry = session
        .resolve_weapon_attack(WeaponName::Blowgun, 1)
        .unwrap();
    assert!(matches!(retry, ActionResult::Ignored));

    session.draw_lobby_doors().unwrap();
    assert!(!session.weapons_phase_locked());
}

#[test]
fn duel_victory_surfaces_the_reward_summary() {
    let mut session = encounter_session(common::hostile_configs());

    let result = session.resolve_animal_duel(0).unwrap();
    let ActionResult::Victory(Some(reward)) = &result else {
        panic!("expected a duel victory summary, got {result:?}");
    };
    assert!(reward.weapons_used.is_empty());
    assert_eq!(
        session.battle_result(),
        Some(doors_runtime::BattleResult::Victory)
    );
    assert_eq!(session.pending_reward(), Some(reward));

    // Stamina was spent to zero, then the victory regen applied.
    let fighter = &session.save().unwrap().animals.owned[0];
    assert_eq!(fighter.stamina, 5);
}

#[test]
fn repository_failure_leaves_the_snapshot_untouched() {
    let fail = Arc::new(AtomicBool::new(false));
    let repo = FailingRepository {
        inner: InMemorySaveRepository::new(),
        fail: fail.clone(),
    };
    let mut session = Session::new(
        common::peaceful_configs(),
        repo,
        Box::new(FixedClock::new(common::FIXED_NOW)),
    )
    .unwrap();
    session.create_slot(None).unwrap();

    fail.store(true, Ordering::SeqCst);
    assert!(session.draw_lobby_doors().is_err());

    let save = session.save().unwrap();
    assert!(save.progress.last_lobby_draw.is_empty());
    assert_eq!(save.progress.turn, 0);

    fail.store(false, Ordering::SeqCst);
    let drawn = session.draw_lobby_doors().unwrap();
    assert!(!drawn.is_empty());
}

/// Builds a session with one owned animal and an active single-enemy
/// encounter, sweeping seeds until a door spawns one.
fn encounter_session(configs: doors_core::GameConfigs) -> Session<InMemorySaveRepository> {
    for seed in 0..200u32 {
        let repo = InMemorySaveRepository::new();
        let now = Timestamp::from(common::FIXED_NOW);
        let mut save = SaveGame::template(
            "slot-battle",
            seed,
            configs.weapons.iter().map(WeaponState::from_config).collect(),
            Vec::new(),
            configs.medal_drop_rate,
            now,
        );
        save.animals
            .owned
            .push(AnimalInstance::from_config(&configs.animals[0]));
        repo.save(&save).unwrap();
        repo.save_slots(&[SaveSlotMeta {
            id: "slot-battle".to_string(),
            name: "Battaglia".to_string(),
            created_at: common::FIXED_NOW.to_string(),
            updated_at: common::FIXED_NOW.to_string(),
        }])
        .unwrap();
        repo.set_active(Some("slot-battle")).unwrap();

        let mut session = Session::new(
            configs.clone(),
            repo,
            Box::new(FixedClock::new(common::FIXED_NOW)),
        )
        .unwrap();
        let drawn = session.draw_lobby_doors().unwrap();
        if let ActionResult::Encounter { enemies, .. } = session.open_door(drawn[0]).unwrap() {
            assert_eq!(enemies.len(), 1);
            return session;
        }
    }
    panic!("no seed in the sweep produced an encounter");
}

struct FailingRepository {
    inner: InMemorySaveRepository,
    fail: Arc<AtomicBool>,
}

impl SaveRepository for FailingRepository {
    fn load(&self, slot_id: &str) -> Result<Option<SaveGame>, RepositoryError> {
        self.inner.load(slot_id)
    }

    fn save(&self, save: &SaveGame) -> Result<(), RepositoryError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(RepositoryError::Serialization("injected failure".into()));
        }
        self.inner.save(save)
    }

    fn delete(&self, slot_id: &str) -> Result<(), RepositoryError> {
        self.inner.delete(slot_id)
    }

    fn list_slots(&self) -> Result<Vec<SaveSlotMeta>, RepositoryError> {
        self.inner.list_slots()
    }

    fn save_slots(&self, slots: &[SaveSlotMeta]) -> Result<(), RepositoryError> {
        self.inner.save_slots(slots)
    }

    fn active_slot(&self) -> Result<Option<String>, RepositoryError> {
        self.inner.active_slot()
    }

    fn set_active(&self, slot_id: Option<&str>) -> Result<(), RepositoryError> {
        self.inner.set_active(slot_id)
    }
}
