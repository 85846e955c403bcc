//! Player session: slot lifecycle, action dispatch, and view projections.
//!
//! A [`Session`] owns the loaded configs, a [`SaveRepository`], a [`Clock`],
//! the in-memory snapshot of the active slot, and the projections a frontend
//! reads between actions (pending reward, battle result, weapon lockout).
//! Every action runs against a working copy of the snapshot and is persisted
//! before the copy replaces the live one, so a repository failure leaves the
//! session exactly where it was.

use std::path::Path;

use doors_core::animal::{life_cap, stamina_cap};
use doors_core::{
    AcknowledgeMedalHighlight, Action, ActionResult, DoorType, DrawLobbyDoors, FeedAnimal,
    GameConfigs, GameEngine, GameEnv, GrowAnimal, HouseBlueprint, HouseObject, OpenDoor,
    PendingReward, ResolveAnimalDuel, ResolveWeaponAttack, SaveGame, WeaponName, WeaponState,
    compute_available,
};

use crate::clock::Clock;
use crate::error::SessionError;
use crate::repository::{SaveRepository, SaveSlotMeta};

const DEFAULT_SLOT_NAME: &str = "Salvataggio";

/// How the last battle ended, kept until the frontend acknowledges it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BattleResult {
    Victory,
    Defeat,
}

pub struct Session<R: SaveRepository> {
    configs: GameConfigs,
    repository: R,
    clock: Box<dyn Clock>,
    slots: Vec<SaveSlotMeta>,
    active_slot_id: Option<String>,
    save: Option<SaveGame>,
    pending_reward: Option<PendingReward>,
    battle_result: Option<BattleResult>,
    weapons_phase_locked: bool,
}

impl<R: SaveRepository> Session<R> {
    /// Opens a session over existing storage. The active slot's save, if it
    /// loads, becomes the live snapshot after a config sync.
    pub fn new(
        configs: GameConfigs,
        repository: R,
        clock: Box<dyn Clock>,
    ) -> Result<Self, SessionError> {
        let slots = repository.list_slots()?;
        let active_slot_id = repository.active_slot()?;
        let save = match &active_slot_id {
            Some(slot_id) => repository.load(slot_id)?.map(|mut save| {
                sync_save_with_configs(&mut save, &configs);
                save
            }),
            None => None,
        };

        Ok(Self {
            configs,
            repository,
            clock,
            slots,
            active_slot_id: save.as_ref().map(|s| s.meta.slot_id.clone()),
            save,
            pending_reward: None,
            battle_result: None,
            weapons_phase_locked: false,
        })
    }

    /// Loads the config bundle from a directory of game data files and
    /// opens a session over it. A loader or alias failure aborts here,
    /// before any storage is touched.
    pub fn from_config_dir(
        dir: &Path,
        repository: R,
        clock: Box<dyn Clock>,
    ) -> Result<Self, SessionError> {
        let configs = doors_content::load_configs(dir)?;
        Self::new(configs, repository, clock)
    }

    pub fn configs(&self) -> &GameConfigs {
        &self.configs
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn save(&self) -> Option<&SaveGame> {
        self.save.as_ref()
    }

    pub fn slots(&self) -> &[SaveSlotMeta] {
        &self.slots
    }

    pub fn active_slot_id(&self) -> Option<&str> {
        self.active_slot_id.as_deref()
    }

    pub fn pending_reward(&self) -> Option<&PendingReward> {
        self.pending_reward.as_ref()
    }

    pub fn battle_result(&self) -> Option<BattleResult> {
        self.battle_result
    }

    pub fn weapons_phase_locked(&self) -> bool {
        self.weapons_phase_locked
    }

    // ------------------------------------------------------------------
    // Slot lifecycle
    // ------------------------------------------------------------------

    /// Ensures there is a usable active slot, creating one when storage is
    /// empty or the recorded active save fails to load.
    pub fn bootstrap(&mut self) -> Result<&SaveGame, SessionError> {
        if self.save.is_some() {
            return self.save.as_ref().ok_or(SessionError::NoActiveSlot);
        }
        let slot_id = self.create_slot(Some("Nuovo salvataggio"))?;
        self.load_slot(&slot_id)?;
        self.save.as_ref().ok_or(SessionError::NoActiveSlot)
    }

    /// Creates a new slot from the config template, activates it, and makes
    /// it the live snapshot. Returns the new slot id.
    pub fn create_slot(&mut self, name: Option<&str>) -> Result<String, SessionError> {
        self.create_slot_with(self.fresh_slot_id(), name, rand::random())
    }

    /// [`Session::create_slot`] with an explicit id and seed, for callers
    /// that replay or script sessions.
    pub fn create_slot_with(
        &mut self,
        slot_id: String,
        name: Option<&str>,
        rng_seed: u32,
    ) -> Result<String, SessionError> {
        let now = self.clock.now();
        let weapons: Vec<WeaponState> = self
            .configs
            .weapons
            .iter()
            .map(WeaponState::from_config)
            .collect();
        let house_objects = build_house_objects(&self.configs.house, &[]);
        let save = SaveGame::template(
            slot_id.clone(),
            rng_seed,
            weapons,
            house_objects,
            self.configs.medal_drop_rate,
            now,
        );

        self.repository.save(&save)?;
        let mut slots = self.repository.list_slots()?;
        slots.push(SaveSlotMeta {
            id: slot_id.clone(),
            name: name.unwrap_or(DEFAULT_SLOT_NAME).to_string(),
            created_at: save.meta.created_at.as_str().to_string(),
            updated_at: save.meta.updated_at.as_str().to_string(),
        });
        self.repository.save_slots(&slots)?;
        self.repository.set_active(Some(&slot_id))?;

        self.slots = slots;
        self.active_slot_id = Some(slot_id.clone());
        self.save = Some(save);
        self.clear_projections();
        Ok(slot_id)
    }

    /// Switches the live snapshot to another slot.
    pub fn load_slot(&mut self, slot_id: &str) -> Result<(), SessionError> {
        let mut save = self
            .repository
            .load(slot_id)?
            .ok_or_else(|| SessionError::SlotNotFound(slot_id.to_string()))?;
        sync_save_with_configs(&mut save, &self.configs);
        self.repository.set_active(Some(slot_id))?;
        self.active_slot_id = Some(slot_id.to_string());
        self.save = Some(save);
        self.clear_projections();
        Ok(())
    }

    /// Copies a slot under a fresh id, seed, and deduplicated name. The
    /// active slot does not change. Returns the new slot id.
    pub fn duplicate_slot(&mut self, slot_id: &str) -> Result<String, SessionError> {
        let mut source = self
            .repository
            .load(slot_id)?
            .ok_or_else(|| SessionError::SlotNotFound(slot_id.to_string()))?;
        sync_save_with_configs(&mut source, &self.configs);

        let new_slot_id = self.fresh_slot_id();
        let now = self.clock.now();
        let slots = self.repository.list_slots()?;
        let base_name = slots
            .iter()
            .find(|slot| slot.id == slot_id)
            .map(|slot| format!("{} (Copia)", slot.name))
            .unwrap_or_else(|| format!("{DEFAULT_SLOT_NAME} (Copia)"));
        let name = dedupe_slot_name(&slots, &base_name);

        source.meta.slot_id = new_slot_id.clone();
        source.meta.created_at = now.clone();
        source.meta.updated_at = now.clone();
        source.meta.rng_seed = rand::random();

        self.repository.save(&source)?;
        let mut slots = slots;
        slots.push(SaveSlotMeta {
            id: new_slot_id.clone(),
            name,
            created_at: now.as_str().to_string(),
            updated_at: now.as_str().to_string(),
        });
        self.repository.save_slots(&slots)?;
        self.slots = slots;
        Ok(new_slot_id)
    }

    pub fn rename_slot(&mut self, slot_id: &str, name: &str) -> Result<(), SessionError> {
        self.repository.rename_slot(slot_id, name)?;
        self.slots = self.repository.list_slots()?;
        Ok(())
    }

    /// Deletes a slot's save and index entry. Deleting the active slot
    /// clears the live snapshot.
    pub fn delete_slot(&mut self, slot_id: &str) -> Result<(), SessionError> {
        self.repository.delete(slot_id)?;
        let slots: Vec<SaveSlotMeta> = self
            .repository
            .list_slots()?
            .into_iter()
            .filter(|slot| slot.id != slot_id)
            .collect();
        self.repository.save_slots(&slots)?;
        self.slots = slots;

        if self.active_slot_id.as_deref() == Some(slot_id) {
            self.repository.set_active(None)?;
            self.active_slot_id = None;
            self.save = None;
            self.clear_projections();
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Actions
    // ------------------------------------------------------------------

    /// Draws up to three doors for the next turn and clears any stale
    /// battle carry-over.
    pub fn draw_lobby_doors(&mut self) -> Result<Vec<DoorType>, SessionError> {
        let result = self.drive(Action::DrawLobbyDoors(DrawLobbyDoors))?;
        self.pending_reward = None;
        self.weapons_phase_locked = false;
        match result {
            ActionResult::LobbyDraw(doors) => Ok(doors),
            _ => Ok(Vec::new()),
        }
    }

    pub fn open_door(&mut self, door: DoorType) -> Result<ActionResult, SessionError> {
        let result = self.drive(Action::OpenDoor(OpenDoor { door }))?;
        match &result {
            ActionResult::Reward(reward) => {
                self.pending_reward = Some(reward.clone());
                self.battle_result = Some(BattleResult::Victory);
                self.weapons_phase_locked = false;
            }
            ActionResult::Encounter { .. } => {
                self.pending_reward = None;
                self.battle_result = None;
                self.weapons_phase_locked = false;
            }
            _ => {}
        }
        Ok(result)
    }

    pub fn resolve_weapon_attack(
        &mut self,
        weapon: WeaponName,
        ammo_requested: i64,
    ) -> Result<ActionResult, SessionError> {
        let result = self.drive(Action::ResolveWeaponAttack(ResolveWeaponAttack {
            weapon,
            ammo_requested,
        }))?;
        match &result {
            ActionResult::BattleProgress { weapons_locked, .. } => {
                self.weapons_phase_locked = *weapons_locked;
            }
            ActionResult::Victory(_) => {
                self.battle_result = Some(BattleResult::Victory);
                self.weapons_phase_locked = false;
            }
            _ => {}
        }
        Ok(result)
    }

    pub fn resolve_animal_duel(
        &mut self,
        animal_index: usize,
    ) -> Result<ActionResult, SessionError> {
        let result = self.drive(Action::ResolveAnimalDuel(ResolveAnimalDuel { animal_index }))?;
        match &result {
            ActionResult::Victory(reward) => {
                if let Some(reward) = reward {
                    self.pending_reward = Some(reward.clone());
                }
                self.battle_result = Some(BattleResult::Victory);
                self.weapons_phase_locked = false;
            }
            ActionResult::Defeat => {
                self.battle_result = Some(BattleResult::Defeat);
            }
            _ => {}
        }
        Ok(result)
    }

    pub fn feed_animal(&mut self, animal_index: usize) -> Result<ActionResult, SessionError> {
        self.drive(Action::FeedAnimal(FeedAnimal { animal_index }))
    }

    pub fn grow_animal(&mut self, animal_index: usize) -> Result<ActionResult, SessionError> {
        self.drive(Action::GrowAnimal(GrowAnimal { animal_index }))
    }

    pub fn acknowledge_medal_highlight(&mut self) -> Result<ActionResult, SessionError> {
        self.drive(Action::AcknowledgeMedalHighlight(AcknowledgeMedalHighlight))
    }

    /// Hands over the pending reward, if any, clearing the battle-result
    /// flag with it. Purely a projection: the snapshot already holds the
    /// loot, so calling twice yields `None`.
    pub fn collect_reward(&mut self) -> Option<PendingReward> {
        let reward = self.pending_reward.take();
        if reward.is_some() {
            self.battle_result = None;
        }
        reward
    }

    pub fn reset_battle_result(&mut self) {
        self.battle_result = None;
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    /// Runs an action on a working copy and persists before committing it.
    fn drive(&mut self, action: Action) -> Result<ActionResult, SessionError> {
        let save = self.save.as_ref().ok_or(SessionError::NoActiveSlot)?;
        let mut next = save.clone();
        let env = GameEnv {
            configs: &self.configs,
            now: self.clock.now(),
        };
        let result = GameEngine::execute(&mut next, &env, &action)?;
        if !matches!(result, ActionResult::Ignored) {
            self.persist(&next)?;
            self.save = Some(next);
        }
        Ok(result)
    }

    /// Writes the snapshot and bumps its slot's `updated_at` in the index.
    fn persist(&mut self, save: &SaveGame) -> Result<(), SessionError> {
        self.repository.save(save)?;
        let mut slots = self.repository.list_slots()?;
        for slot in &mut slots {
            if slot.id == save.meta.slot_id {
                slot.updated_at = save.meta.updated_at.as_str().to_string();
            }
        }
        self.repository.save_slots(&slots)?;
        self.slots = slots;
        Ok(())
    }

    fn clear_projections(&mut self) {
        self.pending_reward = None;
        self.battle_result = None;
        self.weapons_phase_locked = false;
    }

    fn fresh_slot_id(&self) -> String {
        loop {
            let candidate = format!("slot-{:08x}", rand::random::<u32>());
            if !self.slots.iter().any(|slot| slot.id == candidate) {
                return candidate;
            }
        }
    }
}

fn dedupe_slot_name(slots: &[SaveSlotMeta], base_name: &str) -> String {
    let taken = |candidate: &str| {
        slots
            .iter()
            .any(|slot| slot.name.eq_ignore_ascii_case(candidate))
    };
    if !taken(base_name) {
        return base_name.to_string();
    }
    let mut suffix = 2;
    loop {
        let candidate = format!("{base_name} {suffix}");
        if !taken(&candidate) {
            return candidate;
        }
        suffix += 1;
    }
}

fn build_house_objects(blueprints: &[HouseBlueprint], existing: &[HouseObject]) -> Vec<HouseObject> {
    blueprints
        .iter()
        .map(|blueprint| {
            let persisted = existing.iter().find(|object| object.id == blueprint.id);
            HouseObject {
                id: blueprint.id,
                name: blueprint.name.clone(),
                pieces_needed: blueprint.pieces_needed,
                pieces_owned: persisted.map(|object| object.pieces_owned).unwrap_or(0),
                unlocked: persisted.map(|object| object.unlocked).unwrap_or(false),
                bonus: blueprint.bonus.clone(),
                turns_to_next_bonus: persisted.and_then(|object| object.turns_to_next_bonus),
            }
        })
        .collect()
}

/// Reconciles a loaded save against the current configs: the weapon roster
/// and furniture list follow config order (new entries appear locked),
/// animal stats clamp to their caps, the available pool is recomputed, and
/// medal entries exist for every door.
fn sync_save_with_configs(save: &mut SaveGame, configs: &GameConfigs) {
    let weapons: Vec<WeaponState> = configs
        .weapons
        .iter()
        .map(|config| {
            save.weapons
                .iter()
                .find(|weapon| weapon.name == config.name)
                .copied()
                .unwrap_or_else(|| WeaponState::from_config(config))
        })
        .collect();
    save.weapons = weapons;

    save.house.objects = build_house_objects(&configs.house, &save.house.objects);

    for animal in &mut save.animals.owned {
        if let Some(config) = configs.animal(animal.config_id) {
            animal.life = animal.life.min(life_cap(config, animal.size));
            animal.stamina = animal.stamina.min(stamina_cap(config, animal.size));
        }
    }

    let pool = if save.progress.available_pool.is_empty() {
        DoorType::all()
    } else {
        save.progress.available_pool.clone()
    };
    save.progress.available_pool = compute_available(&pool, &save.progress.blocked_doors);

    for door in DoorType::all() {
        save.medals.entries.entry(door).or_default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use doors_core::{
        AmmoKind, AnimalConfig, AnimalInstance, BonusAmount, BonusKind, HouseBonus, Size,
        Timestamp, WeaponConfig,
    };
    use std::collections::BTreeMap;

    fn configs() -> GameConfigs {
        GameConfigs {
            animals: vec![AnimalConfig {
                id: 1,
                kind: "Lupo".to_string(),
                life: 40,
                damage: 10,
                attack_speed: 4,
                size: Size::Large,
                stamina_max: 20,
                upgradable_armor: false,
                growth_food_cost: 6,
            }],
            weapons: vec![
                WeaponConfig {
                    name: WeaponName::Pistol,
                    display_name: "Pistola".to_string(),
                    ammo: AmmoKind::Bullets,
                    damage_per_shot: 5,
                    max_ammo: 12,
                },
                WeaponConfig {
                    name: WeaponName::Shotgun,
                    display_name: "Fucile a pompa".to_string(),
                    ammo: AmmoKind::Shells,
                    damage_per_shot: 8,
                    max_ammo: 2,
                },
            ],
            loot_tables: BTreeMap::new(),
            house: vec![HouseBlueprint {
                id: 1,
                name: "Poltrona".to_string(),
                pieces_needed: 4,
                bonus: HouseBonus {
                    kind: BonusKind::Coins,
                    amount: BonusAmount::Flat(10),
                    cooldown: 5,
                },
            }],
            medal_drop_rate: 0.002,
        }
    }

    fn template(configs: &GameConfigs) -> SaveGame {
        SaveGame::template(
            "slot-test",
            7,
            configs
                .weapons
                .iter()
                .map(WeaponState::from_config)
                .collect(),
            build_house_objects(&configs.house, &[]),
            configs.medal_drop_rate,
            Timestamp::from("2024-01-01T00:00:00.000Z"),
        )
    }

    #[test]
    fn sync_adds_missing_weapons_in_config_order() {
        let configs = configs();
        let mut save = template(&configs);
        save.weapons.retain(|weapon| weapon.name == WeaponName::Shotgun);
        save.weapons[0].ammo = 2;

        sync_save_with_configs(&mut save, &configs);

        assert_eq!(save.weapons.len(), 2);
        assert_eq!(save.weapons[0].name, WeaponName::Pistol);
        assert!(save.weapons[0].unlocked);
        assert_eq!(save.weapons[1].name, WeaponName::Shotgun);
        assert_eq!(save.weapons[1].ammo, 2);
    }

    #[test]
    fn sync_keeps_house_progress_and_refreshes_blueprint_fields() {
        let configs = configs();
        let mut save = template(&configs);
        save.house.objects[0].pieces_owned = 3;
        save.house.objects[0].name = "stale".to_string();

        sync_save_with_configs(&mut save, &configs);

        assert_eq!(save.house.objects[0].pieces_owned, 3);
        assert_eq!(save.house.objects[0].name, "Poltrona");
    }

    #[test]
    fn sync_clamps_animal_stats_to_caps() {
        let configs = configs();
        let mut save = template(&configs);
        let config = &configs.animals[0];
        let mut instance = AnimalInstance::from_config(config);
        instance.life = 999;
        instance.stamina = 999;
        save.animals.owned.push(instance);

        sync_save_with_configs(&mut save, &configs);

        assert_eq!(save.animals.owned[0].life, 40);
        assert_eq!(save.animals.owned[0].stamina, 20);
    }

    #[test]
    fn sync_restores_an_empty_pool() {
        let configs = configs();
        let mut save = template(&configs);
        save.progress.available_pool.clear();

        sync_save_with_configs(&mut save, &configs);

        assert_eq!(save.progress.available_pool, DoorType::all());
    }

    #[test]
    fn dedupe_slot_name_is_case_insensitive() {
        let slots = vec![
            SaveSlotMeta {
                id: "a".to_string(),
                name: "salvataggio (copia)".to_string(),
                created_at: String::new(),
                updated_at: String::new(),
            },
            SaveSlotMeta {
                id: "b".to_string(),
                name: "Salvataggio (Copia) 2".to_string(),
                created_at: String::new(),
                updated_at: String::new(),
            },
        ];
        assert_eq!(
            dedupe_slot_name(&slots, "Salvataggio (Copia)"),
            "Salvataggio (Copia) 3"
        );
    }
}
