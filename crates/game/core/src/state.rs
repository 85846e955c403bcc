//! The save-game aggregate: everything a slot persists between actions.

use std::collections::BTreeMap;

use strum::IntoEnumIterator;

use crate::animal::{AnimalInstance, EnemyInstance};
use crate::config::{WeaponConfig, WeaponName};
use crate::door::{BlockedDoor, DoorType};
use crate::env::Timestamp;
use crate::house::HouseObject;
use crate::loot::{AmmoKind, LootEntry};

/// Snapshot format version stamped into new saves.
pub const GAME_VERSION: &str = "1.0.0";

/// Door history keeps only the most recent entries.
pub const HISTORY_CAP: usize = 50;

/// Starting darts so the blowgun is usable from turn one.
const STARTING_DARTS: u32 = 8;

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct SaveMeta {
    pub slot_id: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub game_version: String,
    pub rng_seed: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Progress {
    pub doors_opened: u32,
    pub blocked_doors: Vec<BlockedDoor>,
    pub available_pool: Vec<DoorType>,
    pub last_lobby_draw: Vec<DoorType>,
    pub turn: u32,
}

/// Per-kind ammunition counts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct AmmoState {
    pub bullets: u32,
    pub shells: u32,
    pub arrows: u32,
    pub darts: u32,
    pub grenades: u32,
}

impl AmmoState {
    pub fn get(&self, kind: AmmoKind) -> u32 {
        match kind {
            AmmoKind::Bullets => self.bullets,
            AmmoKind::Shells => self.shells,
            AmmoKind::Arrows => self.arrows,
            AmmoKind::Darts => self.darts,
            AmmoKind::Grenades => self.grenades,
        }
    }

    pub fn get_mut(&mut self, kind: AmmoKind) -> &mut u32 {
        match kind {
            AmmoKind::Bullets => &mut self.bullets,
            AmmoKind::Shells => &mut self.shells,
            AmmoKind::Arrows => &mut self.arrows,
            AmmoKind::Darts => &mut self.darts,
            AmmoKind::Grenades => &mut self.grenades,
        }
    }

    /// True when every kind is spent. Gates the defeat condition.
    pub fn all_empty(&self) -> bool {
        AmmoKind::iter().all(|kind| self.get(kind) == 0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ArmorItem {
    pub id: String,
    pub tier: u32,
    pub durability: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Inventory {
    pub coins: u64,
    pub food: u64,
    pub ammo: AmmoState,
    pub armors: Vec<ArmorItem>,
    pub special_items: Vec<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct WeaponState {
    pub name: WeaponName,
    pub ammo: u32,
    pub unlocked: bool,
}

impl WeaponState {
    /// Fresh slot for a weapon config. Only the pistol starts unlocked.
    pub fn from_config(config: &WeaponConfig) -> Self {
        Self {
            name: config.name,
            ammo: 0,
            unlocked: config.name == WeaponName::Pistol,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct AnimalsState {
    pub owned: Vec<AnimalInstance>,
    pub bestiary_seen: Vec<u32>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct HouseState {
    pub objects: Vec<HouseObject>,
}

/// How a door-history entry was resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum HistoryResult {
    Victory,
    Defeat,
    Reward,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct DoorHistoryEntry {
    pub door: DoorType,
    pub result: HistoryResult,
    pub loot: Option<LootEntry>,
    pub timestamp: Timestamp,
}

/// The encounter currently in flight. `index` stays below `enemies.len()`
/// while the battle is active.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct BattleDoor {
    pub door: DoorType,
    pub enemies: Vec<EnemyInstance>,
    pub index: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct WeaponUse {
    pub name: WeaponName,
    pub shots: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct FallenAnimal {
    pub config_id: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct BattleState {
    pub active: bool,
    pub door: Option<BattleDoor>,
    /// Accumulates across the whole encounter, never reset mid-battle.
    pub used_weapons: Vec<WeaponUse>,
    /// Same lifetime as `used_weapons`.
    pub fallen_animals: Vec<FallenAnimal>,
    pub weapons_locked: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct MedalStatus {
    pub unlocked: bool,
    pub unlocked_at: Option<Timestamp>,
    pub highlight_until: Option<Timestamp>,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct MedalsState {
    pub entries: BTreeMap<DoorType, MedalStatus>,
    pub drop_rate: f64,
    pub highlighted: Option<DoorType>,
}

impl MedalsState {
    pub fn new(drop_rate: f64) -> Self {
        let entries = DoorType::iter()
            .map(|door| (door, MedalStatus::default()))
            .collect();
        Self {
            entries,
            drop_rate,
            highlighted: None,
        }
    }

    pub fn is_unlocked(&self, door: DoorType) -> bool {
        self.entries
            .get(&door)
            .map(|status| status.unlocked)
            .unwrap_or(false)
    }
}

/// Aggregate root for one save slot.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct SaveGame {
    pub meta: SaveMeta,
    pub progress: Progress,
    pub inventory: Inventory,
    pub weapons: Vec<WeaponState>,
    pub animals: AnimalsState,
    pub house: HouseState,
    pub door_history: Vec<DoorHistoryEntry>,
    pub battle_state: BattleState,
    pub medals: MedalsState,
}

impl SaveGame {
    /// Builds a fresh save for a new slot.
    pub fn template(
        slot_id: impl Into<String>,
        rng_seed: u32,
        weapons: Vec<WeaponState>,
        house_objects: Vec<HouseObject>,
        medal_drop_rate: f64,
        now: Timestamp,
    ) -> Self {
        Self {
            meta: SaveMeta {
                slot_id: slot_id.into(),
                created_at: now.clone(),
                updated_at: now,
                game_version: GAME_VERSION.to_string(),
                rng_seed,
            },
            progress: Progress {
                doors_opened: 0,
                blocked_doors: Vec::new(),
                available_pool: DoorType::all(),
                last_lobby_draw: Vec::new(),
                turn: 0,
            },
            inventory: Inventory {
                coins: 0,
                food: 0,
                ammo: AmmoState {
                    darts: STARTING_DARTS,
                    ..AmmoState::default()
                },
                armors: Vec::new(),
                special_items: Vec::new(),
            },
            weapons,
            animals: AnimalsState::default(),
            house: HouseState {
                objects: house_objects,
            },
            door_history: Vec::new(),
            battle_state: BattleState::default(),
            medals: MedalsState::new(medal_drop_rate),
        }
    }

    pub fn weapon(&self, name: WeaponName) -> Option<&WeaponState> {
        self.weapons.iter().find(|weapon| weapon.name == name)
    }

    pub fn weapon_mut(&mut self, name: WeaponName) -> Option<&mut WeaponState> {
        self.weapons.iter_mut().find(|weapon| weapon.name == name)
    }

    /// Appends a history entry, trimming the oldest past the cap.
    pub fn push_history(&mut self, entry: DoorHistoryEntry) {
        self.door_history.push(entry);
        if self.door_history.len() > HISTORY_CAP {
            let excess = self.door_history.len() - HISTORY_CAP;
            self.door_history.drain(..excess);
        }
    }

    /// Marks enemy kinds as seen, keeping first-seen order without
    /// duplicates.
    pub fn record_bestiary(&mut self, enemies: &[EnemyInstance]) {
        for enemy in enemies {
            if !self.animals.bestiary_seen.contains(&enemy.config_id) {
                self.animals.bestiary_seen.push(enemy.config_id);
            }
        }
    }
}
