//! Typed game configuration. Produced at the boundary (the content crate)
//! and treated as immutable reference data by the engine.

use std::collections::BTreeMap;

use crate::animal::AnimalConfig;
use crate::door::DoorType;
use crate::house::HouseBonus;
use crate::loot::{AmmoKind, LootTableEntry};

/// The five weapon slots. Each is hard-wired to one ammo kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::EnumIter, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum WeaponName {
    #[strum(serialize = "shotgun")]
    Shotgun,
    #[strum(serialize = "blowgun")]
    Blowgun,
    #[strum(serialize = "grenadeLauncher")]
    GrenadeLauncher,
    #[strum(serialize = "simpleBow")]
    SimpleBow,
    #[strum(serialize = "pistol")]
    Pistol,
}

impl WeaponName {
    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }

    pub fn ammo_kind(&self) -> AmmoKind {
        match self {
            WeaponName::Shotgun => AmmoKind::Shells,
            WeaponName::Blowgun => AmmoKind::Darts,
            WeaponName::GrenadeLauncher => AmmoKind::Grenades,
            WeaponName::SimpleBow => AmmoKind::Arrows,
            WeaponName::Pistol => AmmoKind::Bullets,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct WeaponConfig {
    pub name: WeaponName,
    pub display_name: String,
    pub ammo: AmmoKind,
    pub damage_per_shot: u32,
    pub max_ammo: u32,
}

/// Furniture definition; owned pieces and counters live in the save.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct HouseBlueprint {
    pub id: u32,
    pub name: String,
    pub pieces_needed: u32,
    pub bonus: HouseBonus,
}

/// The full configuration bundle the engine runs against.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct GameConfigs {
    pub animals: Vec<AnimalConfig>,
    pub weapons: Vec<WeaponConfig>,
    pub loot_tables: BTreeMap<DoorType, Vec<LootTableEntry>>,
    pub house: Vec<HouseBlueprint>,
    pub medal_drop_rate: f64,
}

impl GameConfigs {
    pub fn animal(&self, id: u32) -> Option<&AnimalConfig> {
        self.animals.iter().find(|config| config.id == id)
    }

    pub fn weapon(&self, name: WeaponName) -> Option<&WeaponConfig> {
        self.weapons.iter().find(|config| config.name == name)
    }

    pub fn loot_table(&self, door: DoorType) -> Option<&[LootTableEntry]> {
        self.loot_tables.get(&door).map(Vec::as_slice)
    }
}
