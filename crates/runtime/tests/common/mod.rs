//! Shared fixtures for runtime integration tests.
#![allow(dead_code)]

use std::collections::BTreeMap;

use doors_core::{
    AmmoKind, AnimalConfig, BonusAmount, BonusKind, DoorType, GameConfigs, HouseBlueprint,
    HouseBonus, LootTableEntry, Quantity, Resource, Size, WeaponConfig, WeaponName,
};
use doors_runtime::{FixedClock, InMemorySaveRepository, Session};

pub const FIXED_NOW: &str = "2024-06-01T12:00:00.000Z";

/// Configs with no animals: every opened door resolves as a reward, which
/// keeps scripted runs on a single code path.
pub fn peaceful_configs() -> GameConfigs {
    GameConfigs {
        animals: Vec::new(),
        weapons: weapon_roster(),
        loot_tables: coin_tables(),
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

/// Configs with a one-animal roster, so every encounter spawns exactly one
/// enemy and the blowgun one-shots it.
pub fn hostile_configs() -> GameConfigs {
    GameConfigs {
        animals: vec![AnimalConfig {
            id: 1,
            kind: "Lupo".to_string(),
            life: 30,
            damage: 4,
            attack_speed: 3,
            size: Size::Large,
            stamina_max: 20,
            upgradable_armor: false,
            growth_food_cost: 6,
        }],
        weapons: weapon_roster(),
        loot_tables: coin_tables(),
        house: Vec::new(),
        medal_drop_rate: 0.002,
    }
}

fn weapon_roster() -> Vec<WeaponConfig> {
    vec![
        WeaponConfig {
            name: WeaponName::Pistol,
            display_name: "Pistola".to_string(),
            ammo: AmmoKind::Bullets,
            damage_per_shot: 5,
            max_ammo: 12,
        },
        WeaponConfig {
            name: WeaponName::Blowgun,
            display_name: "Cerbottana".to_string(),
            ammo: AmmoKind::Darts,
            damage_per_shot: 1000,
            max_ammo: 8,
        },
    ]
}

fn coin_tables() -> BTreeMap<DoorType, Vec<LootTableEntry>> {
    DoorType::all()
        .into_iter()
        .map(|door| {
            (
                door,
                vec![LootTableEntry {
                    resource: Resource::Coins,
                    weight: 1.0,
                    quantity: Quantity::Fixed(5),
                }],
            )
        })
        .collect()
}

pub fn session(configs: GameConfigs) -> Session<InMemorySaveRepository> {
    Session::new(
        configs,
        InMemorySaveRepository::new(),
        Box::new(FixedClock::new(FIXED_NOW)),
    )
    .unwrap()
}
