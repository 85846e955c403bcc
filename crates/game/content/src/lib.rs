//! Boundary layer between raw config data and the typed game core.
//!
//! `doors-content` parses the JSON config files (animal roster, weapon
//! roster, per-door loot tables, furniture blueprints) and resolves their
//! mixed Italian/English identifiers into `doors-core` types. All alias
//! resolution lives in [`normalize`]; unresolvable identifiers fail the
//! load with a typed [`AliasError`] instead of a guess.

pub mod loaders;
pub mod normalize;

pub use loaders::{
    AnimalLoader, DEFAULT_MEDAL_DROP_RATE, HouseLoader, LoadResult, LootTableLoader, WeaponLoader,
    load_configs,
};
pub use normalize::{
    AliasError, normalize_ammo_kind, normalize_bonus_kind, normalize_boolean, normalize_door_key,
    normalize_loot_key, normalize_number, normalize_quantity, normalize_size,
    normalize_weapon_name,
};
