//! Config loaders for reading game data from JSON files.
//!
//! Each loader parses one raw file shape and normalizes every identifier
//! through [`crate::normalize`] before handing typed `doors-core` values to
//! the caller. Loaders fail fast: an unresolvable alias aborts the load
//! with the typed error in the chain.

pub mod animals;
pub mod house;
pub mod loot_tables;
pub mod weapons;

pub use animals::AnimalLoader;
pub use house::HouseLoader;
pub use loot_tables::LootTableLoader;
pub use weapons::WeaponLoader;

use std::path::Path;

use anyhow::Context;
use doors_core::GameConfigs;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Medal odds applied when the data ships no explicit rate.
pub const DEFAULT_MEDAL_DROP_RATE: f64 = 0.002;

pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))
}

/// Loads the full configuration bundle from a directory containing the
/// standard config files.
pub fn load_configs(dir: &Path) -> LoadResult<GameConfigs> {
    let animals = AnimalLoader::load(&dir.join("config_animali.json"))?;
    let weapons = WeaponLoader::load(&dir.join("config_armi.json"))?;
    let loot_tables = LootTableLoader::load(&dir.join("door_loot_tables.json"))?;
    let house = HouseLoader::load(&dir.join("config_arredamento.json"))?;

    Ok(GameConfigs {
        animals,
        weapons,
        loot_tables,
        house,
        medal_drop_rate: DEFAULT_MEDAL_DROP_RATE,
    })
}
