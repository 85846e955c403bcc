//! Animal roster loader.

use std::path::Path;

use anyhow::Context;
use doors_core::AnimalConfig;
use serde::Deserialize;

use crate::loaders::{LoadResult, read_file};
use crate::normalize::{normalize_boolean, normalize_number, normalize_size};

#[derive(Deserialize)]
struct AnimalsFile {
    animali: Vec<AnimalRaw>,
}

/// One roster row as shipped: numbers may arrive as strings, booleans as
/// "si"/"no", the size as an Italian label.
#[derive(Deserialize)]
struct AnimalRaw {
    id: serde_json::Value,
    animale: String,
    vita: serde_json::Value,
    danno: serde_json::Value,
    velocita_di_attacco: serde_json::Value,
    eta: String,
    stamina_max: serde_json::Value,
    #[serde(default)]
    upgradable_armature: serde_json::Value,
    costo_crescita_cibo: serde_json::Value,
}

/// Loader for the animal roster JSON file.
pub struct AnimalLoader;

impl AnimalLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<AnimalConfig>> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("in {}", path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<Vec<AnimalConfig>> {
        let file: AnimalsFile =
            serde_json::from_str(content).context("failed to parse animal roster JSON")?;
        file.animali
            .into_iter()
            .map(|raw| {
                Self::normalize(&raw)
                    .with_context(|| format!("invalid animal entry \"{}\"", raw.animale))
            })
            .collect()
    }

    fn normalize(raw: &AnimalRaw) -> LoadResult<AnimalConfig> {
        Ok(AnimalConfig {
            id: normalize_number(&raw.id)? as u32,
            kind: raw.animale.clone(),
            life: normalize_number(&raw.vita)? as u32,
            damage: normalize_number(&raw.danno)? as u32,
            attack_speed: normalize_number(&raw.velocita_di_attacco)? as u32,
            size: normalize_size(&raw.eta)?,
            stamina_max: normalize_number(&raw.stamina_max)? as u32,
            upgradable_armor: normalize_boolean(&raw.upgradable_armature),
            growth_food_cost: normalize_number(&raw.costo_crescita_cibo)? as u32,
        })
    }
}
