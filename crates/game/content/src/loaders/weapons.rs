//! Weapon roster loader.

use std::path::Path;

use anyhow::Context;
use doors_core::WeaponConfig;
use serde::Deserialize;

use crate::loaders::{LoadResult, read_file};
use crate::normalize::{normalize_ammo_kind, normalize_number, normalize_weapon_name};

#[derive(Deserialize)]
struct WeaponsFile {
    armi: Vec<WeaponRaw>,
}

#[derive(Deserialize)]
struct WeaponRaw {
    nome: String,
    munizioni: String,
    danno_per_colpo: serde_json::Value,
    capacita_massima: serde_json::Value,
}

/// Loader for the weapon roster JSON file. The raw display label is kept;
/// the canonical name and ammo kind come from the alias tables.
pub struct WeaponLoader;

impl WeaponLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<WeaponConfig>> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("in {}", path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<Vec<WeaponConfig>> {
        let file: WeaponsFile =
            serde_json::from_str(content).context("failed to parse weapon roster JSON")?;
        file.armi
            .into_iter()
            .map(|raw| {
                let context = || format!("invalid weapon entry \"{}\"", raw.nome);
                Ok(WeaponConfig {
                    name: normalize_weapon_name(&raw.nome).with_context(context)?,
                    display_name: raw.nome.clone(),
                    ammo: normalize_ammo_kind(&raw.munizioni).with_context(context)?,
                    damage_per_shot: normalize_number(&raw.danno_per_colpo)
                        .with_context(context)? as u32,
                    max_ammo: normalize_number(&raw.capacita_massima).with_context(context)?
                        as u32,
                })
            })
            .collect()
    }
}
