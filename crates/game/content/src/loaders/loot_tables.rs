//! Per-door loot table loader.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use doors_core::{DoorType, LootTableEntry, Resource};
use serde::Deserialize;

use crate::loaders::{LoadResult, read_file};
use crate::normalize::{normalize_door_key, normalize_loot_key, normalize_quantity};

#[derive(Deserialize)]
struct LootTablesFile {
    loottables: Vec<DoorTableRaw>,
}

#[derive(Deserialize)]
struct DoorTableRaw {
    porta: String,
    ricompense: Vec<LootEntryRaw>,
}

#[derive(Deserialize)]
struct LootEntryRaw {
    loot: Option<String>,
    peso: f64,
    quantita: Option<String>,
}

/// Loader for the weighted door loot tables. A missing `loot` field is a
/// blank slot; quantity strings parse into typed ranges up front.
pub struct LootTableLoader;

impl LootTableLoader {
    pub fn load(path: &Path) -> LoadResult<BTreeMap<DoorType, Vec<LootTableEntry>>> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("in {}", path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<BTreeMap<DoorType, Vec<LootTableEntry>>> {
        let file: LootTablesFile =
            serde_json::from_str(content).context("failed to parse loot tables JSON")?;

        let mut tables = BTreeMap::new();
        for table in file.loottables {
            let door = normalize_door_key(&table.porta)
                .with_context(|| format!("invalid loot table door \"{}\"", table.porta))?;
            let entries = table
                .ricompense
                .into_iter()
                .map(|raw| {
                    let resource = match &raw.loot {
                        Some(label) => normalize_loot_key(label).with_context(|| {
                            format!("invalid loot \"{label}\" in {} table", door.as_str())
                        })?,
                        None => Resource::None,
                    };
                    Ok(LootTableEntry {
                        resource,
                        weight: raw.peso,
                        quantity: normalize_quantity(raw.quantita.as_deref()),
                    })
                })
                .collect::<LoadResult<Vec<_>>>()?;
            tables.insert(door, entries);
        }
        Ok(tables)
    }
}
