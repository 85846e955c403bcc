//! House furniture blueprint loader.

use std::path::Path;

use anyhow::Context;
use doors_core::{BonusAmount, HouseBlueprint, HouseBonus};
use serde::Deserialize;

use crate::loaders::{LoadResult, read_file};
use crate::normalize::{normalize_bonus_kind, normalize_number};

#[derive(Deserialize)]
struct HouseFile {
    arredamento: Vec<HouseObjectRaw>,
}

#[derive(Deserialize)]
struct HouseObjectRaw {
    id: serde_json::Value,
    nome: String,
    pezzi: serde_json::Value,
    bonus: BonusRaw,
}

#[derive(Deserialize)]
struct BonusRaw {
    tipo: String,
    quantita: serde_json::Value,
    cooldown: serde_json::Value,
}

/// Loader for furniture blueprints. Bonus amounts arrive as a number or an
/// array of numbers (per-slot splits).
pub struct HouseLoader;

impl HouseLoader {
    pub fn load(path: &Path) -> LoadResult<Vec<HouseBlueprint>> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("in {}", path.display()))
    }

    pub fn parse(content: &str) -> LoadResult<Vec<HouseBlueprint>> {
        let file: HouseFile =
            serde_json::from_str(content).context("failed to parse house config JSON")?;
        file.arredamento
            .into_iter()
            .map(|raw| {
                let context = || format!("invalid furniture entry \"{}\"", raw.nome);
                Ok(HouseBlueprint {
                    id: normalize_number(&raw.id).with_context(context)? as u32,
                    name: raw.nome.clone(),
                    pieces_needed: normalize_number(&raw.pezzi).with_context(context)? as u32,
                    bonus: HouseBonus {
                        kind: normalize_bonus_kind(&raw.bonus.tipo).with_context(context)?,
                        amount: Self::amount(&raw.bonus.quantita).with_context(context)?,
                        cooldown: normalize_number(&raw.bonus.cooldown).with_context(context)?
                            as u32,
                    },
                })
            })
            .collect()
    }

    fn amount(value: &serde_json::Value) -> LoadResult<BonusAmount> {
        match value {
            serde_json::Value::Array(values) => {
                let split = values
                    .iter()
                    .map(|entry| Ok(normalize_number(entry)? as i64))
                    .collect::<LoadResult<Vec<_>>>()?;
                Ok(BonusAmount::Split(split))
            }
            other => Ok(BonusAmount::Flat(normalize_number(other)? as i64)),
        }
    }
}
