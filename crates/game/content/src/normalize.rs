//! Alias normalization for raw config identifiers.
//!
//! The source data mixes Italian and English labels, emoji-prefixed door
//! names, and free-form furniture descriptions. Every resolver here maps a
//! raw string onto exactly one typed `doors-core` value or fails with a
//! typed [`AliasError`]; nothing downstream ever guesses.

use doors_core::{AmmoKind, BonusKind, DoorType, Quantity, Resource, Size, WeaponName};

/// An identifier the alias tables cannot resolve.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AliasError {
    #[error("unknown door type alias: {0}")]
    UnknownDoor(String),
    #[error("unknown loot alias: {0}")]
    UnknownLoot(String),
    #[error("unknown weapon alias: {0}")]
    UnknownWeapon(String),
    #[error("\"{0}\" is not a valid ammo kind")]
    NotAnAmmoKind(String),
    #[error("unknown bonus type alias: {0}")]
    UnknownBonusType(String),
    #[error("unknown size: {0}")]
    UnknownSize(String),
    #[error("unable to convert \"{0}\" to a number")]
    NotANumber(String),
}

/// Lowercases, trims, and collapses internal whitespace.
fn sanitize(value: &str) -> String {
    value
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Keeps only ascii alphanumerics. Furniture names carry no accents once
/// lowered, so this doubles as the accent-insensitive key.
fn furniture_key(value: &str) -> String {
    value
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}

const FURNITURE_NAMES: &[(&str, u32)] = &[
    ("poltrona", 1),
    ("poltrone", 1),
    ("mensola", 2),
    ("mensole", 2),
    ("tavolino", 3),
    ("tavolini", 3),
    ("sedia", 4),
    ("sedie", 4),
];

const FURNITURE_PREFIXES: &[&str] = &[
    "pezzi arredamento della casa",
    "pezzo arredamento della casa",
    "pezzi di arredamento",
    "pezzo di arredamento",
    "pezzi arredamento",
    "pezzo arredamento",
    "arredamento",
];

const FURNITURE_ARTICLES: &[&str] = &[
    "di", "del", "della", "dell'", "dei", "degli", "delle", "la", "il", "lo", "le", "gli", "i",
];

fn furniture_id(name: &str) -> Option<u32> {
    let key = furniture_key(name);
    FURNITURE_NAMES
        .iter()
        .find(|(alias, _)| furniture_key(alias) == key)
        .map(|(_, id)| *id)
}

/// Resolves furniture-piece loot descriptions: a bare prefix means "any
/// incomplete object", a named remainder targets one object when known.
fn furniture_loot(raw: &str) -> Option<Resource> {
    let base = sanitize(raw);

    for prefix in FURNITURE_PREFIXES {
        let Some(rest) = base.strip_prefix(prefix) else {
            continue;
        };
        let rest = rest.trim_start_matches(['-', ':', ' ']).trim();
        if rest.is_empty() {
            return Some(Resource::HousePiece(None));
        }
        let rest = FURNITURE_ARTICLES
            .iter()
            .find_map(|article| rest.strip_prefix(&format!("{article} ")))
            .unwrap_or(rest);
        return Some(Resource::HousePiece(furniture_id(rest)));
    }

    furniture_id(raw).map(|id| Resource::HousePiece(Some(id)))
}

fn door_alias(key: &str) -> Option<DoorType> {
    use DoorType::*;
    let door = match key {
        "\u{26aa} bianca" | "bianca" | "white" => White,
        "\u{26ab} nera" | "nera" | "black" => Black,
        "\u{1f534} rossa" | "rossa" | "red" => Red,
        "\u{1f7e0} arancione" | "arancione" | "orange" => Orange,
        "\u{1f7e1} gialla" | "gialla" | "yellow" => Yellow,
        "\u{1f49c} rosa" | "viola" | "rosa" | "purple" => Purple,
        "\u{1f535} blu" | "blu" | "blue" => Blue,
        "\u{1f7e6} azzurra" | "azzurra" | "lightblue" => LightBlue,
        "\u{1f7e4} marrone" | "marrone" | "brown" => Brown,
        "\u{1f749} lime" | "lime" => Lime,
        "\u{1f7e9} verde scuro" | "verde" | "verde scuro" | "green" => Green,
        "\u{2699}\u{fe0f} neutra" | "neutra" | "neutral" => Neutral,
        _ => return None,
    };
    Some(door)
}

/// Resolves a door label to its canonical type.
pub fn normalize_door_key(raw: &str) -> Result<DoorType, AliasError> {
    door_alias(&sanitize(raw)).ok_or_else(|| AliasError::UnknownDoor(raw.to_string()))
}

fn medal_alias(key: &str) -> Option<DoorType> {
    let color = key
        .strip_prefix("medaglietta ")
        .or_else(|| key.strip_prefix("medaglia "))
        .or_else(|| key.strip_prefix("badge "))?;
    door_alias(color)
}

/// Resolves a loot label to its canonical resource.
pub fn normalize_loot_key(raw: &str) -> Result<Resource, AliasError> {
    if let Some(furniture) = furniture_loot(raw) {
        return Ok(furniture);
    }

    let key = sanitize(raw);
    if let Some(door) = medal_alias(&key) {
        return Ok(Resource::Medal(door));
    }

    let resource = match key.as_str() {
        "monete" | "\u{1f4b0} monete" | "coins" => Resource::Coins,
        "cibo" | "\u{1f357} cibo" | "food" => Resource::Food,
        "armatura" | "armature" | "armor" => Resource::Armor,
        "proiettili" | "pallottole" | "bullets" => Resource::Ammo(AmmoKind::Bullets),
        "cartucce" | "shells" => Resource::Ammo(AmmoKind::Shells),
        "frecce" | "arrows" => Resource::Ammo(AmmoKind::Arrows),
        "dardi" | "darts" => Resource::Ammo(AmmoKind::Darts),
        "granata" | "granate" | "grenades" => Resource::Ammo(AmmoKind::Grenades),
        "oggetto speciale" | "speciale" | "special item" => Resource::SpecialItem,
        "nessuno" | "null" | "nessuna ricompensa" => Resource::None,
        _ => return Err(AliasError::UnknownLoot(raw.to_string())),
    };
    Ok(resource)
}

/// Resolves a weapon label to its canonical name.
pub fn normalize_weapon_name(raw: &str) -> Result<WeaponName, AliasError> {
    let name = match sanitize(raw).as_str() {
        "fucile a pompa" | "shotgun" => WeaponName::Shotgun,
        "cerbottana" | "blowgun" => WeaponName::Blowgun,
        "lanciagranate" | "grenade launcher" | "grenadelauncher" => WeaponName::GrenadeLauncher,
        "arco semplice" | "arco" | "simple bow" | "simplebow" => WeaponName::SimpleBow,
        "pistola" | "pistol" => WeaponName::Pistol,
        _ => return Err(AliasError::UnknownWeapon(raw.to_string())),
    };
    Ok(name)
}

/// Resolves an ammo label, rejecting loot that is not ammunition.
pub fn normalize_ammo_kind(raw: &str) -> Result<AmmoKind, AliasError> {
    match normalize_loot_key(raw) {
        Ok(Resource::Ammo(kind)) => Ok(kind),
        _ => Err(AliasError::NotAnAmmoKind(raw.to_string())),
    }
}

/// Resolves a furniture bonus type label.
pub fn normalize_bonus_kind(raw: &str) -> Result<BonusKind, AliasError> {
    let kind = match sanitize(raw).as_str() {
        "coins" | "monete" | "credits" => BonusKind::Coins,
        "food" | "cibo" => BonusKind::Food,
        "ammo" | "munizioni" => BonusKind::Ammo,
        "mixed" | "misto" => BonusKind::Mixed,
        _ => return Err(AliasError::UnknownBonusType(raw.to_string())),
    };
    Ok(kind)
}

/// Resolves an animal size label ("piccolo", "grande", ...).
pub fn normalize_size(raw: &str) -> Result<Size, AliasError> {
    let key = sanitize(raw);
    if key.contains("piccol") || key.contains("small") {
        Ok(Size::Small)
    } else if key.contains("grand") || key.contains("large") {
        Ok(Size::Large)
    } else {
        Err(AliasError::UnknownSize(raw.to_string()))
    }
}

/// Accepts JSON numbers, and numeric strings with either decimal separator.
pub fn normalize_number(value: &serde_json::Value) -> Result<f64, AliasError> {
    match value {
        serde_json::Value::Number(number) => number
            .as_f64()
            .ok_or_else(|| AliasError::NotANumber(number.to_string())),
        serde_json::Value::String(text) if !text.trim().is_empty() => text
            .trim()
            .replace(',', ".")
            .parse::<f64>()
            .map_err(|_| AliasError::NotANumber(text.clone())),
        other => Err(AliasError::NotANumber(other.to_string())),
    }
}

/// Truthy strings ("si", "yes", "1", ...), numbers, and booleans.
pub fn normalize_boolean(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Bool(flag) => *flag,
        serde_json::Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        serde_json::Value::String(text) => {
            matches!(sanitize(text).as_str(), "true" | "si" | "s\u{ec}" | "yes" | "1")
        }
        _ => false,
    }
}

/// Parses a quantity field: absent means one, `"low-high"` is an inclusive
/// range (swapped bounds normalize), a bare number is fixed, and anything
/// unparsable falls back to one.
pub fn normalize_quantity(raw: Option<&str>) -> Quantity {
    let Some(raw) = raw else {
        return Quantity::One;
    };
    let trimmed = raw.trim();
    if let Some((low, high)) = trimmed.split_once('-') {
        let (Ok(low), Ok(high)) = (low.trim().parse::<u32>(), high.trim().parse::<u32>()) else {
            return Quantity::One;
        };
        return Quantity::Range(low.min(high), low.max(high));
    }
    match trimmed.parse::<u32>() {
        Ok(value) => Quantity::Fixed(value),
        Err(_) => Quantity::One,
    }
}
