//! Weighted loot tables and the reward roller.

use crate::door::DoorType;
use crate::rng::Rng;

/// Ammunition kinds, in the canonical slot order used by inventories and
/// ammo-split house bonuses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::EnumIter, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum AmmoKind {
    #[strum(serialize = "bullets")]
    Bullets,
    #[strum(serialize = "shells")]
    Shells,
    #[strum(serialize = "arrows")]
    Arrows,
    #[strum(serialize = "darts")]
    Darts,
    #[strum(serialize = "grenades")]
    Grenades,
}

impl AmmoKind {
    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }
}

/// What a loot table entry grants when selected.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Resource {
    Coins,
    Food,
    Armor,
    Ammo(AmmoKind),
    SpecialItem,
    /// A door medal. Already-owned medals degrade to no reward.
    Medal(DoorType),
    /// A furniture piece, either for a specific object or any incomplete one.
    HousePiece(Option<u32>),
    /// Explicit blank slot. Rolling it yields no reward.
    None,
}

/// Quantity attached to a loot entry. `One` is the implicit default for
/// entries that do not carry a quantity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Quantity {
    One,
    Fixed(u32),
    Range(u32, u32),
}

impl Quantity {
    /// Resolves to a concrete count. Only `Range` consumes an RNG draw.
    pub fn roll(&self, rng: &mut Rng) -> u32 {
        match *self {
            Quantity::One => 1,
            Quantity::Fixed(n) => n,
            Quantity::Range(low, high) => rng.next_int(low, high),
        }
    }
}

/// One weighted slot in a door's loot table.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct LootTableEntry {
    pub resource: Resource,
    pub weight: f64,
    pub quantity: Quantity,
}

/// A resolved loot grant.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct LootEntry {
    pub resource: Resource,
    pub qty: u32,
}

/// Rolls a reward from a weighted table.
///
/// The roll is uniform in `[0, total_weight)` and the walk selects the first
/// entry whose cumulative weight reaches it; a floating-point shortfall falls
/// back to the last entry. The selection draw happens before the quantity
/// draw, and no quantity draw happens at all when the selected resource is a
/// blank slot. Empty or zero-weight tables yield nothing.
pub fn roll_loot(table: &[LootTableEntry], rng: &mut Rng) -> Option<LootEntry> {
    let total: f64 = table.iter().map(|entry| entry.weight).sum();
    if table.is_empty() || total <= 0.0 {
        return None;
    }

    let roll = rng.next_float() * total;
    let mut cumulative = 0.0;
    let mut selected = table.last()?;
    for entry in table {
        cumulative += entry.weight;
        if roll <= cumulative {
            selected = entry;
            break;
        }
    }

    if selected.resource == Resource::None {
        return None;
    }
    let qty = selected.quantity.roll(rng);
    Some(LootEntry {
        resource: selected.resource.clone(),
        qty,
    })
}
