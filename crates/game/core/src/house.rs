//! House furniture objects and the periodic bonus ticker.

/// What kind of resource a furniture bonus grants.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum BonusKind {
    Coins,
    Food,
    /// Per-slot ammo grant, one amount per ammo kind in canonical order.
    Ammo,
    /// Split grant: `[coins, food, ammo-each]`.
    Mixed,
}

/// Bonus magnitude. `Split` carries one amount per slot for `Ammo` and
/// `Mixed` bonuses.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum BonusAmount {
    Flat(i64),
    Split(Vec<i64>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct HouseBonus {
    pub kind: BonusKind,
    pub amount: BonusAmount,
    /// Turns between grants. Zero marks a one-shot bonus.
    pub cooldown: u32,
}

/// A furniture object assembled from collected pieces.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct HouseObject {
    pub id: u32,
    pub name: String,
    pub pieces_needed: u32,
    pub pieces_owned: u32,
    pub unlocked: bool,
    pub bonus: HouseBonus,
    /// `None` means the bonus is dormant (locked, or a spent one-shot).
    pub turns_to_next_bonus: Option<i64>,
}

/// A bonus that came due this turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BonusTrigger {
    pub object_id: u32,
    pub bonus: HouseBonus,
}

/// Result of ticking the furniture list one turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HouseTick {
    pub objects: Vec<HouseObject>,
    pub triggers: Vec<BonusTrigger>,
}

/// Advances every furniture countdown by one turn.
///
/// Only unlocked objects with a live counter tick. A counter reaching zero
/// emits a trigger and resets to the object's cooldown, or goes dormant when
/// the cooldown is zero. Trigger order follows the object list.
pub fn tick_house_bonuses(objects: &[HouseObject]) -> HouseTick {
    let mut triggers = Vec::new();
    let objects = objects
        .iter()
        .map(|object| {
            let counter = match object.turns_to_next_bonus {
                Some(counter) if object.unlocked => counter,
                _ => return object.clone(),
            };
            let next = counter - 1;
            let mut updated = object.clone();
            if next <= 0 {
                triggers.push(BonusTrigger {
                    object_id: object.id,
                    bonus: object.bonus.clone(),
                });
                updated.turns_to_next_bonus = if object.bonus.cooldown == 0 {
                    None
                } else {
                    Some(object.bonus.cooldown as i64)
                };
            } else {
                updated.turns_to_next_bonus = Some(next);
            }
            updated
        })
        .collect();
    HouseTick { objects, triggers }
}
