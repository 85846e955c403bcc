//! Door universe, blocked-door tracking, and the conflict engine.
//!
//! Opening a door can temporarily block other doors for a randomized number
//! of turns. The rules are a static table keyed by the opened door: either a
//! specific target with a duration range, or a wildcard that blocks N random
//! eligible doors. "Neutral" is the escape hatch — it can never be blocked,
//! so the available pool is never empty.

use strum::{EnumIter, IntoEnumIterator, IntoStaticStr};

use crate::rng::{Rng, RngError};

/// The 12 categorical door gateways. Declaration order is the canonical
/// universe order used by lobby pools and medal tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum DoorType {
    #[strum(serialize = "white")]
    White,
    #[strum(serialize = "black")]
    Black,
    #[strum(serialize = "red")]
    Red,
    #[strum(serialize = "orange")]
    Orange,
    #[strum(serialize = "yellow")]
    Yellow,
    #[strum(serialize = "purple")]
    Purple,
    #[strum(serialize = "blue")]
    Blue,
    #[strum(serialize = "lightBlue")]
    LightBlue,
    #[strum(serialize = "brown")]
    Brown,
    #[strum(serialize = "lime")]
    Lime,
    #[strum(serialize = "green")]
    Green,
    #[strum(serialize = "neutral")]
    Neutral,
}

impl DoorType {
    /// Canonical name, matching the serialized form (`"lightBlue"` etc.).
    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }

    /// Sum of the name's character codes. Mixed into per-door RNG stream
    /// seeds; must stay stable across versions.
    pub fn name_hash(&self) -> u32 {
        self.as_str().chars().map(|c| c as u32).sum()
    }

    /// The full door universe in canonical order.
    pub fn all() -> Vec<DoorType> {
        DoorType::iter().collect()
    }
}

/// A door temporarily removed from the available pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct BlockedDoor {
    pub door: DoorType,
    pub turns_left: u32,
}

/// Target side of a conflict rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConflictTarget {
    /// Block one specific door.
    Door(DoorType),
    /// Block `count` random eligible doors, chosen without replacement.
    Random { count: usize },
}

/// One conflict rule: a target plus an inclusive duration range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConflictRule {
    pub target: ConflictTarget,
    pub duration: (u32, u32),
}

const fn door_rule(door: DoorType, min: u32, max: u32) -> ConflictRule {
    ConflictRule {
        target: ConflictTarget::Door(door),
        duration: (min, max),
    }
}

const fn random_rule(count: usize, min: u32, max: u32) -> ConflictRule {
    ConflictRule {
        target: ConflictTarget::Random { count },
        duration: (min, max),
    }
}

/// Static conflict rules for the opened door.
pub fn conflict_rules(opened: DoorType) -> &'static [ConflictRule] {
    use DoorType::*;
    match opened {
        White => const { &[door_rule(Yellow, 1, 2)] },
        Black => const { &[door_rule(Orange, 3, 5), random_rule(2, 3, 5)] },
        Red => const { &[door_rule(Blue, 2, 4), door_rule(Lime, 2, 4)] },
        Orange => const { &[door_rule(Lime, 3, 5), door_rule(Green, 3, 5)] },
        Yellow => const { &[door_rule(White, 1, 3), door_rule(Yellow, 1, 1)] },
        Purple => const { &[door_rule(Green, 2, 3), door_rule(Brown, 2, 3)] },
        Blue => const { &[door_rule(Red, 3, 4), door_rule(Orange, 3, 4)] },
        LightBlue => const { &[door_rule(Green, 2, 3)] },
        Brown => const { &[door_rule(Orange, 3, 4), door_rule(Lime, 3, 4)] },
        Lime => const {
            &[
                door_rule(Red, 2, 4),
                door_rule(Blue, 2, 4),
                door_rule(LightBlue, 2, 4),
            ]
        },
        Green => const { &[door_rule(LightBlue, 2, 3), door_rule(Red, 2, 3)] },
        Neutral => const { &[door_rule(Black, 1, 1)] },
    }
}

/// Pool minus blocked doors. Neutral is always kept regardless of the block
/// list.
pub fn compute_available(pool: &[DoorType], blocked: &[BlockedDoor]) -> Vec<DoorType> {
    pool.iter()
        .copied()
        .filter(|door| *door == DoorType::Neutral || !blocked.iter().any(|b| b.door == *door))
        .collect()
}

/// Ticks every block down by one turn, dropping entries that reach zero.
pub fn decrement_blocks(blocked: &[BlockedDoor]) -> Vec<BlockedDoor> {
    blocked
        .iter()
        .filter(|entry| entry.turns_left > 1)
        .map(|entry| BlockedDoor {
            door: entry.door,
            turns_left: entry.turns_left - 1,
        })
        .collect()
}

/// Rolls a duration and merges the block, keeping the larger of old/new.
/// Neutral is never blocked. Existing entries keep their position; new
/// targets append in selection order.
fn block_door(
    target: DoorType,
    duration: (u32, u32),
    rng: &mut Rng,
    blocks: &mut Vec<BlockedDoor>,
) {
    if target == DoorType::Neutral {
        return;
    }
    let rolled = rng.next_int(duration.0, duration.1);
    match blocks.iter_mut().find(|entry| entry.door == target) {
        Some(entry) => {
            if rolled > entry.turns_left {
                entry.turns_left = rolled;
            }
        }
        None => blocks.push(BlockedDoor {
            door: target,
            turns_left: rolled,
        }),
    }
}

/// Applies the opened door's conflict rules on top of the existing blocks.
///
/// Wildcard rules select without replacement from the doors that are not the
/// opened door, not neutral, and not already chosen by this call; the count
/// is capped at the eligible pool's size. Each resolved target rolls its own
/// duration. The draw order (pick, then duration, per target) must not
/// change.
pub fn apply_conflicts(
    opened: DoorType,
    blocked: &[BlockedDoor],
    rng: &mut Rng,
) -> Result<Vec<BlockedDoor>, RngError> {
    let mut blocks: Vec<BlockedDoor> = blocked.to_vec();
    let mut already_selected: Vec<DoorType> = Vec::new();

    for rule in conflict_rules(opened) {
        match rule.target {
            ConflictTarget::Random { count } => {
                let mut eligible: Vec<DoorType> = DoorType::iter()
                    .filter(|door| {
                        *door != opened
                            && *door != DoorType::Neutral
                            && !already_selected.contains(door)
                    })
                    .collect();
                let count = count.min(eligible.len());
                for _ in 0..count {
                    let choice = *rng.pick_one(&eligible)?;
                    already_selected.push(choice);
                    eligible.retain(|door| *door != choice);
                    block_door(choice, rule.duration, rng, &mut blocks);
                }
            }
            ConflictTarget::Door(target) => {
                already_selected.push(target);
                block_door(target, rule.duration, rng, &mut blocks);
            }
        }
    }

    blocks.retain(|entry| entry.door != DoorType::Neutral);
    Ok(blocks)
}
