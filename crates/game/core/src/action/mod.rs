//! Action domain: one transition type per player action.
//!
//! Every state mutation flows through [`ActionTransition`]: `pre_validate`
//! inspects the snapshot before mutation and turns invalid requests into
//! defensive no-ops, `apply` mutates the snapshot and reports what happened.
//! Transitions draw randomness only from per-door derived streams, never
//! from ambient sources.
//!
//! # Module Structure
//!
//! - `lobby`: the turn-opening lobby draw
//! - `door`: opening a door (immediate reward or encounter)
//! - `combat`: weapon attacks and animal duels against the active encounter
//! - `husbandry`: feeding/growing animals and medal-highlight acknowledgment
//! - `rewards`: shared loot/progress/house-bonus application helpers

pub mod combat;
pub mod door;
pub mod husbandry;
pub mod lobby;
pub(crate) mod rewards;

pub use combat::{ResolveAnimalDuel, ResolveWeaponAttack};
pub use door::OpenDoor;
pub use husbandry::{AcknowledgeMedalHighlight, FeedAnimal, GrowAnimal};
pub use lobby::DrawLobbyDoors;

use crate::animal::EnemyInstance;
use crate::door::DoorType;
use crate::env::GameEnv;
use crate::loot::LootEntry;
use crate::rng::{Rng, RngError, turn_seed};
use crate::state::{FallenAnimal, SaveGame, WeaponUse};

/// Errors surfaced while applying an action.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum EngineError {
    #[error("rng failure: {0}")]
    Rng(#[from] RngError),
}

/// Reward summary surfaced after a resolved door.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct PendingReward {
    pub door: DoorType,
    pub loot: Option<LootEntry>,
    pub weapons_used: Vec<WeaponUse>,
    pub fallen_animals: Vec<FallenAnimal>,
    pub medal_unlocked: Option<DoorType>,
}

/// What an applied action did to the snapshot.
#[derive(Clone, Debug, PartialEq)]
pub enum ActionResult {
    /// The request failed pre-validation and the snapshot is untouched.
    Ignored,
    LobbyDraw(Vec<DoorType>),
    /// A door resolved immediately as a reward, no battle.
    Reward(PendingReward),
    /// A door spawned an encounter; the battle is now active at index 0.
    Encounter {
        door: DoorType,
        enemies: Vec<EnemyInstance>,
    },
    /// The battle continues: an enemy fell with more remaining, or the
    /// attack missed and locked the weapon phase.
    BattleProgress {
        enemy_defeated: bool,
        weapons_locked: bool,
    },
    /// The last enemy fell. Only the duel path carries a reward summary.
    Victory(Option<PendingReward>),
    Defeat,
    AnimalFed,
    AnimalGrown,
    MedalAcknowledged,
}

/// Defines how a concrete action variant mutates the save.
pub trait ActionTransition {
    /// Validates the request against the pre-mutation snapshot. `false`
    /// downgrades the action to a no-op.
    fn pre_validate(&self, state: &SaveGame, env: &GameEnv<'_>) -> bool;

    /// Applies the action by mutating the snapshot directly.
    fn apply(&self, state: &mut SaveGame, env: &GameEnv<'_>) -> Result<ActionResult, EngineError>;
}

/// All player actions the engine can execute.
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    DrawLobbyDoors(DrawLobbyDoors),
    OpenDoor(OpenDoor),
    ResolveWeaponAttack(ResolveWeaponAttack),
    ResolveAnimalDuel(ResolveAnimalDuel),
    FeedAnimal(FeedAnimal),
    GrowAnimal(GrowAnimal),
    AcknowledgeMedalHighlight(AcknowledgeMedalHighlight),
}

/// Builds the per-door RNG stream for one call site.
///
/// `offset` decorrelates the streams a single action consumes (encounter
/// roll, loot roll, conflict durations); each call site owns a fixed value.
pub(crate) fn door_rng(state: &SaveGame, door: DoorType, offset: u32) -> Rng {
    let n = state
        .progress
        .turn
        .wrapping_add(1)
        .wrapping_add(offset.wrapping_mul(13))
        .wrapping_add(door.name_hash());
    Rng::new(turn_seed(state.meta.rng_seed, n))
}
