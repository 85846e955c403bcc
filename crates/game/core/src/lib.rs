//! Deterministic door-exploration game logic and data types.
//!
//! `doors-core` defines the canonical rules: the seeded RNG streams, the
//! door pool and conflict scheduler, the weighted loot roller, the combat
//! primitives, the furniture bonus ticker, and the save-game aggregate. All
//! state mutation flows through [`engine::GameEngine`], and supporting
//! crates depend on the types re-exported here. The crate performs no I/O
//! and never reads the wall clock, so a seed plus an ordered action log
//! replays to a byte-identical snapshot.
pub mod action;
pub mod animal;
pub mod battle;
pub mod config;
pub mod door;
pub mod engine;
pub mod env;
pub mod house;
pub mod loot;
pub mod rng;
pub mod state;

pub use action::{
    AcknowledgeMedalHighlight, Action, ActionResult, ActionTransition, DrawLobbyDoors, EngineError,
    FeedAnimal, GrowAnimal, OpenDoor, PendingReward, ResolveAnimalDuel, ResolveWeaponAttack,
};
pub use animal::{AnimalBattleStats, AnimalConfig, AnimalInstance, EnemyInstance, Size};
pub use battle::{
    DuelCombatant, DuelEvent, DuelOutcome, DuelSide, WeaponAttackOutcome, animal_duel,
    weapon_attack,
};
pub use config::{GameConfigs, HouseBlueprint, WeaponConfig, WeaponName};
pub use door::{
    BlockedDoor, ConflictRule, ConflictTarget, DoorType, apply_conflicts, compute_available,
    conflict_rules, decrement_blocks,
};
pub use engine::GameEngine;
pub use env::{GameEnv, Timestamp};
pub use house::{
    BonusAmount, BonusKind, BonusTrigger, HouseBonus, HouseObject, HouseTick, tick_house_bonuses,
};
pub use loot::{AmmoKind, LootEntry, LootTableEntry, Quantity, Resource, roll_loot};
pub use rng::{Rng, RngError, turn_seed};
pub use state::{
    AmmoState, AnimalsState, ArmorItem, BattleDoor, BattleState, DoorHistoryEntry, FallenAnimal,
    GAME_VERSION, HISTORY_CAP, HistoryResult, HouseState, Inventory, MedalStatus, MedalsState,
    Progress, SaveGame, SaveMeta, WeaponState, WeaponUse,
};
