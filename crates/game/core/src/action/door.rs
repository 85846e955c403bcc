//! Opening a door: encounter generation or an immediate reward.

use crate::action::rewards::{advance_progress, apply_loot_full};
use crate::action::{ActionResult, ActionTransition, EngineError, PendingReward, door_rng};
use crate::animal::{AnimalConfig, EnemyInstance};
use crate::door::DoorType;
use crate::env::GameEnv;
use crate::loot::roll_loot;
use crate::state::{BattleDoor, BattleState, DoorHistoryEntry, HistoryResult, SaveGame};

/// Probability that a door resolves without enemies.
const NO_ENCOUNTER_CHANCE: f64 = 0.35;

/// Most enemies a single door can spawn.
const MAX_ENEMIES: u32 = 3;

/// Opens one door from the lobby draw.
///
/// A turn-seeded roll decides between the immediate-reward path (loot,
/// conflicts, turn advance, house ticks, history) and an encounter that
/// leaves the battle active without granting anything yet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OpenDoor {
    pub door: DoorType,
}

fn generate_encounter(
    state: &SaveGame,
    door: DoorType,
    animals: &[AnimalConfig],
) -> Vec<EnemyInstance> {
    if animals.is_empty() {
        return Vec::new();
    }

    let mut rng = door_rng(state, door, 0);
    if rng.next_float() < NO_ENCOUNTER_CHANCE {
        return Vec::new();
    }

    let count = rng.next_int(1, MAX_ENEMIES.min(animals.len() as u32));
    let mut pool: Vec<&AnimalConfig> = animals.iter().collect();
    let mut picked = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let index = rng.next_int(0, pool.len() as u32 - 1) as usize;
        picked.push(EnemyInstance::from_config(pool.remove(index)));
    }
    picked
}

impl ActionTransition for OpenDoor {
    fn pre_validate(&self, _state: &SaveGame, _env: &GameEnv<'_>) -> bool {
        true
    }

    fn apply(&self, state: &mut SaveGame, env: &GameEnv<'_>) -> Result<ActionResult, EngineError> {
        let door = self.door;
        let enemies = generate_encounter(state, door, &env.configs.animals);

        if enemies.is_empty() {
            let mut loot_rng = door_rng(state, door, 7);
            let loot = env
                .configs
                .loot_table(door)
                .and_then(|table| roll_loot(table, &mut loot_rng));
            apply_loot_full(&mut state.inventory, loot.as_ref(), &env.now);

            let mut conflicts_rng = door_rng(state, door, 11);
            advance_progress(state, door, &mut conflicts_rng)?;
            state.battle_state = BattleState::default();
            state.push_history(DoorHistoryEntry {
                door,
                result: HistoryResult::Reward,
                loot: loot.clone(),
                timestamp: env.now.clone(),
            });

            return Ok(ActionResult::Reward(PendingReward {
                door,
                loot,
                weapons_used: Vec::new(),
                fallen_animals: Vec::new(),
                medal_unlocked: None,
            }));
        }

        state.battle_state = BattleState {
            active: true,
            door: Some(BattleDoor {
                door,
                enemies: enemies.clone(),
                index: 0,
            }),
            used_weapons: Vec::new(),
            fallen_animals: Vec::new(),
            weapons_locked: false,
        };
        state.record_bestiary(&enemies);

        Ok(ActionResult::Encounter { door, enemies })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animal::Size;
    use crate::config::GameConfigs;
    use crate::env::Timestamp;
    use crate::loot::{LootTableEntry, Quantity, Resource};
    use std::collections::BTreeMap;

    fn roster() -> Vec<AnimalConfig> {
        (1..=4)
            .map(|id| AnimalConfig {
                id,
                kind: format!("beast-{id}"),
                life: 10 + id,
                damage: 2,
                attack_speed: 3,
                size: Size::Large,
                stamina_max: 10,
                upgradable_armor: false,
                growth_food_cost: 4,
            })
            .collect()
    }

    fn configs() -> GameConfigs {
        let mut loot_tables = BTreeMap::new();
        loot_tables.insert(
            DoorType::White,
            vec![LootTableEntry {
                resource: Resource::Coins,
                weight: 100.0,
                quantity: Quantity::Fixed(3),
            }],
        );
        GameConfigs {
            animals: roster(),
            weapons: Vec::new(),
            loot_tables,
            house: Vec::new(),
            medal_drop_rate: 0.002,
        }
    }

    fn save(seed: u32) -> SaveGame {
        SaveGame::template(
            "slot",
            seed,
            Vec::new(),
            Vec::new(),
            0.002,
            Timestamp::from("t0"),
        )
    }

    #[test]
    fn both_paths_hold_their_invariants() {
        let configs = configs();
        let env = GameEnv::new(&configs, Timestamp::from("t1"));
        let mut saw_reward = false;
        let mut saw_encounter = false;

        for seed in 0..200u32 {
            let mut state = save(seed);
            let result = OpenDoor {
                door: DoorType::White,
            }
            .apply(&mut state, &env)
            .unwrap();

            match result {
                ActionResult::Reward(reward) => {
                    saw_reward = true;
                    assert_eq!(state.progress.turn, 1);
                    assert_eq!(state.progress.doors_opened, 1);
                    assert!(state.progress.last_lobby_draw.is_empty());
                    assert!(!state.battle_state.active);
                    assert_eq!(state.door_history.len(), 1);
                    assert_eq!(state.door_history[0].result, HistoryResult::Reward);
                    let loot = reward.loot.expect("white table always pays coins");
                    assert_eq!(loot.resource, Resource::Coins);
                    assert_eq!(state.inventory.coins, loot.qty as u64);
                }
                ActionResult::Encounter { door, enemies } => {
                    saw_encounter = true;
                    assert_eq!(door, DoorType::White);
                    assert!(!enemies.is_empty() && enemies.len() <= 3);
                    // Encounters grant nothing and do not advance the turn.
                    assert_eq!(state.progress.turn, 0);
                    assert_eq!(state.progress.doors_opened, 0);
                    assert!(state.door_history.is_empty());
                    let battle = state.battle_state.door.as_ref().unwrap();
                    assert!(state.battle_state.active);
                    assert_eq!(battle.index, 0);
                    assert_eq!(battle.enemies, enemies);
                    for enemy in &enemies {
                        assert!(state.animals.bestiary_seen.contains(&enemy.config_id));
                    }
                }
                other => panic!("unexpected result {other:?}"),
            }
        }

        assert!(saw_reward && saw_encounter);
    }

    #[test]
    fn encounter_picks_are_without_replacement() {
        let configs = configs();
        let env = GameEnv::new(&configs, Timestamp::from("t1"));
        for seed in 0..200u32 {
            let mut state = save(seed);
            let result = OpenDoor {
                door: DoorType::Green,
            }
            .apply(&mut state, &env)
            .unwrap();
            if let ActionResult::Encounter { enemies, .. } = result {
                for (i, enemy) in enemies.iter().enumerate() {
                    assert!(
                        enemies[i + 1..]
                            .iter()
                            .all(|other| other.config_id != enemy.config_id)
                    );
                }
            }
        }
    }

    #[test]
    fn empty_roster_always_resolves_as_reward() {
        let mut configs = configs();
        configs.animals.clear();
        let env = GameEnv::new(&configs, Timestamp::from("t1"));
        for seed in 0..50u32 {
            let mut state = save(seed);
            let result = OpenDoor {
                door: DoorType::White,
            }
            .apply(&mut state, &env)
            .unwrap();
            assert!(matches!(result, ActionResult::Reward(_)));
        }
    }

    #[test]
    fn same_seed_reproduces_the_same_resolution() {
        let configs = configs();
        let env = GameEnv::new(&configs, Timestamp::from("t1"));
        let mut a = save(99);
        let mut b = save(99);
        let action = OpenDoor {
            door: DoorType::Lime,
        };
        let first = action.apply(&mut a, &env).unwrap();
        let second = action.apply(&mut b, &env).unwrap();
        assert_eq!(first, second);
        assert_eq!(a, b);
    }
}
