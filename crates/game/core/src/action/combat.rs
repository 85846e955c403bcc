//! Battle actions against the active encounter: weapon volleys and animal
//! duels.

use crate::action::rewards::{advance_progress, apply_loot_basic, regenerate_stamina};
use crate::action::{ActionResult, ActionTransition, EngineError, PendingReward, door_rng};
use crate::animal::{battle_stats, stamina_cap};
use crate::battle::{DuelCombatant, animal_duel, weapon_attack};
use crate::config::WeaponName;
use crate::door::DoorType;
use crate::env::GameEnv;
use crate::loot::{LootEntry, Resource, roll_loot};
use crate::state::{
    BattleState, DoorHistoryEntry, FallenAnimal, HistoryResult, MedalStatus, SaveGame, WeaponUse,
};

/// Duel victories restore this much stamina to every surviving animal.
const VICTORY_STAMINA_REGEN: u32 = 5;

/// Fires a weapon at the current enemy.
///
/// The spend clamps to the available ammo and the weapon's magazine. A
/// volley that leaves the enemy standing locks the weapon phase for the
/// rest of the encounter; defeating the final enemy resolves the door as a
/// victory (loot limited to ammo, coins, and food, and no reward summary).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolveWeaponAttack {
    pub weapon: WeaponName,
    pub ammo_requested: i64,
}

impl ResolveWeaponAttack {
    fn spend(&self, state: &SaveGame, env: &GameEnv<'_>) -> Option<u32> {
        let config = env.configs.weapon(self.weapon)?;
        let available = state.inventory.ammo.get(self.weapon.ammo_kind());
        let spend = self
            .ammo_requested
            .max(0)
            .min(available as i64)
            .min(config.max_ammo as i64) as u32;
        (spend > 0).then_some(spend)
    }
}

impl ActionTransition for ResolveWeaponAttack {
    fn pre_validate(&self, state: &SaveGame, env: &GameEnv<'_>) -> bool {
        state.battle_state.active
            && state.battle_state.door.is_some()
            && !state.battle_state.weapons_locked
            && self.spend(state, env).is_some()
    }

    fn apply(&self, state: &mut SaveGame, env: &GameEnv<'_>) -> Result<ActionResult, EngineError> {
        if !self.pre_validate(state, env) {
            return Ok(ActionResult::Ignored);
        }
        let Some(config) = env.configs.weapon(self.weapon) else {
            return Ok(ActionResult::Ignored);
        };
        let Some(spend) = self.spend(state, env) else {
            return Ok(ActionResult::Ignored);
        };
        let Some(battle_door) = state.battle_state.door.clone() else {
            return Ok(ActionResult::Ignored);
        };

        let enemy = &battle_door.enemies[battle_door.index];
        let result = weapon_attack(enemy.life, config.damage_per_shot, spend as i64);

        let kind = self.weapon.ammo_kind();
        *state.inventory.ammo.get_mut(kind) -= result.ammo_spent;

        if result.defeated {
            let next_index = battle_door.index + 1;
            if next_index >= battle_door.enemies.len() {
                let door = battle_door.door;
                let mut loot_rng = door_rng(state, door, 17);
                let loot = env
                    .configs
                    .loot_table(door)
                    .and_then(|table| roll_loot(table, &mut loot_rng));
                apply_loot_basic(&mut state.inventory, loot.as_ref());

                let mut conflicts_rng = door_rng(state, door, 23);
                advance_progress(state, door, &mut conflicts_rng)?;
                state.battle_state = BattleState::default();
                state.push_history(DoorHistoryEntry {
                    door,
                    result: HistoryResult::Victory,
                    loot,
                    timestamp: env.now.clone(),
                });
                return Ok(ActionResult::Victory(None));
            }

            let battle = &mut state.battle_state;
            if let Some(active) = battle.door.as_mut() {
                active.enemies[battle_door.index].life = result.enemy_life_left;
                active.index = next_index;
            }
            battle.used_weapons.push(WeaponUse {
                name: self.weapon,
                shots: result.ammo_spent,
            });
            return Ok(ActionResult::BattleProgress {
                enemy_defeated: true,
                weapons_locked: battle.weapons_locked,
            });
        }

        // The enemy survived: the weapon phase is spent for this encounter.
        let battle = &mut state.battle_state;
        if let Some(active) = battle.door.as_mut() {
            active.enemies[battle_door.index].life = result.enemy_life_left;
        }
        battle.used_weapons.push(WeaponUse {
            name: self.weapon,
            shots: result.ammo_spent,
        });
        battle.weapons_locked = true;
        Ok(ActionResult::BattleProgress {
            enemy_defeated: false,
            weapons_locked: true,
        })
    }
}

/// Sends an owned animal into a duel with the current enemy.
///
/// The animal must be at full stamina and spends all of it. A victory over
/// the final enemy resolves the door, builds the full reward summary
/// (weapons used, fallen animals, medal unlocks), and restores stamina to
/// the survivors. Losing the duel with no living animals and no ammo of any
/// kind left records the encounter as a defeat.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolveAnimalDuel {
    pub animal_index: usize,
}

/// Splits medal loot into (inventory-applicable loot, unlocked medal door).
/// Already-owned medals degrade to no reward.
fn resolve_medal_loot(
    state: &mut SaveGame,
    loot: Option<LootEntry>,
    env: &GameEnv<'_>,
) -> (Option<LootEntry>, Option<DoorType>) {
    let Some(entry) = &loot else {
        return (None, None);
    };
    let Resource::Medal(medal_door) = entry.resource else {
        return (loot, None);
    };
    if state.medals.is_unlocked(medal_door) {
        return (None, None);
    }
    state.medals.entries.insert(
        medal_door,
        MedalStatus {
            unlocked: true,
            unlocked_at: Some(env.now.clone()),
            highlight_until: Some(env.now.clone()),
        },
    );
    state.medals.highlighted = Some(medal_door);
    (loot, Some(medal_door))
}

impl ActionTransition for ResolveAnimalDuel {
    fn pre_validate(&self, state: &SaveGame, env: &GameEnv<'_>) -> bool {
        if !state.battle_state.active || state.battle_state.door.is_none() {
            return false;
        }
        let Some(instance) = state.animals.owned.get(self.animal_index) else {
            return false;
        };
        if !instance.alive {
            return false;
        }
        let Some(config) = env.configs.animal(instance.config_id) else {
            return false;
        };
        instance.stamina >= stamina_cap(config, instance.size)
    }

    fn apply(&self, state: &mut SaveGame, env: &GameEnv<'_>) -> Result<ActionResult, EngineError> {
        if !self.pre_validate(state, env) {
            return Ok(ActionResult::Ignored);
        }
        let Some(battle_door) = state.battle_state.door.clone() else {
            return Ok(ActionResult::Ignored);
        };
        let Some(instance) = state.animals.owned.get(self.animal_index).cloned() else {
            return Ok(ActionResult::Ignored);
        };
        let Some(config) = env.configs.animal(instance.config_id) else {
            return Ok(ActionResult::Ignored);
        };

        let stats = battle_stats(config, &instance);
        let enemy = &battle_door.enemies[battle_door.index];
        let duel = animal_duel(
            &DuelCombatant {
                life: stats.life,
                damage: stats.damage,
                attack_speed: stats.attack_speed,
                armor: instance.armor,
            },
            &DuelCombatant {
                life: enemy.life,
                damage: enemy.damage,
                attack_speed: enemy.attack_speed,
                armor: 0,
            },
        );

        let fighter = &mut state.animals.owned[self.animal_index];
        fighter.life = duel.player_life_left.min(stats.life_cap);
        fighter.alive = duel.player_life_left > 0;
        fighter.stamina = 0;

        if duel.player_life_left == 0 {
            state.battle_state.fallen_animals.push(FallenAnimal {
                config_id: instance.config_id,
            });
        }

        if duel.enemy_life_left == 0 {
            let next_index = battle_door.index + 1;
            if next_index >= battle_door.enemies.len() {
                let door = battle_door.door;
                let mut loot_rng = door_rng(state, door, 29);
                let raw_loot = env
                    .configs
                    .loot_table(door)
                    .and_then(|table| roll_loot(table, &mut loot_rng));
                let (loot, medal_unlocked) = resolve_medal_loot(state, raw_loot, env);
                apply_loot_basic(&mut state.inventory, loot.as_ref());

                let mut conflicts_rng = door_rng(state, door, 31);
                advance_progress(state, door, &mut conflicts_rng)?;
                regenerate_stamina(
                    &mut state.animals.owned,
                    &env.configs.animals,
                    VICTORY_STAMINA_REGEN,
                );

                let reward = PendingReward {
                    door,
                    loot: loot.clone(),
                    weapons_used: state.battle_state.used_weapons.clone(),
                    fallen_animals: state.battle_state.fallen_animals.clone(),
                    medal_unlocked,
                };
                state.battle_state = BattleState::default();
                state.push_history(DoorHistoryEntry {
                    door,
                    result: HistoryResult::Victory,
                    loot,
                    timestamp: env.now.clone(),
                });
                return Ok(ActionResult::Victory(Some(reward)));
            }

            let battle = &mut state.battle_state;
            if let Some(active) = battle.door.as_mut() {
                active.enemies[battle_door.index].life = 0;
                active.index = next_index;
            }
            return Ok(ActionResult::BattleProgress {
                enemy_defeated: true,
                weapons_locked: battle.weapons_locked,
            });
        }

        // The enemy survived. With nothing left to fight with, the
        // encounter is lost; the turn does not advance.
        let exhausted = state.animals.owned.iter().all(|animal| !animal.alive)
            && state.inventory.ammo.all_empty();
        if exhausted {
            regenerate_stamina(
                &mut state.animals.owned,
                &env.configs.animals,
                VICTORY_STAMINA_REGEN,
            );
            state.battle_state = BattleState::default();
            state.push_history(DoorHistoryEntry {
                door: battle_door.door,
                result: HistoryResult::Defeat,
                loot: None,
                timestamp: env.now.clone(),
            });
            return Ok(ActionResult::Defeat);
        }

        let battle = &mut state.battle_state;
        if let Some(active) = battle.door.as_mut() {
            active.enemies[battle_door.index].life = duel.enemy_life_left;
        }
        Ok(ActionResult::BattleProgress {
            enemy_defeated: false,
            weapons_locked: battle.weapons_locked,
        })
    }
}
