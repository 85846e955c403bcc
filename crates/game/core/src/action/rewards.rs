//! Shared helpers for resolving a door: loot application, turn advancement,
//! and furniture bonus grants.

use strum::IntoEnumIterator;

use crate::animal::{AnimalConfig, AnimalInstance, stamina_cap};
use crate::door::{DoorType, apply_conflicts, compute_available, decrement_blocks};
use crate::env::Timestamp;
use crate::house::{BonusAmount, BonusKind, BonusTrigger, tick_house_bonuses};
use crate::loot::{AmmoKind, LootEntry, Resource};
use crate::rng::{Rng, RngError};
use crate::state::{ArmorItem, Inventory, SaveGame};

fn add_coins(value: &mut u64, amount: i64) {
    *value = value.saturating_add_signed(amount);
}

fn add_ammo(value: &mut u32, amount: i64) {
    let next = (*value as i64).saturating_add(amount);
    *value = next.clamp(0, u32::MAX as i64) as u32;
}

/// Applies loot to the inventory on the no-battle reward path.
///
/// Armor and special items mint ids from the action timestamp. Medals and
/// furniture pieces surface in the reward summary without touching the
/// inventory.
pub(crate) fn apply_loot_full(inventory: &mut Inventory, loot: Option<&LootEntry>, now: &Timestamp) {
    let Some(loot) = loot else { return };
    match &loot.resource {
        Resource::Ammo(kind) => add_ammo(inventory.ammo.get_mut(*kind), loot.qty as i64),
        Resource::Coins => add_coins(&mut inventory.coins, loot.qty as i64),
        Resource::Food => add_coins(&mut inventory.food, loot.qty as i64),
        Resource::Armor => inventory.armors.push(ArmorItem {
            id: format!("armor-{}", now.as_str()),
            tier: 1,
            durability: (loot.qty * 5).max(5),
        }),
        Resource::SpecialItem => inventory
            .special_items
            .push(format!("item-{}", now.as_str())),
        Resource::Medal(_) | Resource::HousePiece(_) | Resource::None => {}
    }
}

/// Applies loot on the battle-victory paths: ammo, coins, and food only.
pub(crate) fn apply_loot_basic(inventory: &mut Inventory, loot: Option<&LootEntry>) {
    let Some(loot) = loot else { return };
    match &loot.resource {
        Resource::Ammo(kind) => add_ammo(inventory.ammo.get_mut(*kind), loot.qty as i64),
        Resource::Coins => add_coins(&mut inventory.coins, loot.qty as i64),
        Resource::Food => add_coins(&mut inventory.food, loot.qty as i64),
        _ => {}
    }
}

fn split_sum(amounts: &[i64]) -> i64 {
    amounts.iter().sum()
}

/// Converts due furniture bonuses into resource grants.
///
/// `Ammo` split amounts map onto ammo kinds in canonical slot order; a flat
/// amount grants that much of every kind. `Mixed` splits read as
/// `[coins, food, ammo-each]`.
pub(crate) fn apply_house_rewards(inventory: &mut Inventory, triggers: &[BonusTrigger]) {
    for trigger in triggers {
        let amount = &trigger.bonus.amount;
        match trigger.bonus.kind {
            BonusKind::Coins => {
                let value = match amount {
                    BonusAmount::Flat(v) => *v,
                    BonusAmount::Split(vs) => split_sum(vs),
                };
                add_coins(&mut inventory.coins, value);
            }
            BonusKind::Food => {
                let value = match amount {
                    BonusAmount::Flat(v) => *v,
                    BonusAmount::Split(vs) => split_sum(vs),
                };
                add_coins(&mut inventory.food, value);
            }
            BonusKind::Ammo => match amount {
                BonusAmount::Split(vs) => {
                    for (kind, value) in AmmoKind::iter().zip(vs.iter()) {
                        add_ammo(inventory.ammo.get_mut(kind), *value);
                    }
                }
                BonusAmount::Flat(v) => {
                    for kind in AmmoKind::iter() {
                        add_ammo(inventory.ammo.get_mut(kind), *v);
                    }
                }
            },
            BonusKind::Mixed => match amount {
                BonusAmount::Split(vs) => {
                    let coins = vs.first().copied().unwrap_or(0);
                    let food = vs.get(1).copied().unwrap_or(0);
                    let ammo_each = vs.get(2).copied().unwrap_or(0);
                    add_coins(&mut inventory.coins, coins);
                    add_coins(&mut inventory.food, food);
                    for kind in AmmoKind::iter() {
                        add_ammo(inventory.ammo.get_mut(kind), ammo_each);
                    }
                }
                BonusAmount::Flat(v) => {
                    add_coins(&mut inventory.coins, *v);
                    add_coins(&mut inventory.food, *v);
                }
            },
        }
    }
}

/// Advances the world one turn after a resolved door: conflict schedule,
/// available pool, progress counters, and house bonuses.
pub(crate) fn advance_progress(
    state: &mut SaveGame,
    door: DoorType,
    conflicts_rng: &mut Rng,
) -> Result<(), RngError> {
    let decremented = decrement_blocks(&state.progress.blocked_doors);
    let blocked = apply_conflicts(door, &decremented, conflicts_rng)?;
    let available = compute_available(&DoorType::all(), &blocked);
    let tick = tick_house_bonuses(&state.house.objects);

    state.progress.doors_opened += 1;
    state.progress.turn += 1;
    state.progress.blocked_doors = blocked;
    state.progress.available_pool = available;
    state.progress.last_lobby_draw.clear();
    state.house.objects = tick.objects;
    apply_house_rewards(&mut state.inventory, &tick.triggers);
    Ok(())
}

/// Restores stamina to living animals, clamped to each one's cap.
pub(crate) fn regenerate_stamina(
    owned: &mut [AnimalInstance],
    configs: &[AnimalConfig],
    amount: u32,
) {
    if amount == 0 {
        return;
    }
    for animal in owned.iter_mut().filter(|animal| animal.alive) {
        let Some(config) = configs.iter().find(|c| c.id == animal.config_id) else {
            continue;
        };
        let cap = stamina_cap(config, animal.size);
        animal.stamina = (animal.stamina + amount).min(cap);
    }
}
