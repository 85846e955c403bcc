//! Pure combat primitives. No RNG: both resolvers are total functions of
//! their inputs, which keeps battle outcomes replayable without consuming
//! stream draws.

/// Outcome of firing a weapon at a single enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct WeaponAttackOutcome {
    pub enemy_life_left: u32,
    pub ammo_spent: u32,
    pub defeated: bool,
}

/// Resolves a volley of shots against one enemy.
///
/// Negative shot requests clamp to zero. The caller deducts `ammo_spent`
/// from the weapon's reserve.
pub fn weapon_attack(enemy_life: u32, damage_per_shot: u32, shots_requested: i64) -> WeaponAttackOutcome {
    let shots = shots_requested.max(0) as u32;
    let damage = damage_per_shot.saturating_mul(shots);
    let enemy_life_left = enemy_life.saturating_sub(damage);
    WeaponAttackOutcome {
        enemy_life_left,
        ammo_spent: shots,
        defeated: enemy_life_left == 0,
    }
}

/// One side of an animal duel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DuelCombatant {
    pub life: u32,
    pub damage: u32,
    pub attack_speed: u32,
    /// Flat damage reduction. Enemies always fight unarmored.
    pub armor: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum DuelSide {
    Player,
    Enemy,
}

/// One attack in the duel log.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct DuelEvent {
    pub round: u32,
    pub attacker: DuelSide,
    pub damage: u32,
    pub defender_life_before: u32,
    pub player_life_after: u32,
    pub enemy_life_after: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct DuelOutcome {
    pub winner: DuelSide,
    pub rounds: u32,
    pub player_life_left: u32,
    pub enemy_life_left: u32,
    pub log: Vec<DuelEvent>,
}

/// 100 rounds guards against zero-damage stalemates.
const ROUND_CAP: u32 = 100;

/// Resolves a duel to completion.
///
/// Initiative is decided once: the player leads iff its speed is at least
/// the enemy's. Each attack lands `max(1, damage - defender_armor)`; life
/// floors at zero, and a kill ends the round without retaliation. If both
/// sides are down when the duel ends, the player takes the win; hitting the
/// round cap with both alive hands it to the enemy.
pub fn animal_duel(player: &DuelCombatant, enemy: &DuelCombatant) -> DuelOutcome {
    let player_first = player.attack_speed >= enemy.attack_speed;
    let mut player_life = player.life;
    let mut enemy_life = enemy.life;
    let mut log = Vec::new();
    let mut rounds = 0;

    while player_life > 0 && enemy_life > 0 && rounds < ROUND_CAP {
        rounds += 1;
        let order = if player_first {
            [DuelSide::Player, DuelSide::Enemy]
        } else {
            [DuelSide::Enemy, DuelSide::Player]
        };
        for side in order {
            let (damage, defender_life_before) = match side {
                DuelSide::Player => {
                    let dealt = player.damage.max(1);
                    let before = enemy_life;
                    enemy_life = enemy_life.saturating_sub(dealt);
                    (dealt, before)
                }
                DuelSide::Enemy => {
                    let dealt = enemy.damage.saturating_sub(player.armor).max(1);
                    let before = player_life;
                    player_life = player_life.saturating_sub(dealt);
                    (dealt, before)
                }
            };
            log.push(DuelEvent {
                round: rounds,
                attacker: side,
                damage,
                defender_life_before,
                player_life_after: player_life,
                enemy_life_after: enemy_life,
            });
            if player_life == 0 || enemy_life == 0 {
                break;
            }
        }
    }

    // Simultaneous knockouts cannot happen (a kill ends the round), but the
    // convention stands: a downed enemy means a player win even at 0 life.
    let winner = if enemy_life == 0 {
        DuelSide::Player
    } else {
        DuelSide::Enemy
    };

    DuelOutcome {
        winner,
        rounds,
        player_life_left: player_life,
        enemy_life_left: enemy_life,
        log,
    }
}
