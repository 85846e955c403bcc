//! The lobby draw that opens each turn.

use crate::action::{ActionResult, ActionTransition, EngineError};
use crate::door::{DoorType, compute_available, decrement_blocks};
use crate::env::GameEnv;
use crate::rng::{Rng, turn_seed};
use crate::state::{BattleState, SaveGame};

/// Presents up to three doors drawn from the currently available pool.
///
/// The draw also commits the turn's block decrement, so the pool the player
/// sees is the pool the turn will run against. Any stale battle state is
/// discarded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DrawLobbyDoors;

impl ActionTransition for DrawLobbyDoors {
    fn pre_validate(&self, _state: &SaveGame, _env: &GameEnv<'_>) -> bool {
        true
    }

    fn apply(&self, state: &mut SaveGame, _env: &GameEnv<'_>) -> Result<ActionResult, EngineError> {
        let blocked = decrement_blocks(&state.progress.blocked_doors);
        let available = compute_available(&DoorType::all(), &blocked);

        let mut rng = Rng::new(turn_seed(state.meta.rng_seed, state.progress.turn + 1));
        let mut pool = available.clone();
        let mut drawn = Vec::new();
        for _ in 0..pool.len().min(3) {
            let index = rng.next_int(0, pool.len() as u32 - 1) as usize;
            drawn.push(pool.remove(index));
        }

        state.progress.blocked_doors = blocked;
        state.progress.available_pool = available;
        state.progress.last_lobby_draw = drawn.clone();
        state.battle_state = BattleState::default();

        Ok(ActionResult::LobbyDraw(drawn))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfigs;
    use crate::door::BlockedDoor;
    use crate::env::Timestamp;
    use std::collections::BTreeMap;

    fn configs() -> GameConfigs {
        GameConfigs {
            animals: Vec::new(),
            weapons: Vec::new(),
            loot_tables: BTreeMap::new(),
            house: Vec::new(),
            medal_drop_rate: 0.002,
        }
    }

    fn save() -> SaveGame {
        SaveGame::template(
            "slot",
            1234,
            Vec::new(),
            Vec::new(),
            0.002,
            Timestamp::from("t0"),
        )
    }

    #[test]
    fn draws_three_distinct_doors_from_the_pool() {
        let configs = configs();
        let env = GameEnv::new(&configs, Timestamp::from("t1"));
        let mut state = save();
        let result = DrawLobbyDoors.apply(&mut state, &env).unwrap();
        let ActionResult::LobbyDraw(drawn) = result else {
            panic!("expected a lobby draw");
        };
        assert_eq!(drawn.len(), 3);
        assert!(drawn.iter().all(|a| drawn.iter().filter(|b| *b == a).count() == 1));
        assert_eq!(state.progress.last_lobby_draw, drawn);
    }

    #[test]
    fn same_seed_and_turn_repeat_the_draw() {
        let configs = configs();
        let env = GameEnv::new(&configs, Timestamp::from("t1"));
        let mut a = save();
        let mut b = save();
        let first = DrawLobbyDoors.apply(&mut a, &env).unwrap();
        let second = DrawLobbyDoors.apply(&mut b, &env).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn draw_commits_the_block_decrement() {
        let configs = configs();
        let env = GameEnv::new(&configs, Timestamp::from("t1"));
        let mut state = save();
        state.progress.blocked_doors = vec![
            BlockedDoor {
                door: DoorType::Red,
                turns_left: 1,
            },
            BlockedDoor {
                door: DoorType::Blue,
                turns_left: 2,
            },
        ];
        DrawLobbyDoors.apply(&mut state, &env).unwrap();
        assert_eq!(state.progress.blocked_doors.len(), 1);
        assert!(!state.progress.available_pool.contains(&DoorType::Blue));
        assert!(state.progress.available_pool.contains(&DoorType::Red));
    }
}
