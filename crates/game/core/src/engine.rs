//! Action execution pipeline.
//!
//! [`GameEngine`] is the authoritative reducer for [`SaveGame`]: every state
//! mutation flows through `pre_validate` → `apply`. Requests that fail
//! pre-validation come back as [`ActionResult::Ignored`] with the snapshot
//! untouched, so callers can forward user input without checking game rules
//! themselves.

use crate::action::{Action, ActionResult, ActionTransition, EngineError};
use crate::env::GameEnv;
use crate::state::SaveGame;

fn drive<T: ActionTransition>(
    transition: &T,
    state: &mut SaveGame,
    env: &GameEnv<'_>,
) -> Result<ActionResult, EngineError> {
    if !transition.pre_validate(state, env) {
        return Ok(ActionResult::Ignored);
    }
    transition.apply(state, env)
}

macro_rules! dispatch_transition {
    ($action:expr, $state:expr, $env:expr, { $($variant:ident),+ $(,)? }) => {
        match $action {
            $(Action::$variant(transition) => drive(transition, $state, $env),)+
        }
    };
}

/// Stateless dispatcher that runs one action against a snapshot.
pub struct GameEngine;

impl GameEngine {
    /// Executes an action, stamping `meta.updated_at` when the snapshot
    /// actually changed.
    pub fn execute(
        state: &mut SaveGame,
        env: &GameEnv<'_>,
        action: &Action,
    ) -> Result<ActionResult, EngineError> {
        let result = dispatch_transition!(action, state, env, {
            DrawLobbyDoors,
            OpenDoor,
            ResolveWeaponAttack,
            ResolveAnimalDuel,
            FeedAnimal,
            GrowAnimal,
            AcknowledgeMedalHighlight,
        })?;

        if result != ActionResult::Ignored {
            state.meta.updated_at = env.now.clone();
        }
        Ok(result)
    }
}
