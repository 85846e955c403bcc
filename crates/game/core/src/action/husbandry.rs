//! Out-of-battle animal care and medal-highlight acknowledgment.

use crate::action::{ActionResult, ActionTransition, EngineError};
use crate::animal::{Size, apply_growth, stamina_cap};
use crate::env::GameEnv;
use crate::state::SaveGame;

/// Converts food into stamina, one for one, up to the animal's cap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeedAnimal {
    pub animal_index: usize,
}

impl ActionTransition for FeedAnimal {
    fn pre_validate(&self, state: &SaveGame, env: &GameEnv<'_>) -> bool {
        let Some(instance) = state.animals.owned.get(self.animal_index) else {
            return false;
        };
        if !instance.alive || state.inventory.food == 0 {
            return false;
        }
        let Some(config) = env.configs.animal(instance.config_id) else {
            return false;
        };
        instance.stamina < stamina_cap(config, instance.size)
    }

    fn apply(&self, state: &mut SaveGame, env: &GameEnv<'_>) -> Result<ActionResult, EngineError> {
        if !self.pre_validate(state, env) {
            return Ok(ActionResult::Ignored);
        }
        let instance = &state.animals.owned[self.animal_index];
        let Some(config) = env.configs.animal(instance.config_id) else {
            return Ok(ActionResult::Ignored);
        };
        let cap = stamina_cap(config, instance.size);
        let missing = (cap - instance.stamina) as u64;
        let to_spend = missing.min(state.inventory.food);

        state.inventory.food -= to_spend;
        let instance = &mut state.animals.owned[self.animal_index];
        instance.stamina = (instance.stamina + to_spend as u32).min(cap);
        Ok(ActionResult::AnimalFed)
    }
}

/// Grows a small animal to Large at the grown caps, for a food cost.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GrowAnimal {
    pub animal_index: usize,
}

impl ActionTransition for GrowAnimal {
    fn pre_validate(&self, state: &SaveGame, env: &GameEnv<'_>) -> bool {
        let Some(instance) = state.animals.owned.get(self.animal_index) else {
            return false;
        };
        if !instance.alive || instance.size == Size::Large {
            return false;
        }
        let Some(config) = env.configs.animal(instance.config_id) else {
            return false;
        };
        state.inventory.food >= config.growth_food_cost as u64
    }

    fn apply(&self, state: &mut SaveGame, env: &GameEnv<'_>) -> Result<ActionResult, EngineError> {
        if !self.pre_validate(state, env) {
            return Ok(ActionResult::Ignored);
        }
        let instance = state.animals.owned[self.animal_index].clone();
        let Some(config) = env.configs.animal(instance.config_id) else {
            return Ok(ActionResult::Ignored);
        };
        state.inventory.food -= config.growth_food_cost as u64;
        state.animals.owned[self.animal_index] = apply_growth(&instance, config);
        Ok(ActionResult::AnimalGrown)
    }
}

/// Clears the medal highlight once the player has seen it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AcknowledgeMedalHighlight;

impl ActionTransition for AcknowledgeMedalHighlight {
    fn pre_validate(&self, state: &SaveGame, _env: &GameEnv<'_>) -> bool {
        state.medals.highlighted.is_some()
    }

    fn apply(&self, state: &mut SaveGame, _env: &GameEnv<'_>) -> Result<ActionResult, EngineError> {
        if state.medals.highlighted.is_none() {
            return Ok(ActionResult::Ignored);
        }
        state.medals.highlighted = None;
        Ok(ActionResult::MedalAcknowledged)
    }
}
