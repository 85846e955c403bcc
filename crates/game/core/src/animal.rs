//! Player animals: roster configs, owned instances, size derates, growth.

const SMALL_DAMAGE_MULTIPLIER: f64 = 0.7;
const SMALL_LIFE_MULTIPLIER: f64 = 0.75;
const SMALL_STAMINA_MULTIPLIER: f64 = 0.6;
const SMALL_SPEED_BONUS: u32 = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Size {
    Small,
    Large,
}

/// Base stats for one roster species.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct AnimalConfig {
    pub id: u32,
    pub kind: String,
    pub life: u32,
    pub damage: u32,
    pub attack_speed: u32,
    pub size: Size,
    pub stamina_max: u32,
    pub upgradable_armor: bool,
    pub growth_food_cost: u32,
}

/// A player-owned creature. Mutated by duels, feeding, and growth.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct AnimalInstance {
    pub config_id: u32,
    pub life: u32,
    pub stamina: u32,
    pub size: Size,
    pub armor: u32,
    pub alive: bool,
}

impl AnimalInstance {
    /// A fresh instance at the config's caps for its base size.
    pub fn from_config(config: &AnimalConfig) -> Self {
        Self {
            config_id: config.id,
            life: life_cap(config, config.size),
            stamina: stamina_cap(config, config.size),
            size: config.size,
            armor: 0,
            alive: true,
        }
    }
}

/// A battle enemy, copied from an animal config at encounter generation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct EnemyInstance {
    pub config_id: u32,
    pub life: u32,
    pub damage: u32,
    pub attack_speed: u32,
    pub size: Size,
}

impl EnemyInstance {
    pub fn from_config(config: &AnimalConfig) -> Self {
        Self {
            config_id: config.id,
            life: config.life,
            damage: config.damage,
            attack_speed: config.attack_speed,
            size: config.size,
        }
    }
}

fn derate(base: u32, multiplier: f64, floor: u32) -> u32 {
    ((base as f64 * multiplier).round() as u32).max(floor)
}

/// Maximum life for a config at the given size.
pub fn life_cap(config: &AnimalConfig, size: Size) -> u32 {
    match size {
        Size::Small => derate(config.life, SMALL_LIFE_MULTIPLIER, 1),
        Size::Large => config.life,
    }
}

/// Maximum stamina for a config at the given size.
pub fn stamina_cap(config: &AnimalConfig, size: Size) -> u32 {
    match size {
        Size::Small => derate(config.stamina_max, SMALL_STAMINA_MULTIPLIER, 5),
        Size::Large => config.stamina_max,
    }
}

pub fn damage_value(config: &AnimalConfig, size: Size) -> u32 {
    match size {
        Size::Small => derate(config.damage, SMALL_DAMAGE_MULTIPLIER, 1),
        Size::Large => config.damage,
    }
}

pub fn attack_speed_value(config: &AnimalConfig, size: Size) -> u32 {
    match size {
        Size::Small => (config.attack_speed + SMALL_SPEED_BONUS).max(1),
        Size::Large => config.attack_speed,
    }
}

/// Effective combat stats for an owned instance, with life clamped to the
/// size-adjusted cap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnimalBattleStats {
    pub life: u32,
    pub damage: u32,
    pub attack_speed: u32,
    pub stamina_cap: u32,
    pub life_cap: u32,
}

pub fn battle_stats(config: &AnimalConfig, instance: &AnimalInstance) -> AnimalBattleStats {
    let life_cap = life_cap(config, instance.size);
    AnimalBattleStats {
        life: instance.life.min(life_cap),
        damage: damage_value(config, instance.size),
        attack_speed: attack_speed_value(config, instance.size),
        stamina_cap: stamina_cap(config, instance.size),
        life_cap,
    }
}

/// Grows an instance to Large at the grown caps.
pub fn apply_growth(instance: &AnimalInstance, config: &AnimalConfig) -> AnimalInstance {
    let mut grown = instance.clone();
    grown.size = Size::Large;
    grown.life = life_cap(config, Size::Large);
    grown.stamina = stamina_cap(config, Size::Large);
    grown
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wolf() -> AnimalConfig {
        AnimalConfig {
            id: 3,
            kind: "wolf".to_string(),
            life: 40,
            damage: 10,
            attack_speed: 4,
            size: Size::Large,
            stamina_max: 20,
            upgradable_armor: true,
            growth_food_cost: 6,
        }
    }

    #[test]
    fn small_size_derates_caps_and_boosts_speed() {
        let config = wolf();
        assert_eq!(life_cap(&config, Size::Small), 30);
        assert_eq!(stamina_cap(&config, Size::Small), 12);
        assert_eq!(damage_value(&config, Size::Small), 7);
        assert_eq!(attack_speed_value(&config, Size::Small), 6);
    }

    #[test]
    fn derate_floors_apply_to_tiny_configs() {
        let mut config = wolf();
        config.life = 1;
        config.stamina_max = 3;
        config.damage = 1;
        assert_eq!(life_cap(&config, Size::Small), 1);
        assert_eq!(stamina_cap(&config, Size::Small), 5);
        assert_eq!(damage_value(&config, Size::Small), 1);
    }

    #[test]
    fn battle_stats_clamp_life_to_the_size_cap() {
        let config = wolf();
        let instance = AnimalInstance {
            config_id: 3,
            life: 40,
            stamina: 12,
            size: Size::Small,
            armor: 2,
            alive: true,
        };
        let stats = battle_stats(&config, &instance);
        assert_eq!(stats.life, 30);
        assert_eq!(stats.life_cap, 30);
        assert_eq!(stats.stamina_cap, 12);
    }

    #[test]
    fn growth_fills_the_grown_caps() {
        let config = wolf();
        let small = AnimalInstance {
            config_id: 3,
            life: 5,
            stamina: 2,
            size: Size::Small,
            armor: 1,
            alive: true,
        };
        let grown = apply_growth(&small, &config);
        assert_eq!(grown.size, Size::Large);
        assert_eq!(grown.life, 40);
        assert_eq!(grown.stamina, 20);
        assert_eq!(grown.armor, 1);
    }
}
