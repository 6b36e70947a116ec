use figment::{providers::Env, Figment};
use serde::{Deserialize, Serialize};

use crate::constants::{score, TICKS_PER_SECOND};
use crate::error::{GameError, GameResult};

/// How frightened ghosts move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrightenedBehavior {
    /// A random non-reversing direction at every tile, as in the arcade.
    #[default]
    RandomWander,
    /// Run to the corner whose path stays farthest from Pac-Man.
    FleeToSafeCorner,
}

/// Who steers Pac-Man.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Autopilot {
    /// The player, through [`crate::events::GameCommand::MovePlayer`].
    #[default]
    Off,
    RandomWander,
    /// Always walk the shortest path to the nearest food.
    NearestFood,
}

/// Simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Logical ticks per second the timers are derived from
    #[serde(default = "default_tick_rate")]
    pub tick_rate: u32,
    #[serde(default = "default_start_level")]
    pub start_level: u32,
    #[serde(default = "default_lives")]
    pub lives: u32,
    /// Seed of the random generator, so that runs can be replayed
    #[serde(default)]
    pub seed: u64,
    #[serde(default)]
    pub frightened: FrightenedBehavior,
    /// Whether fleeing ghosts may pick the tiles in front of portals as safe points
    #[serde(default)]
    pub portals_are_safe: bool,
    /// Ghosts catching Pac-Man do no harm
    #[serde(default)]
    pub pacman_immortal: bool,
    #[serde(default = "default_extra_life_score")]
    pub extra_life_score: u32,
    #[serde(default)]
    pub autopilot: Autopilot,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_rate: default_tick_rate(),
            start_level: default_start_level(),
            lives: default_lives(),
            seed: 0,
            frightened: FrightenedBehavior::default(),
            portals_are_safe: false,
            pacman_immortal: false,
            extra_life_score: default_extra_life_score(),
            autopilot: Autopilot::default(),
        }
    }
}

fn default_tick_rate() -> u32 {
    TICKS_PER_SECOND
}

fn default_start_level() -> u32 {
    1
}

fn default_lives() -> u32 {
    3
}

fn default_extra_life_score() -> u32 {
    score::EXTRA_LIFE
}

impl Settings {
    /// Extracts settings from a figment, validating the values.
    pub fn from_figment(figment: Figment) -> GameResult<Settings> {
        let settings: Settings = figment.extract().map_err(|e| GameError::Config(e.to_string()))?;
        if settings.tick_rate == 0 {
            return Err(GameError::Config("tick_rate must be positive".to_string()));
        }
        if settings.start_level == 0 {
            return Err(GameError::Config("start_level is 1-based".to_string()));
        }
        Ok(settings)
    }

    /// Loads settings from `PACMAN_`-prefixed environment variables, e.g. `PACMAN_START_LEVEL=5`.
    pub fn load() -> GameResult<Settings> {
        Settings::from_figment(Figment::new().merge(Env::prefixed("PACMAN_")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::providers::Serialized;

    #[test]
    fn test_empty_figment_gives_defaults() {
        let settings = Settings::from_figment(Figment::new()).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.tick_rate, 60);
        assert_eq!(settings.lives, 3);
        assert_eq!(settings.extra_life_score, 10_000);
    }

    #[test]
    fn test_overrides() {
        let figment = Figment::new()
            .merge(Serialized::default("start_level", 5))
            .merge(Serialized::default("frightened", "flee_to_safe_corner"))
            .merge(Serialized::default("autopilot", "nearest_food"));
        let settings = Settings::from_figment(figment).unwrap();
        assert_eq!(settings.start_level, 5);
        assert_eq!(settings.frightened, FrightenedBehavior::FleeToSafeCorner);
        assert_eq!(settings.autopilot, Autopilot::NearestFood);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let figment = Figment::new().merge(Serialized::default("tick_rate", 0));
        assert!(matches!(Settings::from_figment(figment), Err(GameError::Config(_))));

        let figment = Figment::new().merge(Serialized::default("lives", "many"));
        assert!(matches!(Settings::from_figment(figment), Err(GameError::Config(_))));
    }
}
