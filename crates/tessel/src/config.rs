//! Runner configuration with layered loading
//!
//! Configuration is loaded from multiple sources (lowest to highest priority):
//! 1. Compiled defaults
//! 2. `tessel.ron` file (if exists), or the file given with `--config`
//! 3. Environment variables prefixed with `TESSEL_`
//!
//! Example environment variable: `TESSEL_SIMULATION__STEPS=2000`

use std::path::Path;

use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tessel_core::world::{Difficulty, LevelSettings};

/// Main runner configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct SimConfig {
    #[serde(default)]
    pub world: WorldConfig,

    #[serde(default)]
    pub simulation: SimulationConfig,

    #[serde(default)]
    pub spawn: SpawnConfig,

    #[serde(default)]
    pub debug: DebugConfig,
}

/// Level layout
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorldConfig {
    /// World seed; drives the layout and every step's random source
    pub seed: u64,
    /// Width in tiles
    pub width: i32,
    /// Height in tiles
    pub height: i32,
    pub depth: i32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: 12345,
            width: 48,
            height: 32,
            depth: 0,
        }
    }
}

/// Step loop settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimulationConfig {
    /// Steps to run before reporting
    pub steps: u64,
    pub difficulty: Difficulty,
    /// Destructible tiles break on the first hit
    pub creative: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            steps: 600,
            difficulty: Difficulty::Normal,
            creative: false,
        }
    }
}

impl SimulationConfig {
    pub fn level_settings(&self) -> LevelSettings {
        LevelSettings {
            difficulty: self.difficulty,
            creative: self.creative,
        }
    }
}

/// Initial population
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpawnConfig {
    pub players: u32,
    /// Passive wandering mobs
    pub mobs: u32,
    /// Hostile mobs that chase players
    pub zombies: u32,
    pub sparks: u32,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            players: 1,
            mobs: 6,
            zombies: 2,
            sparks: 4,
        }
    }
}

/// Debug/development settings
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct DebugConfig {
    /// Enable verbose logging
    pub verbose_logging: bool,
}

impl SimConfig {
    /// Load with the default `tessel.ron` lookup
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with layered priority:
    /// 1. Compiled defaults (lowest priority)
    /// 2. `path` if given (must exist), else `tessel.ron` (optional)
    /// 3. Environment variables prefixed with `TESSEL_` (highest priority)
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => File::from(path).format(FileFormat::Ron).required(true),
            None => File::with_name("tessel")
                .format(FileFormat::Ron)
                .required(false),
        };

        let builder = Config::builder()
            // Layer 1: Compiled defaults
            .set_default("world.seed", 12345_i64)?
            .set_default("world.width", 48_i64)?
            .set_default("world.height", 32_i64)?
            .set_default("world.depth", 0_i64)?
            .set_default("simulation.steps", 600_i64)?
            .set_default("simulation.difficulty", "normal")?
            .set_default("simulation.creative", false)?
            .set_default("spawn.players", 1_i64)?
            .set_default("spawn.mobs", 6_i64)?
            .set_default("spawn.zombies", 2_i64)?
            .set_default("spawn.sparks", 4_i64)?
            .set_default("debug.verbose_logging", false)?
            // Layer 2: Config file
            .add_source(file)
            // Layer 3: Environment variables (TESSEL_WORLD__SEED, etc.)
            .add_source(Environment::with_prefix("TESSEL").separator("__"));

        let config = builder.build().context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Pretty RON rendering, suitable as a starting `tessel.ron`
    pub fn to_ron(&self) -> Result<String> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .context("Failed to serialize configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = SimConfig::default();
        assert_eq!(config.world.seed, 12345);
        assert_eq!(config.world.width, 48);
        assert_eq!(config.simulation.steps, 600);
        assert_eq!(config.simulation.difficulty, Difficulty::Normal);
        assert_eq!(config.spawn.players, 1);
        assert!(!config.debug.verbose_logging);
    }

    #[test]
    fn test_load_config_with_defaults() {
        // Should load defaults when no config file exists
        let config = SimConfig::load().expect("Failed to load config");
        assert_eq!(config.world.height, 32);
        assert_eq!(config.spawn.sparks, 4);
    }

    #[test]
    fn test_load_config_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".ron").tempfile().unwrap();
        write!(
            file,
            "(world: (seed: 7, width: 20, height: 10, depth: -1), simulation: (steps: 5, difficulty: \"hard\", creative: true))"
        )
        .unwrap();

        let config = SimConfig::load_from(Some(file.path())).unwrap();
        assert_eq!(config.world.seed, 7);
        assert_eq!(config.world.depth, -1);
        assert_eq!(config.simulation.steps, 5);
        assert_eq!(config.simulation.difficulty, Difficulty::Hard);
        assert!(config.simulation.level_settings().creative);
        // Untouched sections keep their defaults
        assert_eq!(config.spawn.mobs, 6);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.ron");
        assert!(SimConfig::load_from(Some(&missing)).is_err());
    }

    #[test]
    fn test_ron_rendering_round_trips() {
        let config = SimConfig::default();
        let text = config.to_ron().unwrap();
        let parsed: SimConfig = ron::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
