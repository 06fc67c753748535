//! Configuration for the ecosystem simulation.
//!
//! Supports YAML configuration files with sensible defaults. Every tuning
//! constant the behavior code needs lives here as a named field, so test
//! scenarios can be reproduced with fixed inputs.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub world: WorldConfig,
    pub grass: GrassConfig,
    pub sheep: SheepConfig,
    pub wolves: WolfConfig,
    pub logging: LoggingConfig,
}

/// World/boundary configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Default world width, used until the host supplies real bounds
    pub width: f32,
    /// Default world height
    pub height: f32,
    /// Wall clearance added to an entity's radius when clamping
    pub bounds_padding: f32,
    /// Distance past a wall beyond which an entity is killed instead of
    /// clamped (the boundary moved over it)
    pub kill_threshold: f32,
    /// Inset from the walls for random placement
    pub spawn_margin: f32,
}

/// Grass (resource) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GrassConfig {
    /// Tufts created at world init
    pub initial_count: usize,
    /// Maximum stored energy per tuft
    pub max_energy: f32,
    /// Energy regenerated per second
    pub regen: f32,
    /// Collision/visual radius
    pub radius: f32,
    /// Per-tick probability of one new tuft appearing
    pub spawn_chance: f32,
    /// Maximum energy a grazer takes in one bite
    pub bite: f32,
}

/// Sheep (prey) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SheepConfig {
    /// Sheep created at world init
    pub initial_count: usize,
    pub max_energy: f32,
    /// Full movement speed, units per second
    pub speed: f32,
    /// Energy burned per second
    pub hunger: f32,
    /// Collision/visual radius
    pub radius: f32,
    /// Range at which grass can be detected
    pub vision_radius: f32,
    /// Range at which a wolf triggers fleeing; fleeing pre-empts foraging
    pub panic_radius: f32,
    /// Speed multiplier while fleeing (> 1)
    pub flee_factor: f32,
    /// Fraction of full speed used while wandering
    pub wander_factor: f32,
    /// Contact distance for grazing
    pub eat_radius: f32,
    /// Minimum energy to be eligible for reproduction
    pub reproduction_threshold: f32,
    /// Energy each parent pays on reproduction
    pub reproduction_cost: f32,
    /// Seconds before a parent may reproduce again
    pub reproduction_cooldown: f32,
    /// Contact distance for pairing
    pub reproduction_radius: f32,
    /// Tufts eaten before a juvenile matures
    pub growth_threshold: u32,
    /// Speed/max-energy/radius multiplier applied on maturing
    pub adult_factor: f32,
}

/// Wolf (predator) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WolfConfig {
    /// Wolves created at world init
    pub initial_count: usize,
    pub max_energy: f32,
    /// Full movement speed, units per second
    pub speed: f32,
    /// Energy burned per second (higher than sheep)
    pub hunger: f32,
    /// Collision/visual radius
    pub radius: f32,
    /// Range at which sheep can be detected (wider than sheep panic range)
    pub vision_radius: f32,
    /// Fraction of full speed used while wandering
    pub wander_factor: f32,
    /// Contact distance for a kill
    pub eat_radius: f32,
    /// Energy gained per kill, capped at max
    pub feed_energy: f32,
    pub reproduction_threshold: f32,
    pub reproduction_cost: f32,
    pub reproduction_cooldown: f32,
    pub reproduction_radius: f32,
    /// Kills before a juvenile matures
    pub growth_threshold: u32,
    pub adult_factor: f32,
}

/// Logging and stats configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Ticks between stats history records
    pub stats_interval: u64,
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            grass: GrassConfig::default(),
            sheep: SheepConfig::default(),
            wolves: WolfConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
            bounds_padding: 2.0,
            kill_threshold: 50.0,
            spawn_margin: 40.0,
        }
    }
}

impl Default for GrassConfig {
    fn default() -> Self {
        Self {
            initial_count: 8,
            max_energy: 100.0,
            regen: 30.0,
            radius: 8.0,
            spawn_chance: 0.02,
            bite: 30.0,
        }
    }
}

impl Default for SheepConfig {
    fn default() -> Self {
        Self {
            initial_count: 5,
            max_energy: 100.0,
            speed: 45.0,
            hunger: 10.0,
            radius: 12.0,
            vision_radius: 250.0,
            panic_radius: 120.0,
            flee_factor: 1.5,
            wander_factor: 0.5,
            eat_radius: 15.0,
            reproduction_threshold: 60.0,
            reproduction_cost: 30.0,
            reproduction_cooldown: 8.0,
            reproduction_radius: 30.0,
            growth_threshold: 5,
            adult_factor: 1.25,
        }
    }
}

impl Default for WolfConfig {
    fn default() -> Self {
        Self {
            initial_count: 3,
            max_energy: 120.0,
            speed: 90.0,
            hunger: 15.0,
            radius: 15.0,
            vision_radius: 200.0,
            wander_factor: 0.6,
            eat_radius: 30.0,
            feed_energy: 90.0,
            reproduction_threshold: 90.0,
            reproduction_cost: 40.0,
            reproduction_cooldown: 12.0,
            reproduction_radius: 30.0,
            growth_threshold: 3,
            adult_factor: 1.2,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            stats_interval: 60,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.sheep.initial_count == 0 {
            return Err("sheep initial_count must be > 0".to_string());
        }
        if self.sheep.max_energy <= 0.0 || self.wolves.max_energy <= 0.0 {
            return Err("max_energy must be > 0".to_string());
        }
        if self.grass.max_energy <= 0.0 {
            return Err("grass max_energy must be > 0".to_string());
        }
        if self.sheep.flee_factor < 1.0 {
            return Err("flee_factor must be >= 1".to_string());
        }
        if !(0.0..=1.0).contains(&self.grass.spawn_chance) {
            return Err("grass spawn_chance must be in [0, 1]".to_string());
        }
        if self.world.kill_threshold <= 0.0 {
            return Err("kill_threshold must be > 0".to_string());
        }
        if self.sheep.adult_factor < 1.0 || self.wolves.adult_factor < 1.0 {
            return Err("adult_factor must be >= 1".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let loaded: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(config.sheep.speed, loaded.sheep.speed);
        assert_eq!(config.wolves.vision_radius, loaded.wolves.vision_radius);
        assert_eq!(config.grass.initial_count, loaded.grass.initial_count);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let loaded: Config = serde_yaml::from_str("sheep:\n  speed: 60.0\n").unwrap();
        assert_eq!(loaded.sheep.speed, 60.0);
        assert_eq!(loaded.wolves.speed, WolfConfig::default().speed);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = Config::default();
        config.sheep.initial_count = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.grass.spawn_chance = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_wolves_see_farther_than_sheep_panic() {
        // Predators detect prey before prey detect danger.
        let config = Config::default();
        assert!(config.wolves.vision_radius > config.sheep.panic_radius);
    }
}
