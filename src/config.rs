//! Configuration for the world, the simulation loop and the window.
//!
//! Everything has a default, so an empty file (or no file at all) is a valid
//! configuration. A TOML file only needs the keys it wants to override:
//!
//! ```toml
//! [world]
//! capacity = 200
//! gravity = 0.0
//! restitution = 0.9
//!
//! [world.spawn]
//! radius = [5.0, 15.0]
//!
//! [sim]
//! spawn_per_click = 5
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, ensure};
use serde::Deserialize;

/// Ranges used when creating bodies from a spawn request.
/// Both ranges are inclusive, equal bounds give a fixed value.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SpawnConfig {
    pub radius: [f64; 2],
    pub mass: [f64; 2],
    /// Seed velocity per axis is one of {-speed, 0, +speed}
    pub speed: f64,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            radius: [25.0, 25.0],
            mass: [1.0, 1.0],
            speed: 60.0,
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct WorldConfig {
    pub width: f64,
    pub height: f64,
    pub capacity: usize,
    pub gravity: f64,
    /// Wall bounce multiplier
    pub restitution: f64,
    /// Body-body bounce coefficient, 1.0 is perfectly elastic
    pub pair_restitution: f64,
    /// y-velocities slower than this are zeroed on floor/ceiling contact
    pub settle_speed: f64,
    /// Share of a pair's overlap removed per step
    pub correction: f64,
    pub distance_bias: f64,
    pub seed: u64,
    pub spawn: SpawnConfig,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 900.0,
            capacity: 500,
            gravity: 720.0,
            restitution: 0.5,
            pair_restitution: 1.0,
            settle_speed: 30.0,
            correction: 1.0,
            distance_bias: 0.1,
            seed: 42,
            spawn: SpawnConfig::default(),
        }
    }
}

impl WorldConfig {
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.width.is_finite() && self.height.is_finite(),
            "world bounds must be finite, got {}x{}",
            self.width,
            self.height
        );
        ensure!(
            self.width > 0.0 && self.height > 0.0,
            "world bounds must be positive, got {}x{}",
            self.width,
            self.height
        );
        ensure!(self.capacity > 0, "capacity must be at least 1");
        ensure!(self.gravity.is_finite(), "gravity must be finite");
        ensure!(
            self.restitution.is_finite() && self.restitution >= 0.0,
            "restitution must be finite and not negative, got {}",
            self.restitution
        );
        ensure!(
            (0.0..=1.0).contains(&self.pair_restitution),
            "pair_restitution must be in [0, 1], got {}",
            self.pair_restitution
        );
        ensure!(
            self.settle_speed.is_finite() && self.settle_speed >= 0.0,
            "settle_speed must be finite and not negative, got {}",
            self.settle_speed
        );
        ensure!(
            self.correction > 0.0 && self.correction <= 1.0,
            "correction must be in (0, 1], got {}",
            self.correction
        );
        ensure!(
            self.distance_bias.is_finite() && self.distance_bias > 0.0,
            "distance_bias must be finite and positive, got {}",
            self.distance_bias
        );

        let [r_min, r_max] = self.spawn.radius;
        ensure!(
            r_max.is_finite() && r_min > 0.0 && r_min <= r_max,
            "spawn radius range must be finite, positive and ordered, got [{r_min}, {r_max}]"
        );
        let [m_min, m_max] = self.spawn.mass;
        ensure!(
            m_max.is_finite() && m_min > 0.0 && m_min <= m_max,
            "spawn mass range must be finite, positive and ordered, got [{m_min}, {m_max}]"
        );
        ensure!(
            self.spawn.speed.is_finite() && self.spawn.speed >= 0.0,
            "spawn speed must be finite and not negative, got {}",
            self.spawn.speed
        );

        Ok(())
    }
}

/// Highest simulation speed the front end offers
pub const MAX_SPEED: f64 = 4.0;

/// Frame loop settings
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SimConfig {
    /// Ceiling for the measured frame time fed into a step
    pub max_dt: f64,
    pub speed: f64,
    pub speed_step: f64,
    pub spawn_per_click: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            max_dt: 1.0 / 60.0,
            speed: 1.0,
            speed_step: 0.25,
            spawn_per_click: 10,
        }
    }
}

impl SimConfig {
    pub fn faster(&self, speed: f64) -> f64 {
        (speed + self.speed_step).min(MAX_SPEED)
    }

    pub fn slower(&self, speed: f64) -> f64 {
        (speed - self.speed_step).max(0.0)
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub vsync: bool,
    pub antialiasing: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "physics engine".to_string(),
            vsync: true,
            antialiasing: 0,
        }
    }
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    pub world: WorldConfig,
    pub sim: SimConfig,
}

impl Config {
    pub fn from_toml(source: &str) -> Result<Self> {
        let config: Config = toml::from_str(source).context("invalid configuration")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;

        Self::from_toml(&source).with_context(|| format!("in {}", path.display()))
    }

    pub fn validate(&self) -> Result<()> {
        self.world.validate()?;
        ensure!(
            self.sim.max_dt.is_finite() && self.sim.max_dt > 0.0,
            "max_dt must be finite and positive"
        );
        ensure!(
            self.sim.speed.is_finite() && self.sim.speed >= 0.0,
            "speed must be finite and not negative"
        );
        ensure!(
            self.sim.speed_step.is_finite() && self.sim.speed_step >= 0.0,
            "speed_step must be finite and not negative"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        Config::default().validate().unwrap();
    }

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn example_file_matches_defaults() {
        let config = Config::from_toml(include_str!("../config.example.toml")).unwrap();
        assert_eq!(config.world, WorldConfig::default());
        assert_eq!(config.window.antialiasing, 4);
    }

    #[test]
    fn partial_override() {
        let config = Config::from_toml(
            r#"
            [world]
            capacity = 20
            gravity = 0.0

            [world.spawn]
            radius = [5.0, 10.0]

            [sim]
            spawn_per_click = 3
            "#,
        )
        .unwrap();

        assert_eq!(config.world.capacity, 20);
        assert_eq!(config.world.gravity, 0.0);
        assert_eq!(config.world.spawn.radius, [5.0, 10.0]);
        assert_eq!(config.world.spawn.mass, [1.0, 1.0]);
        assert_eq!(config.world.restitution, 0.5);
        assert_eq!(config.sim.spawn_per_click, 3);
    }

    #[test]
    fn rejects_non_positive_radius() {
        let err = Config::from_toml("[world.spawn]\nradius = [0.0, 4.0]\n").unwrap_err();
        assert!(format!("{err:#}").contains("radius"));
    }

    #[test]
    fn rejects_unordered_mass_range() {
        assert!(Config::from_toml("[world.spawn]\nmass = [3.0, 1.0]\n").is_err());
    }

    #[test]
    fn rejects_infinite_values() {
        for source in [
            "[world.spawn]\nradius = [1.0, inf]\n",
            "[world.spawn]\nmass = [1.0, inf]\n",
            "[world.spawn]\nspeed = inf\n",
            "[world]\nrestitution = inf\n",
            "[world]\nwidth = inf\n",
            "[world]\nheight = inf\n",
            "[world]\nsettle_speed = inf\n",
            "[world]\ndistance_bias = inf\n",
            "[world]\ngravity = nan\n",
            "[sim]\nspeed = inf\n",
        ] {
            assert!(Config::from_toml(source).is_err(), "accepted {source:?}");
        }
    }

    #[test]
    fn speed_steps_stay_in_slider_range() {
        let sim = SimConfig::default();

        assert_eq!(sim.faster(1.0), 1.25);
        assert_eq!(sim.faster(3.9), MAX_SPEED);
        assert_eq!(sim.faster(MAX_SPEED), MAX_SPEED);
        assert_eq!(sim.slower(0.1), 0.0);
        assert_eq!(sim.slower(2.0), 1.75);
    }

    #[test]
    fn rejects_zero_capacity() {
        assert!(Config::from_toml("[world]\ncapacity = 0\n").is_err());
    }
}
