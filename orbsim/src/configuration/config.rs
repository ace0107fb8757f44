//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! scenario. A scenario consists of:
//!
//! - [`EngineConfig`]     – frame clock (substep size, substeps per frame, tick rate)
//! - [`ParametersConfig`] – numerical policy (zero-distance handling)
//! - [`TrailConfig`]      – trail capacity, reference body and screen-space policy
//! - [`BodyConfig`]       – initial state for each body
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//!
//! ```yaml
//! engine:
//!   dt: 60.0                # seconds per substep
//!   substeps: 200           # substeps per rendered frame
//!   tick_hz: 100.0          # render ticks per real second
//!
//! parameters:
//!   singularity: reject     # or "unguarded", or { clamp: 1.0e3 }
//!
//! trails:
//!   capacity: 400
//!   reference: Earth        # body the view is centred on
//!   scale: 2.0e6            # meters per pixel
//!   screen_space: [Moon]    # bodies whose trail stores projected points
//!
//! bodies:
//!   - name: Earth
//!     x: [149598023000.0, 0.0]
//!     v: [0.0, 28000.0]
//!     m: 5.9722e24
//!     radius: 6378000.0
//!   - name: Moon
//!     parent: Earth         # x and v are offsets from Earth
//!     x: [384402000.0, 0.0]
//!     v: [0.0, 1022.0]
//!     m: 7.342e22
//!     radius: 1737000.0
//! ```
//!
//! The gravitational constant is not part of the file: it is a fixed
//! process-wide value held by the integrator.

use serde::Deserialize;

use crate::simulation::engine::{DEFAULT_DT, DEFAULT_SUBSTEPS, DEFAULT_TICK_HZ};
use crate::visualization::projection::DEFAULT_SCALE;
use crate::visualization::trail::DEFAULT_TRAIL_CAPACITY;

/// Zero-distance policy as written in YAML
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SingularityConfig {
    #[default]
    Reject, // fail the step with a degenerate-configuration error
    Clamp(f64), // minimum separation in meters
    Unguarded, // no guard, non-finite results on contact
}

/// Frame clock configuration
#[derive(Deserialize, Debug, Clone)]
pub struct EngineConfig {
    #[serde(default = "default_dt")]
    pub dt: f64, // seconds per substep
    #[serde(default = "default_substeps")]
    pub substeps: usize, // substeps per frame
    #[serde(default = "default_tick_hz")]
    pub tick_hz: f64, // timer ticks per real second
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            dt: DEFAULT_DT,
            substeps: DEFAULT_SUBSTEPS,
            tick_hz: DEFAULT_TICK_HZ,
        }
    }
}

/// Numerical policy
#[derive(Deserialize, Debug, Clone, Default)]
pub struct ParametersConfig {
    // `clamp: 1.0e3` is a one-key map, unit variants stay plain strings
    #[serde(default, with = "serde_yaml::with::singleton_map")]
    pub singularity: SingularityConfig,
}

/// Trail recording policy
#[derive(Deserialize, Debug, Clone)]
pub struct TrailConfig {
    #[serde(default = "default_capacity")]
    pub capacity: usize, // positions kept per body
    pub reference: Option<String>, // body the view is centred on, defaults to the first body
    #[serde(default = "default_scale")]
    pub scale: f64, // meters per pixel
    #[serde(default)]
    pub screen_space: Vec<String>, // bodies that record projected positions
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_TRAIL_CAPACITY,
            reference: None,
            scale: DEFAULT_SCALE,
            screen_space: Vec::new(),
        }
    }
}

/// Configuration for a single body's initial state
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    pub name: String, // unique name
    #[serde(default)]
    pub parent: Option<String>, // when set, x and v are relative to this body
    pub x: Vec<f64>, // position in meters
    pub v: Vec<f64>, // velocity in m/s
    pub m: f64, // mass in kg
    #[serde(default)]
    pub radius: f64, // meters, only used for drawing
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub parameters: ParametersConfig,
    #[serde(default)]
    pub trails: TrailConfig,
    pub bodies: Vec<BodyConfig>,
}

fn default_dt() -> f64 {
    DEFAULT_DT
}

fn default_substeps() -> usize {
    DEFAULT_SUBSTEPS
}

fn default_tick_hz() -> f64 {
    DEFAULT_TICK_HZ
}

fn default_capacity() -> usize {
    DEFAULT_TRAIL_CAPACITY
}

fn default_scale() -> f64 {
    DEFAULT_SCALE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_file_uses_defaults() {
        let yaml = "
bodies:
  - name: Sun
    x: [0.0, 0.0]
    v: [0.0, 0.0]
    m: 1.98847e30
";
        let cfg: ScenarioConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.engine.dt, 60.0);
        assert_eq!(cfg.engine.substeps, 200);
        assert_eq!(cfg.trails.capacity, 400);
        assert_eq!(cfg.parameters.singularity, SingularityConfig::Reject);
        assert_eq!(cfg.bodies[0].radius, 0.0);
        assert!(cfg.bodies[0].parent.is_none());
    }

    #[test]
    fn parses_singularity_variants() {
        let p: ParametersConfig = serde_yaml::from_str("singularity: unguarded").unwrap();
        assert_eq!(p.singularity, SingularityConfig::Unguarded);

        let p: ParametersConfig = serde_yaml::from_str("singularity:\n  clamp: 1000.0").unwrap();
        assert_eq!(p.singularity, SingularityConfig::Clamp(1000.0));

        let p: ParametersConfig = serde_yaml::from_str("singularity: { clamp: 2.5e6 }").unwrap();
        assert_eq!(p.singularity, SingularityConfig::Clamp(2.5e6));

        let p: ParametersConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(p.singularity, SingularityConfig::Reject);
    }
}
