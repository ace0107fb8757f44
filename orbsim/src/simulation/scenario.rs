//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime bundle
//! `Scenario` containing:
//! - frame clock settings (`Engine`)
//! - numerical parameters (`Parameters`)
//! - system state (`System` with bodies at t = 0)
//! - the integrator built from those parameters
//! - the viewport and trails fed after every frame
//!
//! The render driver owns the scenario exclusively and calls [`Scenario::tick`]
//! once per timer tick, reading bodies and trails only after it returns.

use log::{debug, info};

use crate::configuration::config::{BodyConfig, ScenarioConfig, SingularityConfig};
use crate::error::{SimError, SimResult};
use crate::simulation::engine::Engine;
use crate::simulation::forces::{Singularity, G};
use crate::simulation::integrator::Integrator;
use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, NVec2, System};
use crate::visualization::projection::Viewport;
use crate::visualization::trail::{TrailPolicy, TrailSet};

#[derive(Debug, Clone)]
pub struct Scenario {
    engine: Engine,
    parameters: Parameters,
    system: System,
    integrator: Integrator,
    viewport: Viewport,
    trails: TrailSet,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> SimResult<Self> {
        // Bodies: map `BodyConfig` -> runtime `Body`, resolving parents
        // against bodies listed earlier in the file
        let mut bodies: Vec<Body> = Vec::with_capacity(cfg.bodies.len());
        for bc in &cfg.bodies {
            let body = build_body(bc, &bodies)?;
            bodies.push(body);
        }
        let system = System::new(bodies)?;

        let parameters = Parameters {
            G,
            singularity: match cfg.parameters.singularity {
                SingularityConfig::Reject => Singularity::Reject,
                SingularityConfig::Clamp(min_distance) => Singularity::clamp(min_distance)?,
                SingularityConfig::Unguarded => Singularity::Unguarded,
            },
        };

        let e_cfg = cfg.engine;
        let engine = Engine::new(e_cfg.dt, e_cfg.substeps, e_cfg.tick_hz)?;

        let integrator = Integrator::from_parameters(&parameters);

        // Viewport centred on the configured body, or the first one
        let t_cfg = cfg.trails;
        let reference = t_cfg
            .reference
            .clone()
            .or_else(|| system.bodies().first().map(|b| b.name().to_string()))
            .unwrap_or_default();
        if !system.is_empty() {
            system.index_of(&reference)?;
        }
        let viewport = Viewport::new(reference, t_cfg.scale, NVec2::zeros())?;

        let policy = TrailPolicy::new(t_cfg.screen_space);
        let trails = TrailSet::new(&system, t_cfg.capacity, &policy)?;

        info!(
            "scenario: {} bodies, dt = {} s, {} substeps per frame, singularity = {:?}",
            system.len(),
            engine.dt,
            engine.substeps,
            parameters.singularity
        );

        Ok(Self {
            engine,
            parameters,
            system,
            integrator,
            viewport,
            trails,
        })
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Parameters the integrator was built from
    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn system(&self) -> &System {
        &self.system
    }

    pub fn integrator(&self) -> &Integrator {
        &self.integrator
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn trails(&self) -> &TrailSet {
        &self.trails
    }

    /// Advance one rendered frame using the engine's `dt` and `substeps`
    pub fn advance_frame(&mut self) -> SimResult<()> {
        self.integrator
            .advance_frame(&mut self.system, self.engine.dt, self.engine.substeps)
    }

    /// One timer tick: advance a frame, then append every body to its trail.
    ///
    /// A failed frame is returned before the trails are touched.
    pub fn tick(&mut self) -> SimResult<()> {
        self.advance_frame()?;
        self.trails.record(&self.system, &self.viewport)?;
        debug!("tick done, t = {} s", self.system.t);
        Ok(())
    }
}

fn vec2(name: &str, field: &'static str, v: &[f64]) -> SimResult<NVec2> {
    match v {
        [x, y] => Ok(NVec2::new(*x, *y)),
        _ => Err(SimError::InvalidVector {
            name: name.to_string(),
            field,
            len: v.len(),
        }),
    }
}

fn build_body(bc: &BodyConfig, earlier: &[Body]) -> SimResult<Body> {
    let mut x = vec2(&bc.name, "x", &bc.x)?;
    let mut v = vec2(&bc.name, "v", &bc.v)?;

    if let Some(parent) = &bc.parent {
        let p = earlier
            .iter()
            .find(|b| b.name() == parent)
            .ok_or_else(|| SimError::NotFound { name: parent.clone() })?;
        x += p.position();
        v += p.velocity();
    }

    Body::new(x, v, bc.m, bc.radius, bc.name.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(yaml: &str) -> ScenarioConfig {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn parent_offsets_are_resolved() {
        let s = Scenario::build_scenario(cfg("
bodies:
  - { name: Earth, x: [10.0, 0.0], v: [0.0, 5.0], m: 1.0 }
  - { name: Moon, parent: Earth, x: [2.0, 0.0], v: [0.0, 1.0], m: 1.0 }
"))
        .unwrap();
        let moon = s.system().get("Moon").unwrap();
        assert_eq!(moon.position(), NVec2::new(12.0, 0.0));
        assert_eq!(moon.velocity(), NVec2::new(0.0, 6.0));
        assert_eq!(s.viewport().reference(), "Earth");
    }

    #[test]
    fn unknown_parent_is_not_found() {
        let err = Scenario::build_scenario(cfg("
bodies:
  - { name: Moon, parent: Earth, x: [2.0, 0.0], v: [0.0, 1.0], m: 1.0 }
"))
        .unwrap_err();
        assert_eq!(err, SimError::NotFound { name: "Earth".into() });
    }

    #[test]
    fn wrong_vector_length_is_rejected() {
        let err = Scenario::build_scenario(cfg("
bodies:
  - { name: Earth, x: [1.0, 0.0, 0.0], v: [0.0, 1.0], m: 1.0 }
"))
        .unwrap_err();
        assert_eq!(err, SimError::InvalidVector { name: "Earth".into(), field: "x", len: 3 });
    }

    #[test]
    fn invalid_mass_never_enters_the_set() {
        let err = Scenario::build_scenario(cfg("
bodies:
  - { name: Dust, x: [0.0, 0.0], v: [0.0, 0.0], m: 0.0 }
"))
        .unwrap_err();
        assert!(matches!(err, SimError::InvalidMass { .. }));
    }

    #[test]
    fn unknown_reference_is_not_found() {
        let err = Scenario::build_scenario(cfg("
trails:
  reference: Pluto
bodies:
  - { name: Earth, x: [0.0, 0.0], v: [0.0, 0.0], m: 1.0 }
"))
        .unwrap_err();
        assert_eq!(err, SimError::NotFound { name: "Pluto".into() });
    }

    #[test]
    fn tick_feeds_every_trail() {
        let mut s = Scenario::build_scenario(cfg("
engine: { dt: 1.0, substeps: 3 }
bodies:
  - { name: A, x: [0.0, 0.0], v: [1.0, 0.0], m: 1.0 }
"))
        .unwrap();
        s.tick().unwrap();
        s.tick().unwrap();
        assert_eq!(s.system().t, 6.0);
        let trail = s.trails().get("A").unwrap();
        assert_eq!(trail.len(), 2);
        assert_eq!(trail.latest(), Some(NVec2::new(6.0, 0.0)));
    }

    #[test]
    fn non_positive_clamp_distance_is_rejected() {
        let err = Scenario::build_scenario(cfg("
parameters:
  singularity:
    clamp: -5.0
bodies:
  - { name: A, x: [0.0, 0.0], v: [0.0, 0.0], m: 1.0 }
"))
        .unwrap_err();
        assert_eq!(err, SimError::InvalidMinDistance(-5.0));
    }

    #[test]
    fn parameters_match_the_integrator() {
        let s = Scenario::build_scenario(cfg("
parameters:
  singularity: { clamp: 1.0e3 }
bodies:
  - { name: A, x: [0.0, 0.0], v: [0.0, 0.0], m: 1.0 }
"))
        .unwrap();
        assert_eq!(s.parameters().singularity, Singularity::Clamp { min_distance: 1.0e3 });
        assert_eq!(s.integrator().singularity(), s.parameters().singularity);
        assert_eq!(s.integrator().gravity().G, s.parameters().G);
    }
}
