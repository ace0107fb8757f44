pub mod error;
pub mod simulation;
pub mod configuration;
pub mod visualization;
pub mod benchmark;

pub use error::{SimError, SimResult};

pub use simulation::states::{Body, System, NVec2};
pub use simulation::forces::{NewtonianGravity, Singularity, G};
pub use simulation::integrator::Integrator;
pub use simulation::engine::Engine;
pub use simulation::params::Parameters;
pub use simulation::scenario::Scenario;

pub use configuration::config::{EngineConfig, ParametersConfig, TrailConfig, BodyConfig, ScenarioConfig, SingularityConfig};

pub use visualization::trail::{Trail, TrailPolicy, TrailSet, TrailSpace, DEFAULT_TRAIL_CAPACITY};
pub use visualization::projection::{Viewport, DEFAULT_SCALE};
pub use visualization::headless::run_headless;

pub use benchmark::benchmark::{bench_step, bench_frame, bench_step_curve};
