//! Error type shared by the simulation, configuration and trail layers.

use std::fmt;

/// Errors raised while building or advancing a simulation.
#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    /// Mass was zero, negative, or not finite.
    InvalidMass { name: String, mass: f64 },
    /// Radius was negative or not finite.
    InvalidRadius { name: String, radius: f64 },
    /// Two bodies occupy the same position and the active policy rejects it.
    DegenerateConfiguration { a: String, b: String },
    /// No body with this name exists in the simulation set.
    NotFound { name: String },
    /// Two bodies in one simulation set share a name.
    DuplicateName { name: String },
    /// A configured vector did not have exactly two components.
    InvalidVector { name: String, field: &'static str, len: usize },
    /// Timestep was zero, negative, or not finite.
    InvalidTimestep(f64),
    /// Render tick rate was zero, negative, or not finite.
    InvalidTickRate(f64),
    /// A frame must run at least one substep.
    InvalidSubsteps(usize),
    /// Clamp distance was zero, negative, or not finite.
    InvalidMinDistance(f64),
    /// Trails were recorded against a system whose bodies do not match them.
    TrailMismatch { expected: String, found: String },
    /// Trail capacity was zero.
    InvalidCapacity(usize),
    /// Projection scale was zero, negative, or not finite.
    InvalidScale(f64),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::InvalidMass { name, mass } => {
                write!(f, "body '{}' has invalid mass {} (must be positive and finite)", name, mass)
            }
            SimError::InvalidRadius { name, radius } => {
                write!(f, "body '{}' has invalid radius {} (must be non-negative and finite)", name, radius)
            }
            SimError::DegenerateConfiguration { a, b } => {
                write!(f, "bodies '{}' and '{}' are at the same position", a, b)
            }
            SimError::NotFound { name } => write!(f, "no body named '{}'", name),
            SimError::DuplicateName { name } => write!(f, "body name '{}' is used more than once", name),
            SimError::InvalidVector { name, field, len } => {
                write!(f, "body '{}': field '{}' needs 2 components, got {}", name, field, len)
            }
            SimError::InvalidTimestep(dt) => write!(f, "invalid timestep {}", dt),
            SimError::InvalidTickRate(hz) => write!(f, "invalid tick rate {} Hz", hz),
            SimError::InvalidSubsteps(n) => write!(f, "invalid substep count {} (must be at least 1)", n),
            SimError::InvalidMinDistance(d) => {
                write!(f, "invalid clamp distance {} (must be positive and finite)", d)
            }
            SimError::TrailMismatch { expected, found } => {
                write!(f, "trail for '{}' was fed body '{}'", expected, found)
            }
            SimError::InvalidCapacity(cap) => write!(f, "invalid trail capacity {}", cap),
            SimError::InvalidScale(scale) => write!(f, "invalid projection scale {}", scale),
        }
    }
}

impl std::error::Error for SimError {}

pub type SimResult<T> = Result<T, SimError>;
