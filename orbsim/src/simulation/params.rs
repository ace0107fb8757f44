//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds runtime settings:
//! - the gravitational constant used by the integrator,
//! - the policy for zero-distance pairs

use crate::simulation::forces::{Singularity, G};

#[allow(non_snake_case)]
#[derive(Debug, Clone)]
pub struct Parameters {
    pub G: f64, // gravitational constant
    pub singularity: Singularity, // zero-distance handling
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            G,
            singularity: Singularity::default(),
        }
    }
}
