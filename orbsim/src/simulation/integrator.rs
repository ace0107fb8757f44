//! Fixed-step time integration for the simulation set
//!
//! One `step` runs two phases that never interleave:
//! 1. every body accumulates gravity from every *other* body (ordered pairs,
//!    so each unordered pair is evaluated from both sides) against the same
//!    snapshot of positions,
//! 2. every body integrates with semi-implicit Euler and clears its force.
//!
//! `advance_frame` repeats `step` a fixed number of times to cover one
//! rendered frame. There is no error control, so `dt` has to stay small
//! relative to the shortest orbital period in the system.

use log::debug;

use super::forces::{NewtonianGravity, Singularity};
use super::params::Parameters;
use super::states::System;
use crate::error::SimResult;

#[derive(Debug, Clone, Default)]
pub struct Integrator {
    gravity: NewtonianGravity,
}

impl Integrator {
    pub fn new(gravity: NewtonianGravity) -> Self {
        Self { gravity }
    }

    pub fn from_parameters(params: &Parameters) -> Self {
        Self::new(NewtonianGravity::with_constant(params.G, params.singularity))
    }

    pub fn gravity(&self) -> &NewtonianGravity {
        &self.gravity
    }

    pub fn singularity(&self) -> Singularity {
        self.gravity.singularity
    }

    /// Advance the system by one step of `dt` seconds.
    ///
    /// If a pair fails (zero separation under `Singularity::Reject`), every
    /// force accumulator is cleared and positions and velocities are left
    /// exactly as they were before the call. The error is returned, not logged.
    pub fn step(&self, sys: &mut System, dt: f64) -> SimResult<()> {
        let n = sys.len();
        if n == 0 { // no bodies, return
            return Ok(());
        }

        // Phase 1: accumulate forces for all ordered pairs (i, j), i != j
        for i in 0..n {
            for j in 0..n {
                if i == j {
                    continue;
                }
                let (a, b) = sys.pair_mut(i, j);
                if let Err(e) = a.accumulate_gravity_from(b, &self.gravity) {
                    for body in sys.bodies_mut() {
                        body.clear_force();
                    }
                    return Err(e);
                }
            }
        }

        // Phase 2: kick then drift every body, forces are zeroed on the way
        for body in sys.bodies_mut() {
            body.integrate(dt);
        }

        sys.t += dt;
        Ok(())
    }

    /// Run `substeps` consecutive steps of `dt` seconds.
    ///
    /// Stops at the first failing step. Steps completed before it stay applied.
    pub fn advance_frame(&self, sys: &mut System, dt: f64, substeps: usize) -> SimResult<()> {
        for _ in 0..substeps {
            self.step(sys, dt)?;
        }
        debug!("frame advanced {} x {} s, t = {} s", substeps, dt, sys.t);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SimError;
    use crate::simulation::states::{Body, NVec2};

    fn body(name: &str, x: f64, m: f64) -> Body {
        Body::new(NVec2::new(x, 0.0), NVec2::zeros(), m, 0.0, name).unwrap()
    }

    fn unit_integrator() -> Integrator {
        Integrator::new(NewtonianGravity::with_constant(1.0, Singularity::Reject))
    }

    #[test]
    fn forces_use_pre_step_positions() {
        // A at 0, B at 1, C at 3. All unit masses, G = 1.
        let mut sys = System::new(vec![body("A", 0.0, 1.0), body("B", 1.0, 1.0), body("C", 3.0, 1.0)]).unwrap();
        unit_integrator().step(&mut sys, 1.0).unwrap();

        // Forces from the initial snapshot only:
        // A: +1 + 1/9, B: -1 + 1/4, C: -1/9 - 1/4
        let expected = [1.0 + 1.0 / 9.0, -1.0 + 0.25, -1.0 / 9.0 - 0.25];
        for (b, f) in sys.bodies().iter().zip(expected) {
            assert!((b.velocity().x - f).abs() < 1e-12, "{}: {} != {}", b.name(), b.velocity().x, f);
        }
    }

    #[test]
    fn step_advances_time_and_clears_forces() {
        let mut sys = System::new(vec![body("A", 0.0, 1.0), body("B", 1.0, 1.0)]).unwrap();
        unit_integrator().advance_frame(&mut sys, 0.01, 5).unwrap();
        assert!((sys.t - 0.05).abs() < 1e-15);
        assert!(sys.bodies().iter().all(|b| b.accumulated_force() == NVec2::zeros()));
    }

    #[test]
    fn failed_step_leaves_state_untouched() {
        let mut sys = System::new(vec![body("A", 0.0, 1.0), body("B", 2.0, 1.0), body("C", 2.0, 1.0)]).unwrap();
        let before = sys.clone();

        let err = unit_integrator().step(&mut sys, 1.0).unwrap_err();
        assert!(matches!(err, SimError::DegenerateConfiguration { .. }));

        for (now, then) in sys.bodies().iter().zip(before.bodies()) {
            assert_eq!(now.position(), then.position());
            assert_eq!(now.velocity(), then.velocity());
            assert_eq!(now.accumulated_force(), NVec2::zeros());
        }
        assert_eq!(sys.t, 0.0);
    }

    #[test]
    fn empty_system_is_a_no_op() {
        let mut sys = System::new(Vec::new()).unwrap();
        unit_integrator().advance_frame(&mut sys, 1.0, 10).unwrap();
        assert_eq!(sys.t, 0.0);
    }
}
