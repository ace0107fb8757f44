//! Pairwise Newtonian gravity between two bodies.
//!
//! The force on `target` from `source` is computed in the form
//! `G * m_t * m_s / |d|^3 * d` with `d = source - target`, i.e. the scalar
//! factor is applied to the unnormalised displacement. Rewriting it as
//! `G * m_t * m_s / |d|^2 * d_hat` rounds differently, so the form is kept.

use crate::error::{SimError, SimResult};
use crate::simulation::states::{Body, NVec2};

/// Gravitational constant in m^3 kg^-1 s^-2
pub const G: f64 = 6.67430e-11;

/// What to do when two bodies end up at (or near) the same position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Singularity {
    /// Fail with `SimError::DegenerateConfiguration` on a zero separation.
    Reject,
    /// Use `max(|d|, min_distance)` in the denominator.
    /// Coincident bodies exert no force on each other since `d` is zero.
    Clamp { min_distance: f64 },
    /// No guard. A zero separation yields NaN components.
    Unguarded,
}

impl Singularity {
    /// Clamp policy, rejecting a `min_distance` that is not positive and finite
    pub fn clamp(min_distance: f64) -> SimResult<Self> {
        if !(min_distance.is_finite() && min_distance > 0.0) {
            return Err(SimError::InvalidMinDistance(min_distance));
        }
        Ok(Singularity::Clamp { min_distance })
    }
}

impl Default for Singularity {
    fn default() -> Self {
        Singularity::Reject
    }
}

/// Direct Newtonian gravity with an explicit gravitational constant
#[allow(non_snake_case)]
#[derive(Debug, Clone, Copy)]
pub struct NewtonianGravity {
    pub G: f64, // gravitational constant
    pub singularity: Singularity,
}

impl NewtonianGravity {
    pub fn new(singularity: Singularity) -> Self {
        Self { G, singularity }
    }

    /// Same law with a different constant, mostly for scaled test systems
    pub fn with_constant(g: f64, singularity: Singularity) -> Self {
        Self { G: g, singularity }
    }

    /// Force exerted on `target` by `source`, in newtons.
    pub fn pair_force(&self, target: &Body, source: &Body) -> SimResult<NVec2> {
        // displacement from target to source, target is pulled along +d
        let d = source.position() - target.position();
        let mut dist = d.norm();

        match self.singularity {
            Singularity::Reject if dist == 0.0 => {
                return Err(SimError::DegenerateConfiguration {
                    a: target.name().to_string(),
                    b: source.name().to_string(),
                });
            }
            Singularity::Clamp { min_distance } => {
                if dist == 0.0 {
                    return Ok(NVec2::zeros());
                }
                dist = dist.max(min_distance);
            }
            _ => {}
        }

        let factor = self.G * target.mass() * source.mass() / dist.powf(3.0);
        Ok(factor * d)
    }
}

impl Default for NewtonianGravity {
    fn default() -> Self {
        Self::new(Singularity::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(name: &str, x: f64, y: f64, m: f64) -> Body {
        Body::new(NVec2::new(x, y), NVec2::zeros(), m, 0.0, name).unwrap()
    }

    #[test]
    fn unit_masses_unit_distance_give_g() {
        let gravity = NewtonianGravity::with_constant(1.0, Singularity::Reject);
        let f = gravity.pair_force(&body("A", 0.0, 0.0, 1.0), &body("B", 1.0, 0.0, 1.0)).unwrap();
        assert_eq!(f, NVec2::new(1.0, 0.0));
    }

    #[test]
    fn inverse_square_law() {
        let gravity = NewtonianGravity::with_constant(1.0, Singularity::Reject);
        let a = body("A", 0.0, 0.0, 1.0);
        let f_r = gravity.pair_force(&a, &body("B", 1.0, 0.0, 1.0)).unwrap();
        let f_2r = gravity.pair_force(&a, &body("B", 2.0, 0.0, 1.0)).unwrap();
        assert!((f_r.norm() / f_2r.norm() - 4.0).abs() < 1e-12);
    }

    #[test]
    fn reject_policy_errors_on_coincident_bodies() {
        let gravity = NewtonianGravity::default();
        let err = gravity.pair_force(&body("A", 1.0, 1.0, 1.0), &body("B", 1.0, 1.0, 1.0)).unwrap_err();
        assert_eq!(err, SimError::DegenerateConfiguration { a: "A".into(), b: "B".into() });
    }

    #[test]
    fn clamp_policy_bounds_close_encounters() {
        let gravity = NewtonianGravity::with_constant(1.0, Singularity::Clamp { min_distance: 1.0 });
        let a = body("A", 0.0, 0.0, 1.0);
        let f = gravity.pair_force(&a, &body("B", 1e-9, 0.0, 1.0)).unwrap();
        assert!(f.norm() <= 1e-9, "clamped force too large: {}", f.norm());

        let f = gravity.pair_force(&a, &body("B", 0.0, 0.0, 1.0)).unwrap();
        assert_eq!(f, NVec2::zeros());
    }

    #[test]
    fn clamp_distance_must_be_positive() {
        for d in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(Singularity::clamp(d), Err(SimError::InvalidMinDistance(_))), "{} accepted", d);
        }
        assert_eq!(Singularity::clamp(1.0e3).unwrap(), Singularity::Clamp { min_distance: 1.0e3 });
    }

    #[test]
    fn unguarded_policy_produces_non_finite_force() {
        let gravity = NewtonianGravity::new(Singularity::Unguarded);
        let f = gravity.pair_force(&body("A", 0.0, 0.0, 1.0), &body("B", 0.0, 0.0, 1.0)).unwrap();
        assert!(!f.x.is_finite());
    }
}
