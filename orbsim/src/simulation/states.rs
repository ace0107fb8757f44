//! Core state types for the orbit simulation.
//!
//! - `Body`   one point mass with its transient force accumulator
//! - `System` the ordered simulation set plus elapsed simulated time `t`
//!
//! Bodies are built through [`Body::new`], which rejects non-positive mass,
//! so the division in [`Body::integrate`] never sees a zero.

use std::fmt;

use nalgebra::Vector2;

use crate::error::{SimError, SimResult};
use crate::simulation::forces::NewtonianGravity;

pub type NVec2 = Vector2<f64>;

#[derive(Debug, Clone)]
pub struct Body {
    name: String,
    position: NVec2, // m
    velocity: NVec2, // m/s
    mass: f64,       // kg
    force: NVec2,    // N, zero outside an integration pass
    radius: f64,     // m, rendering only
}

impl Body {
    /// Create a body from its initial state.
    ///
    /// Fails with [`SimError::InvalidMass`] when `mass` is not strictly
    /// positive and finite, and [`SimError::InvalidRadius`] when `radius` is
    /// negative or not finite.
    pub fn new(position: NVec2, velocity: NVec2, mass: f64, radius: f64, name: impl Into<String>) -> SimResult<Self> {
        let name = name.into();
        if !(mass.is_finite() && mass > 0.0) {
            return Err(SimError::InvalidMass { name, mass });
        }
        if !(radius.is_finite() && radius >= 0.0) {
            return Err(SimError::InvalidRadius { name, radius });
        }
        Ok(Self {
            name,
            position,
            velocity,
            mass,
            force: NVec2::zeros(),
            radius,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> NVec2 {
        self.position
    }

    pub fn velocity(&self) -> NVec2 {
        self.velocity
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn accumulated_force(&self) -> NVec2 {
        self.force
    }

    pub fn momentum(&self) -> NVec2 {
        self.velocity * self.mass
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.norm_squared()
    }

    /// Add the gravitational pull of `other` to this body's force accumulator.
    ///
    /// On error the accumulator is left as it was before the call.
    pub fn accumulate_gravity_from(&mut self, other: &Body, gravity: &NewtonianGravity) -> SimResult<()> {
        let f = gravity.pair_force(self, other)?;
        self.force += f;
        Ok(())
    }

    /// Advance one timestep with semi-implicit Euler and clear the force.
    ///
    /// The velocity is updated first and the *new* velocity moves the body.
    pub fn integrate(&mut self, dt: f64) {
        let a = self.force / self.mass;
        self.velocity += a * dt;
        self.position += self.velocity * dt;
        self.force = NVec2::zeros();
    }

    pub(crate) fn clear_force(&mut self) {
        self.force = NVec2::zeros();
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}(", self.name)?;
        writeln!(f, "    pos: ({}, {}),", self.position.x, self.position.y)?;
        writeln!(f, "    speed: ({}, {}),", self.velocity.x, self.velocity.y)?;
        writeln!(f, "    mass: {},", self.mass)?;
        writeln!(f, "    force: ({}, {})", self.force.x.round(), self.force.y.round())?;
        write!(f, ")")
    }
}

/// The simulation set: bodies fixed in membership for a run.
#[derive(Debug, Clone)]
pub struct System {
    bodies: Vec<Body>,
    pub t: f64, // elapsed simulated seconds
}

impl System {
    /// Build a simulation set, rejecting duplicate names.
    pub fn new(bodies: Vec<Body>) -> SimResult<Self> {
        for (i, b) in bodies.iter().enumerate() {
            if bodies[..i].iter().any(|other| other.name == b.name) {
                return Err(SimError::DuplicateName { name: b.name.clone() });
            }
        }
        Ok(Self { bodies, t: 0.0 })
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Index of the body called `name`.
    pub fn index_of(&self, name: &str) -> SimResult<usize> {
        self.bodies
            .iter()
            .position(|b| b.name == name)
            .ok_or_else(|| SimError::NotFound { name: name.to_string() })
    }

    /// Look a body up by name.
    pub fn get(&self, name: &str) -> SimResult<&Body> {
        self.index_of(name).map(|i| &self.bodies[i])
    }

    pub fn kinetic_energy(&self) -> f64 {
        self.bodies.iter().map(Body::kinetic_energy).sum()
    }

    /// Gravitational potential energy summed over unordered pairs.
    pub fn potential_energy(&self, g: f64) -> f64 {
        let mut pe = 0.0;
        for i in 0..self.bodies.len() {
            for j in (i + 1)..self.bodies.len() {
                let (bi, bj) = (&self.bodies[i], &self.bodies[j]);
                pe -= g * bi.mass * bj.mass / (bj.position - bi.position).norm();
            }
        }
        pe
    }

    pub fn total_momentum(&self) -> NVec2 {
        self.bodies.iter().fold(NVec2::zeros(), |acc, b| acc + b.momentum())
    }

    /// Mass-weighted mean position. Zero for an empty set.
    pub fn center_of_mass(&self) -> NVec2 {
        let total: f64 = self.bodies.iter().map(|b| b.mass).sum();
        if total == 0.0 {
            return NVec2::zeros();
        }
        self.bodies.iter().fold(NVec2::zeros(), |acc, b| acc + b.position * b.mass) / total
    }

    pub(crate) fn bodies_mut(&mut self) -> &mut [Body] {
        &mut self.bodies
    }

    /// Borrow body `i` mutably and body `j` shared at the same time.
    pub(crate) fn pair_mut(&mut self, i: usize, j: usize) -> (&mut Body, &Body) {
        assert_ne!(i, j, "a body cannot pair with itself");
        if i < j {
            let (lo, hi) = self.bodies.split_at_mut(j);
            (&mut lo[i], &hi[0])
        } else {
            let (lo, hi) = self.bodies.split_at_mut(i);
            (&mut hi[0], &lo[j])
        }
    }
}
