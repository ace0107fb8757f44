//! Bounded orbit trails
//!
//! Every body gets a fixed-capacity FIFO of past positions. Once full, each
//! new point evicts the oldest one, so a trail always holds the most recent
//! `capacity` points in the order they were recorded.
//!
//! Most bodies record world-space positions. Bodies named in the
//! [`TrailPolicy`] record a screen-space snapshot instead, projected through
//! the [`Viewport`] at the moment of recording. That keeps e.g. a moon's
//! loops around its planet visible instead of smeared along the planet's orbit.

use std::collections::{HashSet, VecDeque};

use crate::error::{SimError, SimResult};
use crate::simulation::states::{NVec2, System};
use crate::visualization::projection::Viewport;

pub const DEFAULT_TRAIL_CAPACITY: usize = 400;

#[derive(Debug, Clone)]
pub struct Trail {
    points: VecDeque<NVec2>,
    capacity: usize,
}

impl Trail {
    pub fn new(capacity: usize) -> SimResult<Self> {
        if capacity == 0 {
            return Err(SimError::InvalidCapacity(capacity));
        }
        Ok(Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
        })
    }

    /// Append a point, evicting the oldest one when full
    pub fn push(&mut self, p: NVec2) {
        if self.points.len() == self.capacity {
            self.points.pop_front();
        }
        self.points.push_back(p);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Oldest first
    pub fn iter(&self) -> impl Iterator<Item = &NVec2> + '_ {
        self.points.iter()
    }

    pub fn latest(&self) -> Option<NVec2> {
        self.points.back().copied()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }
}

/// Coordinate space a trail point is stored in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrailSpace {
    World,
    Screen,
}

/// Which bodies record screen-space points
#[derive(Debug, Clone, Default)]
pub struct TrailPolicy {
    screen_space: HashSet<String>,
}

impl TrailPolicy {
    pub fn new<I, S>(screen_space: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            screen_space: screen_space.into_iter().map(Into::into).collect(),
        }
    }

    pub fn space_for(&self, name: &str) -> TrailSpace {
        if self.screen_space.contains(name) {
            TrailSpace::Screen
        } else {
            TrailSpace::World
        }
    }
}

/// One trail per body, indexed like `System::bodies`
#[derive(Debug, Clone)]
pub struct TrailSet {
    names: Vec<String>,
    spaces: Vec<TrailSpace>,
    trails: Vec<Trail>,
}

impl TrailSet {
    /// Build empty trails for every body in `sys`.
    ///
    /// Every name in the policy has to exist in `sys`.
    pub fn new(sys: &System, capacity: usize, policy: &TrailPolicy) -> SimResult<Self> {
        for name in &policy.screen_space {
            sys.index_of(name)?;
        }

        let names: Vec<String> = sys.bodies().iter().map(|b| b.name().to_string()).collect();
        let spaces = names.iter().map(|n| policy.space_for(n)).collect();
        let trails = names
            .iter()
            .map(|_| Trail::new(capacity))
            .collect::<SimResult<Vec<_>>>()?;

        Ok(Self { names, spaces, trails })
    }

    /// Append the current position of every body.
    ///
    /// Call only between frames, after `advance_frame` has returned. `sys`
    /// must hold the same bodies, in the same order, as the system the set
    /// was built from; otherwise nothing is recorded.
    pub fn record(&mut self, sys: &System, viewport: &Viewport) -> SimResult<()> {
        let bodies = sys.bodies();
        for i in 0..self.names.len().max(bodies.len()) {
            let expected = self.names.get(i).map(String::as_str).unwrap_or_default();
            let found = bodies.get(i).map(|b| b.name()).unwrap_or_default();
            if expected != found {
                return Err(SimError::TrailMismatch {
                    expected: expected.to_string(),
                    found: found.to_string(),
                });
            }
        }

        for ((body, trail), space) in bodies.iter().zip(self.trails.iter_mut()).zip(&self.spaces) {
            let p = match space {
                TrailSpace::World => body.position(),
                TrailSpace::Screen => viewport.to_screen(sys, body.position())?,
            };
            trail.push(p);
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> SimResult<&Trail> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| &self.trails[i])
            .ok_or_else(|| SimError::NotFound { name: name.to_string() })
    }

    pub fn space_of(&self, name: &str) -> SimResult<TrailSpace> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| self.spaces[i])
            .ok_or_else(|| SimError::NotFound { name: name.to_string() })
    }

    /// `(name, trail)` pairs in body order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Trail)> + '_ {
        self.names.iter().map(String::as_str).zip(self.trails.iter())
    }

    /// Trail points ready to draw: world-space trails are projected through
    /// `viewport`, screen-space trails are returned as stored.
    pub fn screen_points(&self, name: &str, sys: &System, viewport: &Viewport) -> SimResult<Vec<NVec2>> {
        let trail = self.get(name)?;
        match self.space_of(name)? {
            TrailSpace::World => viewport.to_screen_all(sys, trail.iter().copied()),
            TrailSpace::Screen => Ok(trail.iter().copied().collect()),
        }
    }
}
