//! Pairwise distance constraints and their deduplicated set.

use alloc::collections::BTreeSet;
use alloc::vec::Vec;

use crate::observer::StepObserver;
use crate::particle::Particle;

/// Canonical undirected key for a particle pair: `(min, max)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeKey(pub usize, pub usize);

impl EdgeKey {
    pub fn new(a: usize, b: usize) -> Self {
        if a <= b { EdgeKey(a, b) } else { EdgeKey(b, a) }
    }
}

/// What a single constraint solve did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SolveOutcome {
    Corrected,
    /// Endpoints coincide; there is no direction to correct along.
    Degenerate,
    /// Both endpoints are pinned.
    Immovable,
}

/// Keeps two particles at `rest_distance` from each other.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DistanceConstraint {
    pub a: usize,
    pub b: usize,
    pub rest_distance: f32,
}

impl DistanceConstraint {
    pub fn new(a: usize, b: usize, rest_distance: f32) -> Self {
        DistanceConstraint { a, b, rest_distance }
    }

    /// Rest distance taken from the particles' rest positions.
    ///
    /// # Panics
    ///
    /// Panics if `a` or `b` is out of bounds for `particles`.
    pub fn from_particles(a: usize, b: usize, particles: &[Particle]) -> Self {
        let rest_distance = particles[a].original().distance(particles[b].original());
        DistanceConstraint { a, b, rest_distance }
    }

    pub fn key(&self) -> EdgeKey {
        EdgeKey::new(self.a, self.b)
    }

    /// Project both endpoints toward `rest_distance`.
    ///
    /// Each movable endpoint moves by half the error. A pinned endpoint
    /// stays put and its half is dropped, so a constraint tied to a pinned
    /// particle closes only half its gap per solve.
    ///
    /// # Panics
    ///
    /// Panics if `a` or `b` is out of bounds for `particles`. Constraints
    /// produced by [`TopologyBuilder`](crate::topology::TopologyBuilder)
    /// always index existing particles.
    pub fn solve(&self, particles: &mut [Particle]) -> SolveOutcome {
        let a_pinned = particles[self.a].is_pinned();
        let b_pinned = particles[self.b].is_pinned();
        if a_pinned && b_pinned {
            return SolveOutcome::Immovable;
        }

        let delta = particles[self.b].position - particles[self.a].position;
        let dist = delta.length();
        if dist == 0.0 {
            return SolveOutcome::Degenerate;
        }

        let correction = delta * ((dist - self.rest_distance) / dist * 0.5);

        if !a_pinned {
            particles[self.a].position += correction;
        }
        if !b_pinned {
            particles[self.b].position -= correction;
        }
        SolveOutcome::Corrected
    }
}

/// Ordered constraints with at most one entry per unordered particle pair.
#[derive(Clone, Debug, Default)]
pub struct ConstraintSet {
    constraints: Vec<DistanceConstraint>,
    keys: BTreeSet<EdgeKey>,
}

impl ConstraintSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `constraint` unless its pair is already present.
    /// Returns whether it was inserted.
    pub fn insert(&mut self, constraint: DistanceConstraint) -> bool {
        if !self.keys.insert(constraint.key()) {
            return false;
        }
        self.constraints.push(constraint);
        true
    }

    pub fn contains(&self, a: usize, b: usize) -> bool {
        self.keys.contains(&EdgeKey::new(a, b))
    }

    pub fn get(&self, a: usize, b: usize) -> Option<&DistanceConstraint> {
        let key = EdgeKey::new(a, b);
        self.constraints.iter().find(|c| c.key() == key)
    }

    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    pub fn iter(&self) -> core::slice::Iter<'_, DistanceConstraint> {
        self.constraints.iter()
    }

    pub fn as_slice(&self) -> &[DistanceConstraint] {
        &self.constraints
    }

    /// Run `passes` relaxation sweeps, front-to-back on even passes and
    /// back-to-front on odd ones.
    ///
    /// # Panics
    ///
    /// Panics if a constraint indexes past the end of `particles`.
    pub fn relax<O: StepObserver>(
        &self,
        particles: &mut [Particle],
        passes: usize,
        observer: &mut O,
    ) {
        for pass in 0..passes {
            let reverse = pass % 2 == 1;
            if reverse {
                for c in self.constraints.iter().rev() {
                    Self::solve_one(c, particles, observer);
                }
            } else {
                for c in self.constraints.iter() {
                    Self::solve_one(c, particles, observer);
                }
            }
            observer.on_constraint_pass(pass, reverse);
        }
    }

    fn solve_one<O: StepObserver>(c: &DistanceConstraint, particles: &mut [Particle], observer: &mut O) {
        if c.solve(particles) == SolveOutcome::Degenerate {
            observer.on_degenerate_constraint(c.a, c.b);
        }
    }
}

impl<'a> IntoIterator for &'a ConstraintSet {
    type Item = &'a DistanceConstraint;
    type IntoIter = core::slice::Iter<'a, DistanceConstraint>;

    fn into_iter(self) -> Self::IntoIter {
        self.constraints.iter()
    }
}
