//! Simulation constants.

use glam::Vec3;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::SimError;

/// Fixed constants for the life of a simulation.
///
/// # Builder Pattern
/// ```
/// use squishy::config::SimulationConfig;
/// use glam::Vec3;
///
/// let config = SimulationConfig::new()
///     .with_iterations(8)
///     .with_pull(50.0)
///     .with_gravity(Vec3::new(0.0, -9.81, 0.0))
///     .with_sphere_radius(2.0);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimulationConfig {
    /// Relaxation passes per tick. Default: 5.
    pub iterations: usize,
    /// Fraction of the implicit velocity kept each step, in (0, 1]. Default: 0.97.
    pub drag: f32,
    /// Stiffness of the spring pulling particles back to rest. Default: 107.5.
    pub pull: f32,
    /// Seconds per tick. Default: 0.018.
    pub timestep: f32,
    /// Extra acceleration applied to every movable particle. Default: zero.
    pub gravity: Vec3,
    /// Particles whose rest distance to the selected one is below this
    /// follow the drag. Default: 10.
    pub interaction_radius: f32,
    /// Radius of the simulated sphere, scales the pick threshold. Default: 100.
    pub sphere_radius: f32,
    /// Pick threshold as a fraction of `sphere_radius`. Default: 0.15.
    pub selection_fraction: f32,
}

impl SimulationConfig {
    /// Create a new config with the reference constants.
    pub fn new() -> Self {
        SimulationConfig {
            iterations: 5,
            drag: 0.97,
            pull: 107.5,
            timestep: 18.0 / 1000.0,
            gravity: Vec3::ZERO,
            interaction_radius: 10.0,
            sphere_radius: 100.0,
            selection_fraction: 0.15,
        }
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_drag(mut self, drag: f32) -> Self {
        self.drag = drag;
        self
    }

    pub fn with_pull(mut self, pull: f32) -> Self {
        self.pull = pull;
        self
    }

    pub fn with_timestep(mut self, timestep: f32) -> Self {
        self.timestep = timestep;
        self
    }

    pub fn with_gravity(mut self, gravity: Vec3) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_interaction_radius(mut self, radius: f32) -> Self {
        self.interaction_radius = radius;
        self
    }

    pub fn with_sphere_radius(mut self, radius: f32) -> Self {
        self.sphere_radius = radius;
        self
    }

    pub fn with_selection_fraction(mut self, fraction: f32) -> Self {
        self.selection_fraction = fraction;
        self
    }

    /// Squared timestep, the only form the integrator uses.
    pub fn timestep_sq(&self) -> f32 {
        self.timestep * self.timestep
    }

    /// Largest distance from a particle at which a press still picks it.
    pub fn selection_radius(&self) -> f32 {
        self.selection_fraction * self.sphere_radius
    }

    /// Squared pick threshold. A press must land strictly inside it.
    pub fn selection_threshold_sq(&self) -> f32 {
        let r = self.selection_radius();
        r * r
    }

    /// Check that every constant is usable.
    pub fn validate(&self) -> Result<(), SimError> {
        if !(self.drag > 0.0 && self.drag <= 1.0) {
            return Err(SimError::InvalidDrag);
        }
        if !(self.timestep.is_finite() && self.timestep > 0.0) {
            return Err(SimError::InvalidTimestep);
        }
        if !(self.pull.is_finite() && self.pull >= 0.0) {
            return Err(SimError::InvalidPull);
        }
        if !(self.sphere_radius.is_finite() && self.sphere_radius > 0.0)
            || !(self.interaction_radius.is_finite() && self.interaction_radius >= 0.0)
            || !(self.selection_fraction.is_finite() && self.selection_fraction >= 0.0)
        {
            return Err(SimError::InvalidRadius);
        }
        Ok(())
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self::new()
    }
}
