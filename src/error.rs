//! Error and warning types for simulation setup and interaction.

use core::fmt;

/// Errors that can occur while building or driving a simulation.
#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    /// Mass must be finite and non-negative.
    InvalidMass,
    /// Drag must be in (0, 1].
    InvalidDrag,
    /// Timestep must be positive and finite.
    InvalidTimestep,
    /// Shape-retention pull must be finite and non-negative.
    InvalidPull,
    /// Sphere and interaction radii must be finite; the sphere radius positive.
    InvalidRadius,
    /// Particle index is out of bounds.
    ParticleOutOfBounds { index: usize, count: usize },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::InvalidMass => write!(f, "mass must be finite and non-negative"),
            SimError::InvalidDrag => write!(f, "drag must be in (0, 1]"),
            SimError::InvalidTimestep => write!(f, "timestep must be positive and finite"),
            SimError::InvalidPull => write!(f, "pull must be finite and non-negative"),
            SimError::InvalidRadius => write!(f, "radius must be positive and finite"),
            SimError::ParticleOutOfBounds { index, count } => {
                write!(f, "particle index {} out of bounds (count: {})", index, count)
            }
        }
    }
}

impl core::error::Error for SimError {}

/// Recoverable anomalies found while deriving topology from a mesh.
///
/// These never abort construction: the offending edge or indices are
/// dropped and the simulation runs on whatever remains.
#[derive(Debug, Clone, PartialEq)]
pub enum BuildWarning {
    /// An edge referenced a vertex that does not exist.
    MissingVertex { a: usize, b: usize, count: usize },
    /// The index list length was not a multiple of three.
    TrailingIndices { count: usize },
}

impl fmt::Display for BuildWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildWarning::MissingVertex { a, b, count } => write!(
                f,
                "edge ({}, {}) references a missing vertex (count: {}), skipped",
                a, b, count
            ),
            BuildWarning::TrailingIndices { count } => {
                write!(f, "{} trailing indices do not form a triangle, ignored", count)
            }
        }
    }
}
