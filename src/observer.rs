//! Step observer trait for monitoring simulation progress.

use glam::Vec3;

/// Trait for observing simulation ticks.
///
/// All methods have default no-op implementations.
pub trait StepObserver {
    /// Called after shape-retention and gravity forces are accumulated.
    fn on_forces_applied(&mut self) {}

    /// Called after all particles have been integrated (Verlet step).
    fn on_integrate(&mut self) {}

    /// Called after each relaxation sweep. `reverse` is true for
    /// back-to-front sweeps.
    fn on_constraint_pass(&mut self, _pass: usize, _reverse: bool) {}

    /// Called when a constraint is skipped because its endpoints coincide.
    fn on_degenerate_constraint(&mut self, _a: usize, _b: usize) {}

    /// Called after the pointer drag moved the selected particle.
    fn on_drag(&mut self, _selected: usize, _offset: Vec3) {}

    /// Called when a tick is fully complete.
    fn on_step_complete(&mut self) {}
}

/// A no-op observer. Use as default when no observation needed.
pub struct NoOpStepObserver;

impl StepObserver for NoOpStepObserver {}
