//! Verlet particles with a fixed rest position.

use glam::Vec3;

/// Masses at or below this are treated as zero (pinned).
const MASS_EPSILON: f32 = 1e-10;

/// A Verlet particle with implicit velocity.
///
/// `original` is the undeformed rest position. It is fixed at creation and
/// anchors both the shape-retention spring and every rest distance.
#[derive(Clone, Debug)]
pub struct Particle {
    pub position: Vec3,
    pub previous: Vec3,
    original: Vec3,
    pub acceleration: Vec3,
    pub mass: f32,
    pub inv_mass: f32,
    /// Rest-space distance to the selected particle while a drag is active.
    pub interaction_distance: Option<f32>,
}

impl Particle {
    /// A particle at rest at `pos`. A zero mass produces a pinned particle.
    pub fn new(pos: Vec3, mass: f32) -> Self {
        let inv_mass = if mass <= MASS_EPSILON { 0.0 } else { 1.0 / mass };
        Particle {
            position: pos,
            previous: pos,
            original: pos,
            acceleration: Vec3::ZERO,
            mass,
            inv_mass,
            interaction_distance: None,
        }
    }

    pub fn pinned(pos: Vec3) -> Self {
        Particle::new(pos, 0.0)
    }

    pub fn original(&self) -> Vec3 {
        self.original
    }

    pub fn is_pinned(&self) -> bool {
        self.inv_mass == 0.0
    }

    pub fn add_force(&mut self, force: Vec3) {
        if self.is_pinned() {
            return;
        }
        self.acceleration += force * self.inv_mass;
    }

    /// Advance one step. `dt_sq` is the squared timestep, `drag` the fraction
    /// of the implicit velocity that survives.
    pub fn integrate(&mut self, dt_sq: f32, drag: f32) {
        if self.is_pinned() {
            return;
        }
        let displacement = (self.position - self.previous) * drag;
        let new_pos = self.position + displacement + self.acceleration * dt_sq;
        self.previous = self.position;
        self.position = new_pos;
        self.acceleration = Vec3::ZERO;
    }

    /// Displacement over the last step.
    pub fn velocity_raw(&self) -> Vec3 {
        self.position - self.previous
    }

    /// Spring displacement from the rest position.
    pub fn rest_offset(&self) -> Vec3 {
        self.original - self.position
    }

    /// Move the current position only; the change shows up as velocity.
    pub fn translate(&mut self, offset: Vec3) {
        if !self.is_pinned() {
            self.position += offset;
        }
    }

    pub fn snap_to(&mut self, point: Vec3) {
        if !self.is_pinned() {
            self.position = point;
        }
    }
}
