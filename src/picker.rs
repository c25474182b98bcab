//! Maps pointer input to a world-space drag target.
//!
//! Event handlers only queue intent. [`InteractionPicker::update`] consumes
//! the queue once per frame, before [`Simulation::step`], so all simulation
//! state changes on the frame thread.

use alloc::vec::Vec;

use glam::{Vec2, Vec3};

use crate::ray::{raycast_mesh, Plane, Ray};
use crate::simulation::Simulation;

/// Camera capability supplied by the host renderer.
pub trait PointerCamera {
    /// World-space ray through a point in normalized device coordinates.
    fn ray_from_ndc(&self, ndc: Vec2) -> Ray;
    fn position(&self) -> Vec3;
    /// Point the orbit controls revolve around.
    fn orbit_target(&self) -> Vec3;
}

/// A perspective camera looking from `position` at `target`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct OrbitCamera {
    pub position: Vec3,
    pub target: Vec3,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    /// Viewport width / height.
    pub aspect: f32,
}

impl OrbitCamera {
    pub fn new(position: Vec3, target: Vec3, fov_y: f32, aspect: f32) -> Self {
        OrbitCamera { position, target, fov_y, aspect }
    }
}

impl PointerCamera for OrbitCamera {
    fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let half_fov = libm::tanf(self.fov_y * 0.5);
        let forward = (self.target - self.position).normalize_or_zero();

        // Looking straight up or down, fall back to world X as right.
        let (right, up) = if libm::fabsf(forward.y) > 0.99 {
            let right = Vec3::X;
            (right, right.cross(forward).normalize())
        } else {
            let right = forward.cross(Vec3::Y).normalize();
            (right, right.cross(forward))
        };

        let dir = forward + right * (ndc.x * self.aspect * half_fov) + up * (ndc.y * half_fov);
        Ray::new(self.position, dir)
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn orbit_target(&self) -> Vec3 {
        self.target
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// Raw pointer input, positions in normalized device coordinates.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PointerEvent {
    Move { ndc: Vec2 },
    Down { button: PointerButton, ndc: Vec2 },
    Up { button: PointerButton },
    Leave,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PickState {
    Idle,
    Dragging,
}

/// Pointer state machine driving a [`Simulation`]'s selection.
pub struct InteractionPicker {
    state: PickState,
    ndc: Vec2,
    world_point: Vec3,
    pending: Vec<PointerEvent>,
}

impl Default for InteractionPicker {
    fn default() -> Self {
        Self::new()
    }
}

impl InteractionPicker {
    pub fn new() -> Self {
        InteractionPicker {
            state: PickState::Idle,
            ndc: Vec2::ZERO,
            world_point: Vec3::ZERO,
            pending: Vec::new(),
        }
    }

    pub fn state(&self) -> PickState {
        self.state
    }

    /// Last resolved world point under the pointer.
    pub fn world_point(&self) -> Vec3 {
        self.world_point
    }

    /// Record an input event for the next [`update`](Self::update).
    pub fn handle_event(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Move { ndc } => self.ndc = ndc,
            PointerEvent::Down { button: PointerButton::Primary, ndc } => {
                self.ndc = ndc;
                self.pending.push(event);
            }
            PointerEvent::Up { button: PointerButton::Primary } | PointerEvent::Leave => {
                self.pending.push(event);
            }
            PointerEvent::Down { .. } | PointerEvent::Up { .. } => {}
        }
    }

    /// Apply queued transitions and refresh the drag target.
    pub fn update<C: PointerCamera>(&mut self, camera: &C, sim: &mut Simulation) {
        let pending = core::mem::take(&mut self.pending);
        for event in &pending {
            match event {
                PointerEvent::Down { ndc, .. } => {
                    self.world_point = self.project(camera, sim, *ndc);
                    sim.pick(self.world_point);
                    self.state = PickState::Dragging;
                }
                PointerEvent::Up { .. } | PointerEvent::Leave => {
                    if self.state == PickState::Dragging {
                        sim.release();
                        self.state = PickState::Idle;
                    }
                }
                PointerEvent::Move { .. } => {}
            }
        }
        // Hand the buffer back so the queue keeps its capacity.
        self.pending = pending;
        self.pending.clear();

        self.world_point = self.project(camera, sim, self.ndc);
        if self.state == PickState::Dragging {
            sim.set_drag_target(self.world_point);
        }
    }

    /// World point under `ndc`: the nearest hit on the deformed mesh, else
    /// the crossing with a camera-facing plane through the selected particle
    /// (or the orbit target). Keeps the previous point if both miss.
    fn project<C: PointerCamera>(&self, camera: &C, sim: &Simulation, ndc: Vec2) -> Vec3 {
        let ray = camera.ray_from_ndc(ndc);
        let particles = sim.particles();
        if let Some(hit) = raycast_mesh(&ray, |i| particles.get(i).map(|p| p.position), sim.triangles()) {
            return hit;
        }

        let anchor = match sim.selected() {
            Some(index) => sim.particle(index).position,
            None => camera.orbit_target(),
        };
        Plane::from_normal_and_point(camera.position() - camera.orbit_target(), anchor)
            .and_then(|plane| ray.intersect_plane(&plane))
            .unwrap_or(self.world_point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centre_ray_points_at_target() {
        let camera = OrbitCamera::new(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, 1.0, 1.5);
        let ray = camera.ray_from_ndc(Vec2::ZERO);
        assert!(ray.direction.distance(Vec3::NEG_Z) < 1e-6);
    }

    #[test]
    fn ndc_right_is_screen_right() {
        let camera = OrbitCamera::new(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, 1.0, 1.0);
        let ray = camera.ray_from_ndc(Vec2::new(1.0, 0.0));
        assert!(ray.direction.x > 0.0);
        let ray = camera.ray_from_ndc(Vec2::new(0.0, 1.0));
        assert!(ray.direction.y > 0.0);
    }

    #[test]
    fn secondary_button_is_ignored() {
        let mut picker = InteractionPicker::new();
        picker.handle_event(PointerEvent::Down { button: PointerButton::Secondary, ndc: Vec2::ZERO });
        assert!(picker.pending.is_empty());
    }
}
