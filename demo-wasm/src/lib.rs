use glam::{Vec2, Vec3};
use squishy::{
    InteractionPicker, NoOpStepObserver, OrbitCamera, PointerButton, PointerEvent, Simulation,
    SimulationConfig, TriangleMesh,
};
use wasm_bindgen::prelude::*;

fn button(code: i16) -> PointerButton {
    match code {
        1 => PointerButton::Middle,
        2 => PointerButton::Secondary,
        _ => PointerButton::Primary,
    }
}

// ---- Sphere Demo ----

#[wasm_bindgen]
pub struct SphereDemo {
    sim: Simulation,
    picker: InteractionPicker,
    camera: OrbitCamera,
    indices: Vec<u32>,
}

#[wasm_bindgen]
impl SphereDemo {
    #[wasm_bindgen(constructor)]
    pub fn new(radius: f32, segments: usize, mass: f32) -> Result<SphereDemo, JsValue> {
        let mesh = TriangleMesh::uv_sphere(radius, segments, segments);
        let config = SimulationConfig::new().with_sphere_radius(radius);
        let sim = Simulation::from_mesh(&mesh, mass, config)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let indices = sim.triangles().iter().flatten().copied().collect();
        Ok(SphereDemo {
            sim,
            picker: InteractionPicker::new(),
            camera: OrbitCamera::new(
                Vec3::new(0.0, 150.0, -300.0),
                Vec3::ZERO,
                60f32.to_radians(),
                16.0 / 9.0,
            ),
            indices,
        })
    }

    /// Mirror the host's camera; call whenever the orbit controls move.
    #[allow(clippy::too_many_arguments)]
    pub fn set_camera(&mut self, px: f32, py: f32, pz: f32, tx: f32, ty: f32, tz: f32, fov_y: f32, aspect: f32) {
        self.camera = OrbitCamera::new(Vec3::new(px, py, pz), Vec3::new(tx, ty, tz), fov_y, aspect);
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.picker.handle_event(PointerEvent::Move { ndc: Vec2::new(x, y) });
    }

    pub fn pointer_down(&mut self, code: i16, x: f32, y: f32) {
        self.picker.handle_event(PointerEvent::Down { button: button(code), ndc: Vec2::new(x, y) });
    }

    pub fn pointer_up(&mut self, code: i16) {
        self.picker.handle_event(PointerEvent::Up { button: button(code) });
    }

    pub fn pointer_leave(&mut self) {
        self.picker.handle_event(PointerEvent::Leave);
    }

    pub fn tick(&mut self) {
        self.picker.update(&self.camera, &mut self.sim);
        self.sim.step(&mut NoOpStepObserver);
    }

    /// Returns flat [x0, y0, z0, x1, ...] in vertex order
    pub fn positions(&self) -> Vec<f32> {
        let mut out = vec![0.0; self.sim.particle_count() * 3];
        self.sim.write_positions(&mut out);
        out
    }

    /// Returns flat vertex normals for the current positions
    pub fn normals(&self) -> Vec<f32> {
        let mut out = vec![0.0; self.sim.particle_count() * 3];
        self.sim.write_normals(&mut out);
        out
    }

    pub fn indices(&self) -> Vec<u32> {
        self.indices.clone()
    }

    pub fn is_dragging(&self) -> bool {
        self.sim.selected().is_some()
    }

    pub fn particle_count(&self) -> usize {
        self.sim.particle_count()
    }
}
