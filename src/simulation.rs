//! The per-frame simulation: forces, integration, relaxation, pointer drag.

use alloc::vec::Vec;

use glam::Vec3;

use crate::config::SimulationConfig;
use crate::constraint::ConstraintSet;
use crate::error::SimError;
use crate::mesh::{self, TriangleMesh};
use crate::observer::StepObserver;
use crate::particle::Particle;
use crate::topology::{Topology, TopologyBuilder};

/// Pointer selection. `index` and `active` are always reset together.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Selection {
    pub index: Option<usize>,
    pub active: bool,
    /// World point the selected particle is dragged to.
    pub target: Vec3,
}

/// A deformable mesh and everything needed to advance it.
pub struct Simulation {
    particles: Vec<Particle>,
    constraints: ConstraintSet,
    triangles: Vec<[u32; 3]>,
    selection: Selection,
    config: SimulationConfig,
    timestep_sq: f32,
}

impl Simulation {
    pub fn new(topology: Topology, config: SimulationConfig) -> Result<Self, SimError> {
        config.validate()?;
        let timestep_sq = config.timestep_sq();
        Ok(Simulation {
            particles: topology.particles,
            constraints: topology.constraints,
            triangles: topology.triangles,
            selection: Selection::default(),
            config,
            timestep_sq,
        })
    }

    /// Build the topology of `mesh` with uniform `mass` and wrap it.
    pub fn from_mesh(mesh: &TriangleMesh, mass: f32, config: SimulationConfig) -> Result<Self, SimError> {
        let topology = TopologyBuilder::new(mesh).with_mass(mass).build()?;
        Self::new(topology, config)
    }

    /// Advance one tick.
    pub fn step<O: StepObserver>(&mut self, observer: &mut O) {
        self.apply_forces();
        observer.on_forces_applied();

        for p in self.particles.iter_mut() {
            p.integrate(self.timestep_sq, self.config.drag);
        }
        observer.on_integrate();

        self.constraints.relax(&mut self.particles, self.config.iterations, observer);

        if let Some((selected, offset)) = self.apply_drag() {
            observer.on_drag(selected, offset);
        }

        observer.on_step_complete();
    }

    /// Shape-retention spring toward rest plus optional gravity.
    fn apply_forces(&mut self) {
        let pull = self.config.pull;
        let gravity = self.config.gravity;
        for p in self.particles.iter_mut() {
            if p.is_pinned() {
                continue;
            }
            let retention = p.rest_offset() * (pull * p.mass);
            p.add_force(retention + gravity * p.mass);
        }
    }

    /// Move the selected particle onto the drag target and carry every
    /// movable particle inside the interaction radius by the same offset.
    pub fn apply_drag(&mut self) -> Option<(usize, Vec3)> {
        if !self.selection.active {
            return None;
        }
        let selected = self.selection.index?;
        if self.particles[selected].is_pinned() {
            return None;
        }

        let target = self.selection.target;
        let offset = target - self.particles[selected].position;
        let radius = self.config.interaction_radius;
        let mut carried = 0usize;

        for (i, p) in self.particles.iter_mut().enumerate() {
            if i == selected || p.is_pinned() {
                continue;
            }
            if matches!(p.interaction_distance, Some(d) if d < radius) {
                p.translate(offset);
                carried += 1;
            }
        }
        self.particles[selected].snap_to(target);

        log::trace!("drag: particle {} moved by {:?}, {} carried", selected, offset, carried);
        Some((selected, offset))
    }

    /// Start a drag at `point`, selecting the nearest movable particle if it
    /// lies strictly inside the pick threshold.
    ///
    /// The drag is active either way; with no selection it has no effect.
    pub fn pick(&mut self, point: Vec3) -> Option<usize> {
        let threshold = self.config.selection_threshold_sq();
        let nearest = self
            .particles
            .iter()
            .enumerate()
            .filter(|(_, p)| !p.is_pinned())
            .map(|(i, p)| (i, p.position.distance_squared(point)))
            .fold(None, |best: Option<(usize, f32)>, (i, d)| match best {
                Some((_, best_d)) if best_d <= d => best,
                _ => Some((i, d)),
            });

        self.clear_selection();
        self.selection.active = true;
        self.selection.target = point;

        match nearest {
            Some((index, dist_sq)) if dist_sq < threshold => {
                self.cache_interaction_distances(index);
                self.selection.index = Some(index);
                log::debug!("picked particle {} ({} from pointer)", index, libm::sqrtf(dist_sq));
                Some(index)
            }
            _ => {
                log::debug!("press too far from any particle, nothing picked");
                None
            }
        }
    }

    /// Select `index` directly and start dragging it from where it is.
    pub fn select(&mut self, index: usize) -> Result<(), SimError> {
        let count = self.particles.len();
        if index >= count {
            return Err(SimError::ParticleOutOfBounds { index, count });
        }
        self.clear_selection();
        self.cache_interaction_distances(index);
        self.selection = Selection {
            index: Some(index),
            active: true,
            target: self.particles[index].position,
        };
        Ok(())
    }

    pub fn set_drag_target(&mut self, point: Vec3) {
        self.selection.target = point;
    }

    /// End the drag and forget every cached interaction distance.
    pub fn release(&mut self) {
        if let Some(index) = self.selection.index {
            log::debug!("released particle {}", index);
        }
        self.clear_selection();
    }

    fn clear_selection(&mut self) {
        self.selection = Selection::default();
        for p in self.particles.iter_mut() {
            p.interaction_distance = None;
        }
    }

    fn cache_interaction_distances(&mut self, index: usize) {
        let anchor = self.particles[index].original();
        for p in self.particles.iter_mut() {
            p.interaction_distance = Some(anchor.distance(p.original()));
        }
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selected(&self) -> Option<usize> {
        self.selection.index
    }

    pub fn is_dragging(&self) -> bool {
        self.selection.active
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particle(&self, index: usize) -> &Particle {
        &self.particles[index]
    }

    pub fn particle_mut(&mut self, index: usize) -> &mut Particle {
        &mut self.particles[index]
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    pub fn constraints(&self) -> &ConstraintSet {
        &self.constraints
    }

    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    pub fn positions(&self) -> Vec<Vec3> {
        self.particles.iter().map(|p| p.position).collect()
    }

    /// Write current positions into a flat `xyz` vertex buffer.
    pub fn write_positions(&self, out: &mut [f32]) -> usize {
        mesh::write_flat(self.particles.iter().map(|p| p.position), out)
    }

    pub fn vertex_normals(&self) -> Vec<Vec3> {
        mesh::vertex_normals(&self.positions(), &self.triangles)
    }

    /// Recompute normals for the current positions into a flat buffer.
    pub fn write_normals(&self, out: &mut [f32]) -> usize {
        mesh::write_flat(self.vertex_normals(), out)
    }
}
