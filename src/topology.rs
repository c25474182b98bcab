//! Derives particles and distance constraints from a triangle mesh.

use alloc::vec::Vec;

use crate::constraint::{ConstraintSet, DistanceConstraint};
use crate::error::{BuildWarning, SimError};
use crate::mesh::{LatLongGrid, TriangleMesh};
use crate::particle::Particle;

/// Particles, constraints, and surviving triangles derived from a mesh.
#[derive(Clone, Debug)]
pub struct Topology {
    pub particles: Vec<Particle>,
    pub constraints: ConstraintSet,
    /// Triangles whose three vertices all exist.
    pub triangles: Vec<[u32; 3]>,
    pub warnings: Vec<BuildWarning>,
}

/// Builds a [`Topology`] from a [`TriangleMesh`].
///
/// ```
/// use squishy::mesh::TriangleMesh;
/// use squishy::topology::TopologyBuilder;
///
/// let mesh = TriangleMesh::icosahedron(1.0);
/// let topology = TopologyBuilder::new(&mesh).with_mass(0.1).build().unwrap();
/// assert_eq!(topology.constraints.len(), 30);
/// ```
pub struct TopologyBuilder<'a> {
    mesh: &'a TriangleMesh,
    mass: f32,
    seams: Option<LatLongGrid>,
}

impl<'a> TopologyBuilder<'a> {
    /// Seams default to the mesh's own grid, if it has one.
    pub fn new(mesh: &'a TriangleMesh) -> Self {
        TopologyBuilder { mesh, mass: 1.0, seams: mesh.grid }
    }

    /// Mass of every particle. Zero pins the whole mesh.
    pub fn with_mass(mut self, mass: f32) -> Self {
        self.mass = mass;
        self
    }

    pub fn with_seams(mut self, grid: LatLongGrid) -> Self {
        self.seams = Some(grid);
        self
    }

    pub fn without_seams(mut self) -> Self {
        self.seams = None;
        self
    }

    pub fn build(self) -> Result<Topology, SimError> {
        if !(self.mass.is_finite() && self.mass >= 0.0) {
            return Err(SimError::InvalidMass);
        }

        let particles: Vec<Particle> = self
            .mesh
            .positions
            .iter()
            .map(|&p| Particle::new(p, self.mass))
            .collect();

        let mut constraints = ConstraintSet::new();
        let mut warnings = Vec::new();
        let mut triangles = Vec::with_capacity(self.mesh.triangle_count());

        for tri in self.mesh.triangles() {
            let [a, b, c] = tri.map(|i| i as usize);
            let mut complete = true;
            for (p, q) in [(a, b), (b, c), (c, a)] {
                complete &= add_edge(&mut constraints, &mut warnings, &particles, p, q, None);
            }
            if complete {
                triangles.push(tri);
            }
        }

        let trailing = self.mesh.indices.len() % 3;
        if trailing != 0 {
            let warning = BuildWarning::TrailingIndices { count: trailing };
            log::warn!("{}", warning);
            warnings.push(warning);
        }

        let edge_count = constraints.len();
        if let Some(grid) = self.seams {
            for (start, end) in grid.seam_pairs() {
                if start != end {
                    add_edge(&mut constraints, &mut warnings, &particles, start, end, Some(0.0));
                }
            }
        }

        log::debug!(
            "topology: {} particles, {} edge constraints, {} seam constraints, {} triangles, {} warnings",
            particles.len(),
            edge_count,
            constraints.len() - edge_count,
            triangles.len(),
            warnings.len(),
        );

        Ok(Topology { particles, constraints, triangles, warnings })
    }
}

/// Insert the `(a, b)` constraint unless present. `rest` overrides the rest
/// distance measured between rest positions. Returns false if a vertex is
/// missing.
fn add_edge(
    constraints: &mut ConstraintSet,
    warnings: &mut Vec<BuildWarning>,
    particles: &[Particle],
    a: usize,
    b: usize,
    rest: Option<f32>,
) -> bool {
    let count = particles.len();
    if a >= count || b >= count {
        let warning = BuildWarning::MissingVertex { a, b, count };
        log::warn!("{}", warning);
        warnings.push(warning);
        return false;
    }
    if constraints.contains(a, b) {
        return true;
    }
    let constraint = match rest {
        Some(rest_distance) => DistanceConstraint::new(a, b, rest_distance),
        None => DistanceConstraint::from_particles(a, b, particles),
    };
    constraints.insert(constraint);
    true
}
