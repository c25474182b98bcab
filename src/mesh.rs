//! Indexed triangle meshes: input generators and per-frame output helpers.

use alloc::vec::Vec;
use core::f32::consts::PI;

use glam::Vec3;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Vertex layout of a latitude/longitude parametrized mesh.
///
/// Vertex `(u, v)` lives at index `v * (width_segments + 1) + u`. Column 0 and
/// column `width_segments` of each row coincide in space.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LatLongGrid {
    pub width_segments: usize,
    pub height_segments: usize,
}

impl LatLongGrid {
    pub fn index(&self, u: usize, v: usize) -> usize {
        v * (self.width_segments + 1) + u
    }

    /// First and last vertex of every row, poles included.
    pub fn seam_pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..=self.height_segments)
            .map(move |v| (self.index(0, v), self.index(self.width_segments, v)))
    }

    pub fn vertex_count(&self) -> usize {
        (self.width_segments + 1) * (self.height_segments + 1)
    }
}

/// Vertex positions plus a flat triangle index list.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TriangleMesh {
    pub positions: Vec<Vec3>,
    pub indices: Vec<u32>,
    /// Present when the mesh has a wrap-around seam to close.
    pub grid: Option<LatLongGrid>,
}

impl TriangleMesh {
    pub fn new(positions: Vec<Vec3>, indices: Vec<u32>) -> Self {
        TriangleMesh { positions, indices, grid: None }
    }

    pub fn with_grid(mut self, grid: LatLongGrid) -> Self {
        self.grid = Some(grid);
        self
    }

    /// Complete index triples. Trailing indices are not yielded.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// A UV sphere centred on the origin.
    ///
    /// Rows run from the north pole (+Y) to the south pole; each row has
    /// `width_segments + 1` vertices so the seam column is duplicated. The
    /// degenerate polar triangles are omitted.
    ///
    /// At least 3 width and 2 height segments are generated; smaller requests
    /// are raised with a warning. Read the actual layout back from `grid`.
    pub fn uv_sphere(radius: f32, width_segments: usize, height_segments: usize) -> Self {
        let requested = (width_segments, height_segments);
        let width_segments = width_segments.max(3);
        let height_segments = height_segments.max(2);
        if requested != (width_segments, height_segments) {
            log::warn!(
                "uv sphere {}x{} segments raised to {}x{}",
                requested.0,
                requested.1,
                width_segments,
                height_segments
            );
        }
        let grid = LatLongGrid { width_segments, height_segments };

        let mut positions = Vec::with_capacity(grid.vertex_count());
        for iy in 0..=height_segments {
            let v = iy as f32 / height_segments as f32;
            let theta = v * PI;
            for ix in 0..=width_segments {
                let u = ix as f32 / width_segments as f32;
                let phi = u * 2.0 * PI;
                positions.push(Vec3::new(
                    -radius * libm::cosf(phi) * libm::sinf(theta),
                    radius * libm::cosf(theta),
                    radius * libm::sinf(phi) * libm::sinf(theta),
                ));
            }
        }

        let mut indices = Vec::new();
        for iy in 0..height_segments {
            for ix in 0..width_segments {
                let a = grid.index(ix + 1, iy) as u32;
                let b = grid.index(ix, iy) as u32;
                let c = grid.index(ix, iy + 1) as u32;
                let d = grid.index(ix + 1, iy + 1) as u32;
                if iy != 0 {
                    indices.extend_from_slice(&[a, b, d]);
                }
                if iy != height_segments - 1 {
                    indices.extend_from_slice(&[b, c, d]);
                }
            }
        }

        TriangleMesh { positions, indices, grid: Some(grid) }
    }

    /// A regular icosahedron: 12 vertices, 20 faces, 30 edges.
    pub fn icosahedron(radius: f32) -> Self {
        let t = (1.0 + libm::sqrtf(5.0)) / 2.0;
        let raw = [
            (-1.0, t, 0.0), (1.0, t, 0.0), (-1.0, -t, 0.0), (1.0, -t, 0.0),
            (0.0, -1.0, t), (0.0, 1.0, t), (0.0, -1.0, -t), (0.0, 1.0, -t),
            (t, 0.0, -1.0), (t, 0.0, 1.0), (-t, 0.0, -1.0), (-t, 0.0, 1.0),
        ];
        let positions = raw
            .iter()
            .map(|&(x, y, z)| Vec3::new(x, y, z).normalize() * radius)
            .collect();
        let indices = alloc::vec![
            0, 11, 5, 0, 5, 1, 0, 1, 7, 0, 7, 10, 0, 10, 11,
            1, 5, 9, 5, 11, 4, 11, 10, 2, 10, 7, 6, 7, 1, 8,
            3, 9, 4, 3, 4, 2, 3, 2, 6, 3, 6, 8, 3, 8, 9,
            4, 9, 5, 2, 4, 11, 6, 2, 10, 8, 6, 7, 9, 8, 1,
        ];
        TriangleMesh::new(positions, indices)
    }
}

/// Area-weighted vertex normals. Vertices touched by no valid triangle get
/// a zero normal.
pub fn vertex_normals(positions: &[Vec3], triangles: &[[u32; 3]]) -> Vec<Vec3> {
    let mut normals = alloc::vec![Vec3::ZERO; positions.len()];
    for tri in triangles {
        let [a, b, c] = tri.map(|i| i as usize);
        if a >= positions.len() || b >= positions.len() || c >= positions.len() {
            continue;
        }
        // Cross product length is twice the area, so larger faces weigh more.
        let face = (positions[c] - positions[b]).cross(positions[a] - positions[b]);
        normals[a] += face;
        normals[b] += face;
        normals[c] += face;
    }
    for n in normals.iter_mut() {
        *n = n.normalize_or_zero();
    }
    normals
}

/// Copy vectors into a flat `xyz` buffer. Returns how many vectors fit.
pub fn write_flat(values: impl IntoIterator<Item = Vec3>, out: &mut [f32]) -> usize {
    let mut written = 0;
    for (v, slot) in values.into_iter().zip(out.chunks_exact_mut(3)) {
        slot.copy_from_slice(&v.to_array());
        written += 1;
    }
    written
}
