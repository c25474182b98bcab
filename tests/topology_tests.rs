use std::collections::HashSet;

use glam::Vec3;
use squishy::{BuildWarning, LatLongGrid, SimError, TopologyBuilder, TriangleMesh};

fn distinct_edges(mesh: &TriangleMesh) -> HashSet<(usize, usize)> {
    let mut edges = HashSet::new();
    for [a, b, c] in mesh.triangles() {
        for (p, q) in [(a, b), (b, c), (c, a)] {
            let (p, q) = (p as usize, q as usize);
            edges.insert((p.min(q), p.max(q)));
        }
    }
    edges
}

#[test]
fn icosahedron_has_thirty_edges() {
    let mesh = TriangleMesh::icosahedron(1.0);
    let topology = TopologyBuilder::new(&mesh).with_mass(0.1).build().unwrap();
    assert_eq!(topology.particles.len(), 12);
    assert_eq!(topology.constraints.len(), 30);
    assert!(topology.warnings.is_empty());
}

#[test]
fn every_constraint_matches_rest_length() {
    let mesh = TriangleMesh::icosahedron(2.0);
    let topology = TopologyBuilder::new(&mesh).build().unwrap();
    for c in &topology.constraints {
        let expected = mesh.positions[c.a].distance(mesh.positions[c.b]);
        assert!((c.rest_distance - expected).abs() < 1e-6);
    }
}

#[test]
fn uv_sphere_counts_edges_plus_one_seam_per_row() {
    let mesh = TriangleMesh::uv_sphere(100.0, 10, 6);
    let topology = TopologyBuilder::new(&mesh).with_mass(0.1).build().unwrap();
    let edges = distinct_edges(&mesh);
    assert_eq!(topology.constraints.len(), edges.len() + 7);

    let mut seen = HashSet::new();
    for c in &topology.constraints {
        assert!(seen.insert(c.key()), "pair {:?} appears twice", c.key());
    }
}

#[test]
fn seam_constraints_have_zero_rest_distance() {
    let mesh = TriangleMesh::uv_sphere(5.0, 8, 4);
    let grid = mesh.grid.unwrap();
    let topology = TopologyBuilder::new(&mesh).build().unwrap();
    for v in 0..=grid.height_segments {
        let start = grid.index(0, v);
        let end = grid.index(grid.width_segments, v);
        let seam = topology.constraints.get(start, end).expect("seam missing");
        assert_eq!(seam.rest_distance, 0.0);
    }
}

#[test]
fn seams_can_be_disabled_or_supplied() {
    let mesh = TriangleMesh::uv_sphere(1.0, 8, 4);
    let with = TopologyBuilder::new(&mesh).build().unwrap();
    let without = TopologyBuilder::new(&mesh).without_seams().build().unwrap();
    assert_eq!(with.constraints.len(), without.constraints.len() + 5);

    let bare = TriangleMesh::new(mesh.positions.clone(), mesh.indices.clone());
    let supplied = TopologyBuilder::new(&bare)
        .with_seams(LatLongGrid { width_segments: 8, height_segments: 4 })
        .build()
        .unwrap();
    assert_eq!(supplied.constraints.len(), with.constraints.len());
}

#[test]
fn missing_vertex_skips_edge_and_warns() {
    let mesh = TriangleMesh::new(
        vec![Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::Z],
        vec![0, 1, 2, 2, 3, 9],
    );
    let topology = TopologyBuilder::new(&mesh).build().unwrap();

    // Triangle (0,1,2) gives 3 edges, (2,3,9) adds only (2,3).
    assert_eq!(topology.constraints.len(), 4);
    assert!(topology.constraints.contains(2, 3));
    assert_eq!(topology.triangles, vec![[0, 1, 2]]);
    assert_eq!(
        topology.warnings,
        vec![
            BuildWarning::MissingVertex { a: 3, b: 9, count: 4 },
            BuildWarning::MissingVertex { a: 9, b: 2, count: 4 },
        ]
    );
}

#[test]
fn seam_past_end_of_mesh_warns() {
    let mesh = TriangleMesh::new(vec![Vec3::ZERO, Vec3::X, Vec3::Y], vec![0, 1, 2]);
    let topology = TopologyBuilder::new(&mesh)
        .with_seams(LatLongGrid { width_segments: 2, height_segments: 1 })
        .build()
        .unwrap();
    // Row 0 joins 0 and 2 (already an edge); row 1 joins 3 and 5, both missing.
    assert_eq!(topology.constraints.len(), 3);
    assert_eq!(topology.warnings, vec![BuildWarning::MissingVertex { a: 3, b: 5, count: 3 }]);
}

#[test]
fn zero_mass_pins_everything() {
    let mesh = TriangleMesh::icosahedron(1.0);
    let topology = TopologyBuilder::new(&mesh).with_mass(0.0).build().unwrap();
    assert!(topology.particles.iter().all(|p| p.is_pinned()));
}

#[test]
fn nan_mass_is_rejected() {
    let mesh = TriangleMesh::icosahedron(1.0);
    let result = TopologyBuilder::new(&mesh).with_mass(f32::NAN).build();
    assert_eq!(result.unwrap_err(), SimError::InvalidMass);
}
