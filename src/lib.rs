//! Squishable meshes: Verlet particles held in shape by distance constraints.
//!
//! `squishy` turns an indexed triangle mesh into a deformable body. Every
//! vertex becomes a Verlet particle pulled back toward its rest position,
//! every triangle edge becomes a distance constraint, and a pointer can grab
//! the nearest particle and drag its neighbourhood along. Rendering is left
//! to the host: feed it a mesh, read positions and normals back every frame.
//!
//! # Features
//!
//! - **Verlet integration**: Position-based dynamics with implicit velocity
//! - **Shape retention**: Spring force toward each particle's rest position
//! - **Constraint relaxation**: Alternating-direction Gauss-Seidel sweeps
//! - **Mesh topology**: Deduplicated edges and seam closure for UV spheres
//! - **Pointer interaction**: Ray-cast picking with plane fallback and drag
//! - **Observable**: Monitor ticks via the `StepObserver` trait
//! - **`no_std` compatible**: Works in embedded and WASM environments
//!
//! # Example
//!
//! ```
//! use squishy::{NoOpStepObserver, Simulation, SimulationConfig, TriangleMesh};
//!
//! let mesh = TriangleMesh::uv_sphere(100.0, 30, 30);
//! let mut sim = Simulation::from_mesh(&mesh, 0.1, SimulationConfig::default()).unwrap();
//!
//! let mut vertex_buffer = vec![0.0f32; mesh.vertex_count() * 3];
//! sim.step(&mut NoOpStepObserver);
//! sim.write_positions(&mut vertex_buffer);
//! ```

#![no_std]

extern crate alloc;

pub mod config;
pub mod constraint;
pub mod error;
pub mod mesh;
pub mod observer;
pub mod particle;
pub mod picker;
pub mod ray;
pub mod simulation;
pub mod topology;

// Re-export primary API
pub use config::SimulationConfig;
pub use constraint::{ConstraintSet, DistanceConstraint, EdgeKey, SolveOutcome};
pub use error::{BuildWarning, SimError};
pub use mesh::{LatLongGrid, TriangleMesh};
pub use observer::{NoOpStepObserver, StepObserver};
pub use particle::Particle;
pub use picker::{InteractionPicker, OrbitCamera, PickState, PointerButton, PointerCamera, PointerEvent};
pub use ray::{Plane, Ray};
pub use simulation::{Selection, Simulation};
pub use topology::{Topology, TopologyBuilder};
