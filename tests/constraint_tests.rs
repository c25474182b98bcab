use glam::Vec3;
use squishy::{ConstraintSet, DistanceConstraint, NoOpStepObserver, Particle, SolveOutcome, StepObserver};

#[derive(Default)]
struct PassRecorder {
    passes: Vec<(usize, bool)>,
    degenerate: Vec<(usize, usize)>,
}

impl StepObserver for PassRecorder {
    fn on_constraint_pass(&mut self, pass: usize, reverse: bool) {
        self.passes.push((pass, reverse));
    }

    fn on_degenerate_constraint(&mut self, a: usize, b: usize) {
        self.degenerate.push((a, b));
    }
}

#[test]
fn isolated_constraint_converges_monotonically() {
    let mut particles = vec![
        Particle::new(Vec3::new(0.0, 0.0, 0.0), 1.0),
        Particle::new(Vec3::new(5.0, 0.0, 0.0), 1.0),
    ];
    let constraint = DistanceConstraint::new(0, 1, 5.0);
    particles[1].position = Vec3::new(17.0, 3.0, -4.0);

    let mut last_error = f32::INFINITY;
    for _ in 0..10 {
        constraint.solve(&mut particles);
        let error = (particles[0].position.distance(particles[1].position) - 5.0).abs();
        assert!(error <= last_error + 1e-6, "error grew from {} to {}", last_error, error);
        last_error = error;
    }
    assert!(last_error < 1e-4, "final error {}", last_error);
}

#[test]
fn movable_pair_splits_correction_evenly() {
    let mut particles = [
        Particle::new(Vec3::new(0.0, 0.0, 0.0), 1.0),
        Particle::new(Vec3::new(10.0, 0.0, 0.0), 1.0),
    ];
    DistanceConstraint::new(0, 1, 4.0).solve(&mut particles);
    assert!((particles[0].position.x - 3.0).abs() < 1e-5);
    assert!((particles[1].position.x - 7.0).abs() < 1e-5);
}

#[test]
fn unequal_masses_still_split_evenly() {
    let mut particles = [
        Particle::new(Vec3::new(0.0, 0.0, 0.0), 10.0),
        Particle::new(Vec3::new(10.0, 0.0, 0.0), 0.1),
    ];
    DistanceConstraint::new(0, 1, 4.0).solve(&mut particles);
    let moved_a = particles[0].position.distance(Vec3::ZERO);
    let moved_b = particles[1].position.distance(Vec3::new(10.0, 0.0, 0.0));
    assert!((moved_a - moved_b).abs() < 1e-5);
}

#[test]
fn zero_distance_is_left_alone() {
    let p = Vec3::new(1.0, 2.0, 3.0);
    let mut particles = [Particle::new(p, 1.0), Particle::new(p, 1.0)];
    let outcome = DistanceConstraint::new(0, 1, 2.0).solve(&mut particles);
    assert_eq!(outcome, SolveOutcome::Degenerate);
    assert_eq!(particles[0].position, p);
    assert_eq!(particles[1].position, p);
    assert!(particles.iter().all(|q| q.position.is_finite()));
}

#[test]
fn degenerate_constraint_reported_each_pass() {
    let p = Vec3::ONE;
    let mut particles = vec![Particle::new(p, 1.0), Particle::new(p, 1.0)];
    let mut set = ConstraintSet::new();
    set.insert(DistanceConstraint::new(0, 1, 0.0));

    let mut recorder = PassRecorder::default();
    set.relax(&mut particles, 3, &mut recorder);
    assert_eq!(recorder.degenerate, vec![(0, 1); 3]);
}

#[test]
fn sweeps_alternate_direction() {
    let mut particles = vec![Particle::new(Vec3::ZERO, 1.0), Particle::new(Vec3::X, 1.0)];
    let mut set = ConstraintSet::new();
    set.insert(DistanceConstraint::new(0, 1, 1.0));

    let mut recorder = PassRecorder::default();
    set.relax(&mut particles, 5, &mut recorder);
    assert_eq!(
        recorder.passes,
        vec![(0, false), (1, true), (2, false), (3, true), (4, false)]
    );
}

#[test]
fn sweep_order_changes_chain_result() {
    // Three particles in a line, both links stretched. The first constraint
    // solved sees stale positions, so direction matters after one pass.
    let chain = || {
        vec![
            Particle::new(Vec3::new(0.0, 0.0, 0.0), 1.0),
            Particle::new(Vec3::new(2.0, 0.0, 0.0), 1.0),
            Particle::new(Vec3::new(4.0, 0.0, 0.0), 1.0),
        ]
    };
    let mut set = ConstraintSet::new();
    set.insert(DistanceConstraint::new(0, 1, 1.0));
    set.insert(DistanceConstraint::new(1, 2, 1.0));

    let mut forward = chain();
    set.relax(&mut forward, 1, &mut NoOpStepObserver);

    let mut two_pass = chain();
    set.relax(&mut two_pass, 2, &mut NoOpStepObserver);

    let forward_error: f32 = set
        .iter()
        .map(|c| (forward[c.a].position.distance(forward[c.b].position) - c.rest_distance).abs())
        .sum();
    let two_pass_error: f32 = set
        .iter()
        .map(|c| (two_pass[c.a].position.distance(two_pass[c.b].position) - c.rest_distance).abs())
        .sum();
    assert!(two_pass_error < forward_error);
}

#[test]
fn pinned_endpoint_never_moves_under_relaxation() {
    let mut particles = vec![
        Particle::pinned(Vec3::ZERO),
        Particle::new(Vec3::new(3.0, 0.0, 0.0), 1.0),
        Particle::new(Vec3::new(3.0, 3.0, 0.0), 1.0),
    ];
    let mut set = ConstraintSet::new();
    set.insert(DistanceConstraint::new(0, 1, 1.0));
    set.insert(DistanceConstraint::new(1, 2, 1.0));
    set.insert(DistanceConstraint::new(2, 0, 1.0));

    set.relax(&mut particles, 50, &mut NoOpStepObserver);
    assert_eq!(particles[0].position, Vec3::ZERO);
}

#[test]
fn pinned_anchor_halves_the_correction() {
    let mut particles = vec![
        Particle::pinned(Vec3::ZERO),
        Particle::new(Vec3::new(4.0, 0.0, 0.0), 1.0),
    ];
    let constraint = DistanceConstraint::new(0, 1, 2.0);
    constraint.solve(&mut particles);
    assert_eq!(particles[0].position, Vec3::ZERO);
    assert!((particles[1].position.x - 3.0).abs() < 1e-6, "movable x = {}", particles[1].position.x);

    // Each further solve halves the remaining gap.
    constraint.solve(&mut particles);
    assert!((particles[1].position.x - 2.5).abs() < 1e-6, "movable x = {}", particles[1].position.x);
}

#[test]
#[should_panic]
fn out_of_range_constraint_panics() {
    let mut particles = vec![Particle::new(Vec3::ZERO, 1.0)];
    let mut set = ConstraintSet::new();
    set.insert(DistanceConstraint::new(0, 3, 1.0));
    set.relax(&mut particles, 1, &mut NoOpStepObserver);
}
