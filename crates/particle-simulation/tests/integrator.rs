use glam::{Vec2, Vec3};
use particle_physics::{pairwise_acceleration, repeat, Coloring, EdgePolicy};
use particle_simulation::{
    classify, Bounds, DirectSum, ForceModel, Grid, GridCoarsened, GridShape, IntegrationOrder,
    Integrator, ParticleState, Simulation, SimulationParams,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Two particles at rest on the x-axis, `dist` apart
fn two_body_state(dist: f32) -> ParticleState {
    ParticleState::from_parts(
        vec![Vec2::new(-dist / 2.0, 0.0), Vec2::new(dist / 2.0, 0.0)],
        vec![Vec2::ZERO, Vec2::ZERO],
    )
}

fn direct_integrator(g: f32, eps: f32, order: IntegrationOrder) -> Integrator {
    Integrator::with_model(
        Box::new(DirectSum {
            gravitational_constant: g,
            min_distance_squared: eps,
        }),
        order,
        EdgePolicy::Clamp,
        Coloring::Heat { scale: 5.0 },
    )
}

fn small_preset(params: SimulationParams, count: usize) -> SimulationParams {
    SimulationParams {
        particle_count: count,
        ..params
    }
}

// ==================================================================================
// Force bounds
// ==================================================================================

#[test]
fn pairwise_force_is_finite_and_bounded() {
    let g = 1e-5;
    let eps = 1e-7;
    let bound = g / eps;

    let origin = Vec2::new(0.123, -0.456);
    let offsets = [
        Vec2::ZERO,
        Vec2::new(1e-20, 0.0),
        Vec2::new(1e-10, -1e-10),
        Vec2::new(1e-5, 2e-5),
        Vec2::new(-0.3, 0.7),
        Vec2::new(1.9, 1.9),
    ];
    for offset in offsets {
        let a = pairwise_acceleration(origin, origin + offset, g, eps);
        assert!(a.is_finite(), "non-finite for offset {offset:?}");
        assert!(a.length() <= bound * (1.0 + 1e-4), "{a:?} exceeds {bound}");
    }
}

#[test]
fn coincident_particles_stay_finite() {
    let state = ParticleState::from_parts(vec![Vec2::splat(0.2); 4], vec![Vec2::ZERO; 4]);
    let mut sim = Simulation::from_state(SimulationParams::lattice(), state);
    sim.step(0.016, None);

    assert!(sim.positions().iter().all(|p| p.is_finite()));
    assert!(sim.velocities().iter().all(|v| v.is_finite()));
}

// ==================================================================================
// Strategy A: direct pairwise
// ==================================================================================

#[test]
fn two_body_acceleration_matches_inverse_square() {
    let g = 1e-3;
    let dist = 0.4;
    let mut integrator = direct_integrator(g, 1e-7, IntegrationOrder::VelocityFirst);
    let mut state = two_body_state(dist);
    integrator.step(&mut state, 0.0);

    let expected = g / (dist * dist);
    let a = integrator.accelerations();

    // Each points toward the other
    assert!(a[0].x > 0.0 && a[0].y == 0.0);
    assert!(a[1].x < 0.0 && a[1].y == 0.0);
    assert!((a[0].length() - expected).abs() <= expected * 1e-5);
    assert!((a[0] + a[1]).length() <= expected * 1e-5);
}

#[test]
fn two_bodies_fall_toward_each_other() {
    let mut integrator = direct_integrator(1e-3, 1e-7, IntegrationOrder::VelocityFirst);
    let mut state = two_body_state(0.4);
    for _ in 0..10 {
        integrator.step(&mut state, 0.01);
    }
    assert!(state.positions[0].distance(state.positions[1]) < 0.4);
    assert!(state.velocities[0].x > 0.0);
    assert!(state.velocities[1].x < 0.0);
}

// ==================================================================================
// Strategy B: grid-coarsened
// ==================================================================================

#[test]
fn single_occupied_cell_has_no_inter_cell_force() {
    let shape = GridShape::new(30, 30);
    let bounds = Bounds {
        min: Vec2::splat(-1.0),
        max: Vec2::splat(1.0),
    };
    let cluster = [
        Vec2::new(0.101, 0.102),
        Vec2::new(0.104, 0.101),
        Vec2::new(0.108, 0.109),
        Vec2::new(0.102, 0.107),
    ];

    let mut grid = Grid::new(shape);
    grid.rebuild(&cluster, bounds);
    grid.accumulate_forces(1e-3, 1e-6);

    let (row, col) = classify(cluster[0], &bounds, shape);
    assert_eq!(grid.mass(row, col), cluster.len() as f32);
    assert_eq!(grid.total_mass(), cluster.len() as f32);
    for r in 0..shape.rows {
        for c in 0..shape.cols {
            assert_eq!(grid.force(r, c), Vec2::ZERO);
        }
    }
}

#[test]
fn single_occupied_cell_pulls_toward_its_center() {
    let mut integrator = Integrator::with_model(
        Box::new(GridCoarsened::new(GridShape::new(1, 1), 1e-3, 1e-6)),
        IntegrationOrder::VelocityFirst,
        EdgePolicy::Wrap,
        Coloring::White,
    );
    let cluster = vec![
        Vec2::new(0.1, 0.1),
        Vec2::new(0.3, 0.1),
        Vec2::new(0.1, 0.3),
        Vec2::new(0.3, 0.3),
    ];
    let center = Vec2::splat(0.2);
    let mut state = ParticleState::from_parts(cluster.clone(), vec![Vec2::ZERO; cluster.len()]);
    integrator.step(&mut state, 0.0);

    // G * m / d² with m = 4, d² = 0.02
    let expected = 1e-3 * 4.0 / 0.02;
    for (&p, &a) in cluster.iter().zip(integrator.accelerations()) {
        assert!(a.dot(center - p) > 0.0, "{p:?} not pulled toward {center:?}");
        assert!((a.length() - expected).abs() <= expected * 1e-3);
    }
}

#[test]
fn grid_model_conserves_particle_count() {
    let mut rng = StdRng::seed_from_u64(5);
    let params = small_preset(SimulationParams::galaxy(), 2000);
    let mut model = GridCoarsened::new(params.grid, params.gravitational_constant, 1e-6);
    let sim = Simulation::with_rng(params, &mut rng);

    let mut out = vec![Vec2::ZERO; sim.particle_count()];
    model.accelerations(sim.positions(), &mut out);
    assert_eq!(model.grid().total_mass(), 2000.0);
}

// ==================================================================================
// Integration step
// ==================================================================================

#[test]
fn zero_dt_is_a_no_op() {
    for params in [SimulationParams::galaxy(), SimulationParams::lattice()] {
        let mut rng = StdRng::seed_from_u64(9);
        let mut sim = Simulation::with_rng(small_preset(params, 400), &mut rng);
        let positions = sim.positions().to_vec();
        let velocities = sim.velocities().to_vec();

        sim.step(0.0, None);

        assert_eq!(sim.positions(), positions.as_slice());
        assert_eq!(sim.velocities(), velocities.as_slice());
    }
}

#[test]
fn wrap_policy_reenters_from_opposite_side() {
    let eps = 0.01;
    assert!((repeat(1.0 + eps, -1.0, 1.0) - (-1.0 + eps)).abs() < 1e-5);

    let mut integrator = Integrator::with_model(
        Box::new(DirectSum {
            gravitational_constant: 0.0,
            min_distance_squared: 1e-7,
        }),
        IntegrationOrder::VelocityFirst,
        EdgePolicy::Wrap,
        Coloring::White,
    );
    let mut state = ParticleState::from_parts(vec![Vec2::new(0.0, 1.0 + eps)], vec![Vec2::ZERO]);
    integrator.step(&mut state, 0.0);
    assert!((state.positions[0] - Vec2::new(0.0, -1.0 + eps)).length() < 1e-5);
}

#[test]
fn clamp_policy_holds_particles_at_the_edge() {
    let mut integrator = direct_integrator(0.0, 1e-7, IntegrationOrder::PositionFirst);
    let mut state = ParticleState::from_parts(vec![Vec2::new(1.5, -2.0)], vec![Vec2::ZERO]);
    integrator.step(&mut state, 0.0);
    assert_eq!(state.positions[0], Vec2::new(1.0, -1.0));
}

#[test]
fn colors_follow_speed() {
    let mut integrator = direct_integrator(0.0, 1e-7, IntegrationOrder::VelocityFirst);
    let mut state = ParticleState::from_parts(
        vec![Vec2::new(-0.5, 0.0), Vec2::new(0.5, 0.0)],
        vec![Vec2::ZERO, Vec2::new(0.5, 0.0)],
    );
    integrator.step(&mut state, 0.001);
    assert_eq!(state.colors[0], Vec3::ZERO);
    assert_eq!(state.colors[1], Vec3::ONE);
}

#[test]
fn classify_never_overflows_on_seeded_cloud() {
    let mut rng = StdRng::seed_from_u64(21);
    let sim = Simulation::with_rng(small_preset(SimulationParams::galaxy(), 5000), &mut rng);
    let shape = sim.params().grid;
    let bounds = Bounds::enclosing(sim.positions());

    for &p in sim.positions() {
        let (row, col) = classify(p, &bounds, shape);
        assert!(row < shape.rows && col < shape.cols);
    }
    assert_eq!(classify(bounds.max, &bounds, shape), (shape.rows - 1, shape.cols - 1));
}
