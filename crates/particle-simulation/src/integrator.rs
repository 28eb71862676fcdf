//! Force models and the semi-implicit Euler integrator
//!
//! The integrator owns one [`ForceModel`]; the model fills an acceleration per
//! particle and the integrator applies edge policy, velocity/position updates
//! and coloring around it.

use crate::grid::{classify, Bounds, Grid, GridShape};
use crate::params::{IntegrationOrder, SimulationParams, Strategy};
use crate::state::ParticleState;
use glam::Vec2;
use particle_physics::{center_pull, inverse_square, pair_potential, Coloring, EdgePolicy};

/// Source of per-particle acceleration
pub trait ForceModel {
    /// Overwrite `out[i]` with the acceleration of particle `i`
    fn accelerations(&mut self, positions: &[Vec2], out: &mut [Vec2]);

    /// Gravitational potential of `positions`
    fn potential_energy(&self, positions: &[Vec2]) -> f32;

    fn name(&self) -> &'static str;
}

/// Brute-force pairwise sum over all particles
pub struct DirectSum {
    pub gravitational_constant: f32,
    pub min_distance_squared: f32,
}

impl ForceModel for DirectSum {
    fn accelerations(&mut self, positions: &[Vec2], out: &mut [Vec2]) {
        for (i, (&position, acceleration)) in positions.iter().zip(out.iter_mut()).enumerate() {
            let mut sum = Vec2::ZERO;
            for (j, &other) in positions.iter().enumerate() {
                if i == j {
                    continue;
                }
                sum += inverse_square(other - position, self.min_distance_squared);
            }
            *acceleration = sum * self.gravitational_constant;
        }
    }

    fn potential_energy(&self, positions: &[Vec2]) -> f32 {
        let mut potential = 0.0;
        for (i, &a) in positions.iter().enumerate() {
            for &b in &positions[i + 1..] {
                potential += pair_potential(
                    a.distance_squared(b),
                    self.gravitational_constant,
                    self.min_distance_squared,
                );
            }
        }
        potential
    }

    fn name(&self) -> &'static str {
        "direct"
    }
}

/// Particles binned into a grid over their bounding box.
/// Cells interact pairwise; particles feel their cell's force plus a pull
/// toward the cell center when they share the cell.
pub struct GridCoarsened {
    grid: Grid,
    pub gravitational_constant: f32,
    pub min_distance_squared: f32,
}

impl GridCoarsened {
    pub fn new(shape: GridShape, gravitational_constant: f32, min_distance_squared: f32) -> Self {
        Self {
            grid: Grid::new(shape),
            gravitational_constant,
            min_distance_squared,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }
}

impl ForceModel for GridCoarsened {
    fn accelerations(&mut self, positions: &[Vec2], out: &mut [Vec2]) {
        let bounds = Bounds::enclosing(positions);
        self.grid.rebuild(positions, bounds);
        self.grid
            .accumulate_forces(self.gravitational_constant, self.min_distance_squared);

        let shape = self.grid.shape();
        for (&position, acceleration) in positions.iter().zip(out.iter_mut()) {
            let (row, col) = classify(position, &bounds, shape);
            let mut force = self.grid.force(row, col);

            let mass = self.grid.mass(row, col);
            if mass > 1.0 {
                force += center_pull(
                    position,
                    self.grid.center(row, col),
                    mass,
                    self.gravitational_constant,
                    self.min_distance_squared,
                );
            }
            *acceleration = force;
        }
    }

    /// Rebinned from `positions`; the cached grid still holds the previous
    /// step's layout once the integrator has moved the particles
    fn potential_energy(&self, positions: &[Vec2]) -> f32 {
        let mut grid = Grid::new(self.grid.shape());
        grid.rebuild(positions, Bounds::enclosing(positions));
        grid.potential_energy(self.gravitational_constant, self.min_distance_squared)
    }

    fn name(&self) -> &'static str {
        "grid"
    }
}

pub struct Integrator {
    model: Box<dyn ForceModel>,
    order: IntegrationOrder,
    edge_policy: EdgePolicy,
    coloring: Coloring,
    accelerations: Vec<Vec2>,
}

impl Integrator {
    pub fn new(params: &SimulationParams) -> Self {
        let model: Box<dyn ForceModel> = match params.strategy {
            Strategy::Direct => Box::new(DirectSum {
                gravitational_constant: params.gravitational_constant,
                min_distance_squared: params.min_distance_squared,
            }),
            Strategy::Grid => Box::new(GridCoarsened::new(
                params.grid,
                params.gravitational_constant,
                params.min_distance_squared,
            )),
        };
        Self::with_model(
            model,
            params.integration_order,
            params.edge_policy,
            params.coloring,
        )
    }

    pub fn with_model(
        model: Box<dyn ForceModel>,
        order: IntegrationOrder,
        edge_policy: EdgePolicy,
        coloring: Coloring,
    ) -> Self {
        Self {
            model,
            order,
            edge_policy,
            coloring,
            accelerations: Vec::new(),
        }
    }

    pub fn model_name(&self) -> &'static str {
        self.model.name()
    }

    /// Acceleration of each particle from the most recent step
    pub fn accelerations(&self) -> &[Vec2] {
        &self.accelerations
    }

    /// Advance every particle by `dt` simulated seconds
    pub fn step(&mut self, state: &mut ParticleState, dt: f32) {
        for position in state.positions.iter_mut() {
            *position = self.edge_policy.apply(*position);
        }

        self.accelerations.resize(state.len(), Vec2::ZERO);
        self.model
            .accelerations(&state.positions, &mut self.accelerations);

        let particles = state
            .positions
            .iter_mut()
            .zip(state.velocities.iter_mut())
            .zip(state.colors.iter_mut())
            .zip(self.accelerations.iter());

        for (((position, velocity), color), &acceleration) in particles {
            match self.order {
                IntegrationOrder::VelocityFirst => {
                    *velocity += acceleration * dt;
                    *position += *velocity * dt;
                }
                IntegrationOrder::PositionFirst => {
                    *position += *velocity * dt;
                    *velocity += acceleration * dt;
                }
            }
            *color = self.coloring.color(*velocity);
        }
    }

    /// Potential energy as seen by the force model
    pub fn potential_energy(&self, state: &ParticleState) -> f32 {
        self.model.potential_energy(&state.positions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_two_bodies() {
        let mut model = DirectSum {
            gravitational_constant: 2.0,
            min_distance_squared: 1e-7,
        };
        let positions = [Vec2::new(-0.25, 0.0), Vec2::new(0.25, 0.0)];
        let mut out = [Vec2::ZERO; 2];
        model.accelerations(&positions, &mut out);

        // G / d² = 2 / 0.25
        assert!((out[0] - Vec2::new(8.0, 0.0)).length() < 1e-4);
        assert!((out[1] - Vec2::new(-8.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn test_direct_symmetric_configuration_cancels() {
        let mut model = DirectSum {
            gravitational_constant: 1.0,
            min_distance_squared: 1e-7,
        };
        let positions = [
            Vec2::ZERO,
            Vec2::new(0.5, 0.0),
            Vec2::new(-0.5, 0.0),
            Vec2::new(0.0, 0.5),
            Vec2::new(0.0, -0.5),
        ];
        let mut out = [Vec2::ONE; 5];
        model.accelerations(&positions, &mut out);
        assert!(out[0].length() < 1e-4);
    }

    #[test]
    fn test_grid_single_cell_pulls_toward_center() {
        let mut model = GridCoarsened::new(GridShape::new(1, 1), 1.0, 1e-6);
        let positions = [Vec2::new(-0.5, -0.5), Vec2::new(0.5, 0.5), Vec2::new(0.5, -0.5)];
        let mut out = [Vec2::ZERO; 3];
        model.accelerations(&positions, &mut out);

        let center = model.grid().center(0, 0);
        assert_eq!(center, Vec2::ZERO);
        assert_eq!(model.grid().force(0, 0), Vec2::ZERO);
        for (&p, &a) in positions.iter().zip(&out) {
            assert!(a.dot(center - p) > 0.0);
            // G * m / d² with m = 3, d² = 0.5
            assert!((a.length() - 6.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_grid_lone_particle_has_no_self_pull() {
        let mut model = GridCoarsened::new(GridShape::new(2, 2), 1.0, 1e-6);
        let positions = [Vec2::new(-1.0, -1.0), Vec2::new(1.0, 1.0)];
        let mut out = [Vec2::ZERO; 2];
        model.accelerations(&positions, &mut out);

        // Each alone in its cell: only the inter-cell term
        assert_eq!(out[0], model.grid().force(0, 0));
        assert_eq!(out[1], model.grid().force(1, 1));
        assert!(out[0].x > 0.0 && out[0].y > 0.0);
    }

    #[test]
    fn test_grid_potential_follows_current_positions() {
        let mut model = GridCoarsened::new(GridShape::new(30, 30), 1.0, 1e-6);
        let before = [Vec2::new(-0.8, 0.0), Vec2::new(0.8, 0.0)];
        let mut out = [Vec2::ZERO; 2];
        model.accelerations(&before, &mut out);

        let after = [Vec2::new(-0.1, 0.0), Vec2::new(0.1, 0.0)];
        let mut fresh = GridCoarsened::new(GridShape::new(30, 30), 1.0, 1e-6);
        fresh.accelerations(&after, &mut out);

        let expected = fresh.grid().potential_energy(1.0, 1e-6);
        assert!((model.potential_energy(&after) - expected).abs() <= expected.abs() * 1e-6);
        assert!(model.potential_energy(&after) < model.potential_energy(&before));
    }

    #[test]
    fn test_velocity_first_order() {
        let model = Box::new(DirectSum {
            gravitational_constant: 0.0,
            min_distance_squared: 1e-7,
        });
        let mut integrator = Integrator::with_model(
            model,
            IntegrationOrder::VelocityFirst,
            EdgePolicy::Clamp,
            Coloring::White,
        );
        let mut state = ParticleState::from_parts(vec![Vec2::ZERO], vec![Vec2::new(0.1, 0.0)]);
        integrator.step(&mut state, 0.5);
        assert!((state.positions[0] - Vec2::new(0.05, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_position_first_uses_previous_velocity() {
        let mut integrator = Integrator::with_model(
            Box::new(DirectSum {
                gravitational_constant: 1.0,
                min_distance_squared: 1e-7,
            }),
            IntegrationOrder::PositionFirst,
            EdgePolicy::Clamp,
            Coloring::White,
        );
        let mut state = ParticleState::from_parts(
            vec![Vec2::new(-0.5, 0.0), Vec2::new(0.5, 0.0)],
            vec![Vec2::ZERO, Vec2::ZERO],
        );
        integrator.step(&mut state, 0.1);

        // Started at rest, so positions lag one step behind the kick
        assert_eq!(state.positions[0], Vec2::new(-0.5, 0.0));
        assert!(state.velocities[0].x > 0.0);
        assert_eq!(integrator.accelerations().len(), 2);
    }

    #[test]
    fn test_heat_coloring_applied() {
        let mut integrator = Integrator::with_model(
            Box::new(DirectSum {
                gravitational_constant: 0.0,
                min_distance_squared: 1e-7,
            }),
            IntegrationOrder::VelocityFirst,
            EdgePolicy::Wrap,
            Coloring::Heat { scale: 5.0 },
        );
        let mut state = ParticleState::from_parts(
            vec![Vec2::ZERO, Vec2::new(0.5, 0.5)],
            vec![Vec2::ZERO, Vec2::new(0.0, 1.0)],
        );
        integrator.step(&mut state, 0.01);
        assert_eq!(state.colors[0], glam::Vec3::ZERO);
        assert_eq!(state.colors[1], glam::Vec3::ONE);
    }
}
