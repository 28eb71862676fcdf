//! Simulation driver
//!
//! Owns the particle state and the integrator. The frame loop calls
//! [`Simulation::step`] once per frame and then hands [`Simulation::positions`]
//! and [`Simulation::colors`] to the renderer.

use crate::energy::EnergyReport;
use crate::integrator::Integrator;
use crate::params::SimulationParams;
use crate::state::ParticleState;
use glam::{Vec2, Vec3};
use rand::Rng;

pub struct Simulation {
    params: SimulationParams,
    state: ParticleState,
    integrator: Integrator,
    frame: u64,
    initial_energy: EnergyReport,
}

impl Simulation {
    /// Seed a fresh simulation from the thread-local RNG
    pub fn new(params: SimulationParams) -> Self {
        Self::with_rng(params, &mut rand::rng())
    }

    pub fn with_rng<R: Rng + ?Sized>(params: SimulationParams, rng: &mut R) -> Self {
        let state = ParticleState::seed(
            params.particle_count,
            params.spawn_extent,
            params.seed_pattern,
            rng,
        );
        Self::from_state(params, state)
    }

    /// Wrap an existing state; `params.particle_count` is taken from it
    pub fn from_state(mut params: SimulationParams, state: ParticleState) -> Self {
        params.particle_count = state.len();
        let integrator = Integrator::new(&params);
        // Baseline for drift, taken from the seeded state
        let initial_energy = EnergyReport {
            kinetic: state.kinetic_energy(),
            potential: integrator.potential_energy(&state),
        };
        log::info!(
            "Simulation ready: {} particles, {} force model, {:?} edges, {:?}",
            state.len(),
            integrator.model_name(),
            params.edge_policy,
            params.integration_order
        );
        Self {
            params,
            state,
            integrator,
            frame: 0,
            initial_energy,
        }
    }

    /// Advance one frame.
    ///
    /// `pointer` pins particle 0 to that position after the physics update,
    /// overriding wherever the integrator put it.
    pub fn step(&mut self, dt: f32, pointer: Option<Vec2>) {
        self.integrator.step(&mut self.state, dt);

        if let (Some(target), Some(first)) = (pointer, self.state.positions.first_mut()) {
            *first = target;
        }

        self.frame += 1;

        let interval = self.params.energy_report_interval;
        if interval > 0 && self.frame % interval == 0 {
            self.report_energy();
        }
    }

    fn report_energy(&self) {
        let report = self.energy();
        log::info!(
            "frame {}: {} drift={:+.3}%",
            self.frame,
            report,
            report.drift_from(&self.initial_energy) * 100.0
        );
    }

    /// Kinetic and potential energy of the current state
    pub fn energy(&self) -> EnergyReport {
        EnergyReport {
            kinetic: self.state.kinetic_energy(),
            potential: self.integrator.potential_energy(&self.state),
        }
    }

    /// Energy of the state the simulation started from
    pub fn initial_energy(&self) -> EnergyReport {
        self.initial_energy
    }

    pub fn positions(&self) -> &[Vec2] {
        &self.state.positions
    }

    pub fn velocities(&self) -> &[Vec2] {
        &self.state.velocities
    }

    pub fn colors(&self) -> &[Vec3] {
        &self.state.colors
    }

    pub fn particle_count(&self) -> usize {
        self.state.len()
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }
}
