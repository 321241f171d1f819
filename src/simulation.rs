// Simulation context owned by the render loop: config, particles, gravity
// mode and the random source used for spawning.

use crate::color::Color;
use crate::config::{GravityMode, SimConfig};
use crate::integrator::{Integrator, VerticalState};
use crate::store::{ParticleHandle, ParticleStore};
use rand::rngs::StdRng;
use rand::SeedableRng;
extern crate nalgebra_glm as glm;

/// Anything that can draw a pre-tessellated unit sphere.
pub trait SphereSink {
    fn draw_unit_sphere(&mut self, transform: &glm::Mat4, color: Color);
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SphereInstance {
    pub transform: glm::Mat4,
    pub color: Color,
}

impl SphereSink for Vec<SphereInstance> {
    fn draw_unit_sphere(&mut self, transform: &glm::Mat4, color: Color) {
        self.push(SphereInstance {
            transform: *transform,
            color,
        });
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub particles: usize,
    pub resting: usize,
}

pub struct Simulation {
    pub config: SimConfig,
    store: ParticleStore,
    gravity_mode: GravityMode,
    rng: StdRng,
}

impl Simulation {
    pub fn new(config: SimConfig) -> Self {
        Simulation::with_rng(config, StdRng::from_entropy())
    }

    pub fn with_seed(config: SimConfig, seed: u64) -> Self {
        Simulation::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: SimConfig, rng: StdRng) -> Self {
        Simulation {
            config,
            store: ParticleStore::new(),
            gravity_mode: GravityMode::Gravity,
            rng,
        }
    }

    pub fn particles(&self) -> &ParticleStore {
        &self.store
    }

    pub fn particles_mut(&mut self) -> &mut ParticleStore {
        &mut self.store
    }

    pub fn gravity_mode(&self) -> GravityMode {
        self.gravity_mode
    }

    /// Spawns a particle, then re-broadcasts the current gravity so every
    /// particle, the new one included, shares the same acceleration.
    pub fn spawn(&mut self, now: f64) -> ParticleHandle {
        let handle = self.store.spawn(&self.config, &mut self.rng, now);
        self.store.set_gravity(self.config.gravity_for(self.gravity_mode));
        handle
    }

    pub fn reset(&mut self) {
        self.store.reset();
    }

    /// Switches gravity mode and broadcasts the matching acceleration to every
    /// particle currently alive, waking any that were resting.
    pub fn set_gravity_mode(&mut self, mode: GravityMode) {
        self.gravity_mode = mode;
        self.store.set_gravity(self.config.gravity_for(mode));
    }

    /// Advances every particle to `now` and applies collision response.
    pub fn step(&mut self, now: f64) -> FrameStats {
        let integrator = Integrator::new(&self.config);
        let mut stats = FrameStats {
            particles: self.store.len(),
            resting: 0,
        };
        for particle in self.store.iter_mut() {
            integrator.step(particle, now);
            if integrator.vertical_state(particle) == VerticalState::Resting {
                stats.resting += 1;
            }
        }
        stats
    }

    /// Emits one unit sphere per particle, in insertion order.
    pub fn draw<S: SphereSink + ?Sized>(&self, sink: &mut S) {
        for particle in &self.store {
            sink.draw_unit_sphere(&particle.model_matrix(), particle.color);
        }
    }

    pub fn instances(&self) -> Vec<SphereInstance> {
        let mut instances = Vec::with_capacity(self.store.len());
        self.draw(&mut instances);
        instances
    }
}
