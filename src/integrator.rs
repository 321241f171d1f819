// Per-frame kinematics and boundary collision response for a single particle.
//
// With `TimeBase::SinceSpawn` elapsed time is measured from the particle's
// spawn, not the previous frame. The decayed velocity is written back, so the
// next frame starts from it; a velocity reflected by a collision is then
// scaled by a growing elapsed value rather than integrated incrementally.

use crate::config::{SimConfig, TimeBase};
use crate::particle::Particle;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum VerticalState {
    Falling,
    Resting,
}

pub struct Integrator<'a> {
    config: &'a SimConfig,
}

impl<'a> Integrator<'a> {
    pub fn new(config: &'a SimConfig) -> Self {
        Integrator { config }
    }

    /// Integrates then resolves collisions, the full per-frame update.
    pub fn step(&self, particle: &mut Particle, now: f64) {
        self.integrate(particle, now);
        self.resolve_collision(particle);
    }

    /// Simulation time to integrate over at `now`, never negative.
    pub fn elapsed(&self, particle: &Particle, now: f64) -> f64 {
        let elapsed = match self.config.time_base {
            TimeBase::SinceSpawn => self.config.time_scale * (now - particle.spawn_time),
            TimeBase::SinceLastUpdate => {
                let frame = self.config.time_scale * (now - particle.last_update);
                frame.min(self.config.max_frame_elapsed)
            }
        };
        // f64::max also maps NaN to 0
        elapsed.max(0.0)
    }

    pub fn integrate(&self, particle: &mut Particle, now: f64) {
        let elapsed = self.elapsed(particle, now);
        self.advance(particle, elapsed);
        if now > particle.last_update {
            particle.last_update = now;
        }
    }

    /// Moves the particle forward by `elapsed` units of simulation time.
    pub fn advance(&self, particle: &mut Particle, elapsed: f64) {
        let elapsed = elapsed.max(0.0);
        let dv = particle.acceleration * elapsed;
        let v = (particle.velocity + dv) * self.config.friction.powf(elapsed);
        let dp = v * elapsed;
        particle.velocity = v;
        particle.position += dp;
    }

    pub fn resolve_collision(&self, particle: &mut Particle) {
        let b = self.config.boundary;
        for axis in 0..3 {
            if particle.position[axis] < b && particle.position[axis] > -b {
                continue;
            }
            particle.velocity[axis] *= -self.config.restitution;
            if axis == 1 {
                self.settle_on_floor(particle);
            }
        }
    }

    // Stops endless micro-bounces and tunnelling through the floor
    fn settle_on_floor(&self, particle: &mut Particle) {
        let b = self.config.boundary;
        if particle.position.y <= -b && particle.velocity.y.abs() < self.config.rest_speed {
            particle.acceleration.y = 0.0;
            particle.velocity.y = 0.0;
        }
        let floor = self.config.floor_limit();
        if particle.position.y <= floor {
            particle.acceleration.y = 0.0;
            particle.velocity.y = 0.0;
            particle.position.y = floor;
        }
    }

    pub fn vertical_state(&self, particle: &Particle) -> VerticalState {
        let on_floor = particle.position.y <= -self.config.boundary;
        if on_floor && particle.acceleration.y == 0.0 && particle.velocity.y == 0.0 {
            VerticalState::Resting
        } else {
            VerticalState::Falling
        }
    }
}
