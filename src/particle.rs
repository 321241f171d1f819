// Point-mass particle rendered as a sphere: kinematic state plus the
// material color and radius it was spawned with

use crate::color::Color;
extern crate nalgebra_glm as glm;
use glm::DVec3;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Particle {
    pub position: DVec3,
    pub velocity: DVec3,
    pub acceleration: DVec3,
    pub color: Color,
    pub radius: f64,
    /// Milliseconds on the host's monotonic clock.
    pub spawn_time: f64,
    pub last_update: f64,
}

impl Particle {
    pub fn new(
        position: DVec3,
        velocity: DVec3,
        acceleration: DVec3,
        color: Color,
        radius: f64,
        spawn_time: f64,
    ) -> Particle {
        debug_assert!(radius > 0.0, "particle radius must be positive");
        Particle {
            position,
            velocity,
            acceleration,
            color,
            radius,
            spawn_time,
            last_update: spawn_time,
        }
    }

    /// Model transform of the unit sphere standing in for this particle.
    pub fn model_matrix(&self) -> glm::Mat4 {
        let translate = glm::translation(&glm::vec3(
            self.position.x as f32,
            self.position.y as f32,
            self.position.z as f32,
        ));
        let r = self.radius as f32;
        glm::scale(&translate, &glm::vec3(r, r, r))
    }
}
