// Owns every live particle. Particles are only ever appended, or all dropped
// at once on reset; insertion order is the draw order.

use crate::color::Color;
use crate::config::SimConfig;
use crate::particle::Particle;
use rand::Rng;
extern crate nalgebra_glm as glm;

/// Index of a particle in the store. Invalidated by `reset`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ParticleHandle(pub usize);

#[derive(Default, Debug, Clone)]
pub struct ParticleStore {
    particles: Vec<Particle>,
}

impl ParticleStore {
    pub fn new() -> Self {
        ParticleStore {
            particles: Vec::new(),
        }
    }

    // Random position inside the box, upward/forward biased velocity,
    // random color, default downward acceleration
    pub fn spawn<R: Rng + ?Sized>(
        &mut self,
        config: &SimConfig,
        rng: &mut R,
        now: f64,
    ) -> ParticleHandle {
        let ranges = &config.spawn;
        let mut position = glm::DVec3::zeros();
        let mut velocity = glm::DVec3::zeros();
        for axis in 0..3 {
            position[axis] = ranges.position_range(axis, config.boundary).sample(rng);
            velocity[axis] = ranges.velocity_range(axis).sample(rng);
        }
        let color = Color::new(
            ranges.color[0].sample(rng) as f32,
            ranges.color[1].sample(rng) as f32,
            ranges.color[2].sample(rng) as f32,
        );
        let [ax, ay, az] = SimConfig::SPAWN_ACCELERATION;
        self.push(Particle::new(
            position,
            velocity,
            glm::vec3(ax, ay, az),
            color,
            config.radius,
            now,
        ))
    }

    pub fn push(&mut self, particle: Particle) -> ParticleHandle {
        self.particles.push(particle);
        ParticleHandle(self.particles.len() - 1)
    }

    pub fn reset(&mut self) {
        self.particles.clear();
    }

    /// Overwrites the acceleration of every particle currently in the store.
    pub fn set_gravity(&mut self, g: f64) {
        for particle in &mut self.particles {
            particle.acceleration = glm::vec3(0.0, g, 0.0);
        }
    }

    pub fn get(&self, handle: ParticleHandle) -> Option<&Particle> {
        self.particles.get(handle.0)
    }

    pub fn get_mut(&mut self, handle: ParticleHandle) -> Option<&mut Particle> {
        self.particles.get_mut(handle.0)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Particle> {
        self.particles.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Particle> {
        self.particles.iter_mut()
    }

    pub fn for_each<F: FnMut(&Particle)>(&self, f: F) {
        self.particles.iter().for_each(f)
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

impl<'a> IntoIterator for &'a ParticleStore {
    type Item = &'a Particle;
    type IntoIter = std::slice::Iter<'a, Particle>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    extern crate nalgebra_glm as glm;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn store_with(count: usize) -> ParticleStore {
        let config = SimConfig::default();
        let mut rng = StdRng::seed_from_u64(3);
        let mut store = ParticleStore::new();
        for i in 0..count {
            store.spawn(&config, &mut rng, i as f64);
        }
        store
    }

    #[test]
    fn spawned_particles_respect_bounds() {
        let config = SimConfig::default();
        let b = config.boundary;
        let store = store_with(500);
        assert_eq!(store.len(), 500);
        for p in &store {
            for axis in 0..3 {
                assert!(p.position[axis] >= -0.9 * b && p.position[axis] <= 0.9 * b);
            }
            assert!(p.velocity.x >= -150.0 && p.velocity.x <= 150.0);
            assert!(p.velocity.y >= -150.0 && p.velocity.y <= 300.0);
            assert!(p.velocity.z >= 0.0 && p.velocity.z <= 150.0);
            assert!(p.color.is_normalized());
            assert_eq!(p.radius, 1.5);
            assert_eq!(p.acceleration, glm::vec3(0.0, -1.0, 0.0));
        }
    }

    #[test]
    fn spawned_vertical_velocity_can_point_down() {
        let store = store_with(500);
        assert!(store.iter().any(|p| p.velocity.y < 0.0));
        assert!(store.iter().any(|p| p.velocity.y > 150.0));
    }

    #[test]
    fn spawn_records_time_and_returns_handle() {
        let config = SimConfig::default();
        let mut rng = StdRng::seed_from_u64(5);
        let mut store = ParticleStore::new();
        store.spawn(&config, &mut rng, 10.0);
        let handle = store.spawn(&config, &mut rng, 20.0);
        assert_eq!(handle, ParticleHandle(1));
        assert_eq!(store.get(handle).map(|p| p.spawn_time), Some(20.0));
    }

    #[test]
    fn gravity_broadcast_skips_later_spawns() {
        let config = SimConfig::default();
        let mut rng = StdRng::seed_from_u64(9);
        let mut store = store_with(4);
        store.set_gravity(-5.0);
        let late = store.spawn(&config, &mut rng, 100.0);
        for p in store.iter().take(4) {
            assert_eq!(p.acceleration, glm::vec3(0.0, -5.0, 0.0));
        }
        assert_eq!(
            store.get(late).map(|p| p.acceleration),
            Some(glm::vec3(0.0, -1.0, 0.0))
        );
    }

    #[test]
    fn reset_empties_store() {
        let mut empty = ParticleStore::new();
        empty.reset();
        assert!(empty.is_empty());

        for count in &[1, 7, 64] {
            let mut store = store_with(*count);
            store.reset();
            assert!(store.is_empty());
            assert_eq!(store.iter().count(), 0);
        }
    }

    #[test]
    fn traversal_is_insertion_order_and_restartable() {
        let store = store_with(5);
        let first: Vec<f64> = store.iter().map(|p| p.spawn_time).collect();
        let mut second = Vec::new();
        store.for_each(|p| second.push(p.spawn_time));
        assert_eq!(first, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
        assert_eq!(first, second);
    }
}
