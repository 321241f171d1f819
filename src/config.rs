// Simulation parameters. Everything the physics core needs is carried here
// so the render loop can own a single context instead of globals.

use rand::Rng;

/// Inclusive range a spawn attribute is drawn from, quantized to `1 / resolution`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RandomRange {
    pub min: f64,
    pub max: f64,
    pub resolution: f64,
}

impl RandomRange {
    pub const fn new(min: f64, max: f64, resolution: f64) -> Self {
        RandomRange { min, max, resolution }
    }

    /// Uniform sample in `[min, max]`, rounded to the range's resolution.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let span = self.max - self.min;
        let steps = (rng.gen::<f64>() * span * self.resolution).round();
        // rounding can overshoot the upper end by an ulp
        (steps / self.resolution + self.min).max(self.min).min(self.max)
    }

    pub fn scaled(&self, factor: f64) -> RandomRange {
        let (a, b) = (self.min * factor, self.max * factor);
        RandomRange::new(a.min(b), a.max(b), self.resolution / factor.abs())
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Per-axis and per-channel ranges used when spawning a particle.
///
/// Position ranges are fractions of the boundary half-extent, velocity ranges
/// are fractions of `velocity_scale`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnRanges {
    pub position: [RandomRange; 3],
    pub velocity: [RandomRange; 3],
    pub velocity_scale: f64,
    pub color: [RandomRange; 3],
}

impl Default for SpawnRanges {
    fn default() -> Self {
        let position = RandomRange::new(-0.9, 0.9, 10_000.0);
        let channel = RandomRange::new(0.0, 1.0, 1_000.0);
        SpawnRanges {
            position: [position; 3],
            // biased upward and forward
            velocity: [
                RandomRange::new(-0.5, 0.5, 10_000.0),
                RandomRange::new(-0.5, 1.0, 10_000.0),
                RandomRange::new(0.0, 0.5, 10_000.0),
            ],
            velocity_scale: 300.0,
            color: [channel; 3],
        }
    }
}

impl SpawnRanges {
    /// Position range in world units. Quantized in world units, unlike velocity.
    pub fn position_range(&self, axis: usize, boundary: f64) -> RandomRange {
        let range = self.position[axis];
        RandomRange::new(range.min * boundary, range.max * boundary, range.resolution)
    }

    pub fn velocity_range(&self, axis: usize) -> RandomRange {
        self.velocity[axis].scaled(self.velocity_scale)
    }
}

/// What elapsed time is measured from when integrating a particle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeBase {
    /// Time since the particle was spawned. State is re-derived from the
    /// stored velocity each frame, so reflected velocities are overwritten.
    SinceSpawn,
    /// Time since the particle was last integrated, capped at
    /// `SimConfig::max_frame_elapsed`.
    SinceLastUpdate,
}

/// Global gravity toggle broadcast to every particle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GravityMode {
    Gravity,
    Space,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimConfig {
    /// Half-extent of the cubic world.
    pub boundary: f64,
    /// Velocity decay per unit of simulation time, in (0, 1).
    pub friction: f64,
    /// Milliseconds to simulation time.
    pub time_scale: f64,
    /// Y acceleration broadcast in `GravityMode::Gravity`.
    pub gravity: f64,
    pub radius: f64,
    pub restitution: f64,
    /// Below this |v.y| a particle on the floor comes to rest.
    pub rest_speed: f64,
    /// Floor penetration allowed before a hard clamp, as a fraction of the boundary.
    pub floor_tolerance: f64,
    pub time_base: TimeBase,
    /// Upper bound on one frame's elapsed time with `TimeBase::SinceLastUpdate`.
    pub max_frame_elapsed: f64,
    pub spawn: SpawnRanges,
}

impl SimConfig {
    pub const SPAWN_ACCELERATION: [f64; 3] = [0.0, -1.0, 0.0];

    /// Y coordinate of the hard floor clamp.
    pub fn floor_limit(&self) -> f64 {
        -self.boundary - self.floor_tolerance * self.boundary
    }

    pub fn gravity_for(&self, mode: GravityMode) -> f64 {
        match mode {
            GravityMode::Gravity => self.gravity,
            GravityMode::Space => 0.0,
        }
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig {
            boundary: 50.0,
            friction: 0.9,
            time_scale: 0.00001,
            gravity: -5.0,
            radius: 1.5,
            restitution: 0.99,
            rest_speed: 0.001,
            floor_tolerance: 0.01,
            time_base: TimeBase::SinceSpawn,
            max_frame_elapsed: 0.001,
            spawn: SpawnRanges::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn samples_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let range = RandomRange::new(-45.0, 45.0, 10_000.0);
        for _ in 0..1000 {
            assert!(range.contains(range.sample(&mut rng)));
        }
    }

    #[test]
    fn samples_are_quantized() {
        let mut rng = StdRng::seed_from_u64(11);
        let range = RandomRange::new(0.0, 1.0, 1_000.0);
        for _ in 0..100 {
            let v = range.sample(&mut rng) * 1_000.0;
            assert!((v - v.round()).abs() < 1e-6);
        }
    }

    #[test]
    fn default_velocity_ranges() {
        let spawn = SpawnRanges::default();
        assert_eq!(spawn.velocity_range(0).min, -150.0);
        assert_eq!(spawn.velocity_range(0).max, 150.0);
        assert_eq!(spawn.velocity_range(1).min, -150.0);
        assert_eq!(spawn.velocity_range(1).max, 300.0);
        assert_eq!(spawn.velocity_range(2).max, 150.0);
    }

    #[test]
    fn floor_limit_is_one_percent_below_boundary() {
        let config = SimConfig::default();
        assert_eq!(config.floor_limit(), -50.5);
        assert_eq!(config.gravity_for(GravityMode::Space), 0.0);
        assert_eq!(config.gravity_for(GravityMode::Gravity), -5.0);
    }
}
