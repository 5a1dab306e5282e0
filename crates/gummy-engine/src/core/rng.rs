//! Seedable pseudo-random source (xorshift64) for spawn placement, shake and contact jitter.
//! Reproducible for a given seed; the engine makes no replay promise beyond that.

use glam::Vec2;

#[derive(Debug, Clone)]
pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        Rng {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Uniform sample in [0, 1).
    pub fn next_f32(&mut self) -> f32 {
        // top 24 bits -> exactly representable in f32
        (self.next_u64() >> 40) as f32 / (1u64 << 24) as f32
    }

    /// Uniform sample in [lo, hi).
    pub fn range(&mut self, lo: f32, hi: f32) -> f32 {
        lo + (hi - lo) * self.next_f32()
    }

    /// Gaussian sample (Box-Muller).
    pub fn normal(&mut self, mean: f32, std_dev: f32) -> f32 {
        let u = 1.0 - self.next_f32(); // (0, 1], keeps ln finite
        let v = self.next_f32();
        let z = (-2.0 * u.ln()).sqrt() * (std::f32::consts::TAU * v).cos();
        mean + z * std_dev
    }

    /// Random direction on the unit circle.
    pub fn unit_vec(&mut self) -> Vec2 {
        let angle = self.next_f32() * std::f32::consts::TAU;
        Vec2::new(angle.cos(), angle.sin())
    }
}
