//! Scalar random sources for sampling around a minimum.
//!
//! [`RandomSource`] is the seam the rest of the crate samples through; it
//! only promises uniform draws on `[0, 1)` and standard-normal draws.
//! [`Random`] is the default implementation, a seeded `StdRng` paired with
//! `rand_distr::StandardNormal`.
use rand::{Rng, SeedableRng, rngs::StdRng};
use rand_distr::StandardNormal;

/// Seed used by [`Random::new`] and [`Random::default`].
pub const DEFAULT_SEED: u64 = 5489;

/// Source of uniform and standard-normal scalars.
///
/// Implementors must return `uniform()` values in `[0, 1)` and `normal()`
/// values with mean 0 and variance 1. Sampling code only calls `normal()`.
pub trait RandomSource {
    /// Uniform draw on `[0, 1)`.
    fn uniform(&mut self) -> f64;

    /// Standard-normal draw.
    fn normal(&mut self) -> f64;
}

/// Seeded pseudo-random generator.
#[derive(Debug, Clone)]
pub struct Random {
    rng: StdRng,
}

impl Random {
    /// Generator seeded with [`DEFAULT_SEED`].
    pub fn new() -> Self {
        Self::from_seed(DEFAULT_SEED)
    }

    /// Generator seeded with `seed`.
    pub fn from_seed(seed: u64) -> Self {
        Random { rng: StdRng::seed_from_u64(seed) }
    }

    /// Restart the stream from `seed`.
    pub fn set_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Single-precision uniform draw on `[0, 1)`.
    pub fn fast_uniform(&mut self) -> f32 {
        self.rng.random::<f32>()
    }

    /// Fill `out` with uniform `[0, 1)` doubles from a generator seeded by
    /// `seed`.
    ///
    /// The instance's own stream is not advanced; equal seeds give equal
    /// arrays.
    pub fn fill_array_uniform(&self, out: &mut [f64], seed: u64) {
        let mut rng = StdRng::seed_from_u64(seed);
        for v in out.iter_mut() {
            *v = rng.random::<f64>();
        }
    }

    /// Fill `out` with single-precision standard normals from a generator
    /// seeded by `seed`.
    ///
    /// The instance's own stream is not advanced.
    pub fn fill_array_normal(&self, out: &mut [f32], seed: u64) {
        let mut rng = StdRng::seed_from_u64(seed);
        for v in out.iter_mut() {
            *v = rng.sample::<f32, _>(StandardNormal);
        }
    }

    /// Underlying generator, for drawing from other `rand` distributions.
    pub fn generator_mut(&mut self) -> &mut StdRng {
        &mut self.rng
    }
}

impl Default for Random {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for Random {
    fn uniform(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    fn normal(&mut self) -> f64 {
        self.rng.sample::<f64, _>(StandardNormal)
    }
}
