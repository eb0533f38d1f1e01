//! Explicit randomness for frame generation.
//!
//! Every sampling call in the pipeline goes through a [`RandomSource`] handed in by the caller.
//! There is no process-wide generator: concurrent callers each own their own source.

use rand::distr::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

/// Uniform, Gaussian and string sampling used by the CAPTCHA pipeline.
///
/// Ranges are half-open `[lo, hi)`. A degenerate range (`hi <= lo`) yields `lo`.
pub trait RandomSource {
    /// Uniform integer in `[lo, hi)`.
    fn uniform_int(&mut self, lo: i32, hi: i32) -> i32;

    /// Uniform float in `[lo, hi)`.
    fn uniform_float(&mut self, lo: f32, hi: f32) -> f32;

    /// Standard-normal sample (mean 0, standard deviation 1).
    fn gaussian(&mut self) -> f64;

    /// `len` independent uniform draws from `[0-9A-Za-z]`.
    fn alphanumeric_string(&mut self, len: usize) -> String;
}

/// [`RandomSource`] backed by [`StdRng`].
#[derive(Clone, Debug)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    /// Deterministic source; the same seed replays the same frames.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Source seeded from the operating system.
    pub fn from_os_rng() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Seeded when `seed` is set, OS-seeded otherwise.
    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::from_seed(seed),
            None => Self::from_os_rng(),
        }
    }
}

impl RandomSource for SeededRandom {
    fn uniform_int(&mut self, lo: i32, hi: i32) -> i32 {
        if hi <= lo {
            return lo;
        }
        self.rng.random_range(lo..hi)
    }

    fn uniform_float(&mut self, lo: f32, hi: f32) -> f32 {
        if !lo.is_finite() || !hi.is_finite() || hi <= lo {
            return lo;
        }
        // Sampled in f64 and narrowed; rounding may land exactly on `hi`.
        let v = self.rng.random_range(f64::from(lo)..f64::from(hi)) as f32;
        if v >= hi { lo.max(hi.next_down()) } else { v }
    }

    fn gaussian(&mut self) -> f64 {
        self.rng.sample(StandardNormal)
    }

    fn alphanumeric_string(&mut self, len: usize) -> String {
        (&mut self.rng)
            .sample_iter(Alphanumeric)
            .take(len)
            .map(char::from)
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/random.rs"]
mod tests;
