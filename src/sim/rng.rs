//! Injectable randomness
//!
//! The simulation only ever asks for a uniform float in `[0, 1)`. Any
//! `rand` generator qualifies; tests can script exact draws.

use rand::{Rng, RngCore, SeedableRng};
use rand_pcg::Pcg32;

/// Source of uniform floats in `[0, 1)`
pub trait RandomSource {
    fn next_f64(&mut self) -> f64;
}

impl<R: RngCore> RandomSource for R {
    fn next_f64(&mut self) -> f64 {
        self.random::<f64>()
    }
}

/// Deterministic generator for a run seed
pub fn seeded(seed: u64) -> Pcg32 {
    Pcg32::seed_from_u64(seed)
}

/// Uniform integer in `[0, n)` drawn from `rng`
pub fn below(rng: &mut impl RandomSource, n: i32) -> i32 {
    let v = (rng.next_f64() * n as f64).floor() as i32;
    // Guard against a misbehaving source returning exactly 1.0
    v.clamp(0, n - 1)
}
