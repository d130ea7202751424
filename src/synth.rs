//! Synthetic test signals.
//!
//! Noise is drawn from a generator the caller passes in, so a fixed seed always
//! reproduces the same signal.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::float::Float;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SineConfig {
    /// Hz
    pub frequency: f64,
    /// Hz
    pub sample_rate: f64,
    /// Seconds
    pub duration: f64,
    /// Peak amplitude, 0.0 - 1.0
    pub amplitude: f64,
    /// Peak of the added uniform white noise; 0.0 for a clean tone.
    pub noise_level: f64,
}

/// A PCG32 generator for the given seed.
pub fn seeded_rng(seed: u64) -> Pcg32 {
    Pcg32::seed_from_u64(seed)
}

/// `amplitude * sin(2 pi f t)` plus noise uniform in `[-noise_level, noise_level]`.
/// The generator is only drawn from when `noise_level` is positive.
pub fn sine_wave<T, R>(config: &SineConfig, rng: &mut R) -> Vec<T>
where
    T: Float,
    R: Rng,
{
    let total = (config.sample_rate * config.duration).max(0.0) as usize;
    let omega = 2.0 * std::f64::consts::PI * config.frequency / config.sample_rate;

    (0..total)
        .map(|n| {
            let mut value = config.amplitude * (omega * n as f64).sin();
            if config.noise_level > 0.0 {
                value += config.noise_level * rng.gen_range(-1.0..=1.0);
            }
            T::from_lit(value)
        })
        .collect()
}
