use std::sync::Arc;

use rustfft::{Fft, FftPlanner, Length};
use serde::Serialize;

use crate::float::Float;
use crate::utils::buffer::{
    copy_complex_to_real, copy_real_to_complex, modulus_squared, prefix_square_sums, BufferPool,
};

/// The estimate for a single frame. Unvoiced frames carry zero frequency and
/// confidence; they are a normal outcome, not an error.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Pitch<T>
where
    T: Float,
{
    pub frequency: T,
    pub confidence: T,
    pub voiced: bool,
}

impl<T: Float> Pitch<T> {
    pub fn unvoiced() -> Self {
        Pitch {
            frequency: T::zero(),
            confidence: T::zero(),
            voiced: false,
        }
    }
}

/// Smallest FFT length that holds the linear (non-circular) autocorrelation
/// of a `size`-sample signal.
pub fn padded_size(size: usize) -> usize {
    (2 * size).next_power_of_two().max(2)
}

/// Data structure to hold any buffers and FFT plans needed for pitch computation.
/// Buffers come from a `BufferPool`, so the same internals serve any number of
/// frames, in any order, through a shared reference.
pub struct DetectorInternals<T>
where
    T: Float,
{
    pub size: usize,
    pub fft_size: usize,
    pub buffers: BufferPool<T>,
    fft: Arc<dyn Fft<T>>,
    inv_fft: Arc<dyn Fft<T>>,
}

impl<T> DetectorInternals<T>
where
    T: Float,
{
    pub fn new(size: usize) -> Self {
        let fft_size = padded_size(size);
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(fft_size);
        let inv_fft = planner.plan_fft_inverse(fft_size);

        DetectorInternals {
            size,
            fft_size,
            buffers: BufferPool::new(fft_size),
            fft,
            inv_fft,
        }
    }

    /// Compute `d(t)` for `t in 0..result.len()` (see [square_difference]). Signals
    /// longer than the planned size get a one-off set of internals.
    pub fn square_difference(&self, signal: &[T], result: &mut [T]) {
        if signal.len() > self.size {
            return DetectorInternals::new(signal.len()).square_difference(signal, result);
        }
        square_difference(
            signal,
            self.fft.as_ref(),
            self.inv_fft.as_ref(),
            &self.buffers,
            result,
        );
    }
}

/// Compute the linear autocorrelation
///
///  > r(t) = sum_{i=0}^{n-t-1} x_i * x_{i+t}
///
/// of `signal` into `result` for `t in 0..result.len()`. The FFT length must be at
/// least twice the signal length so the circular product does not wrap around.
pub fn autocorrelation<T>(
    signal: &[T],
    fft: &dyn Fft<T>,
    inv_fft: &dyn Fft<T>,
    buffers: &BufferPool<T>,
    result: &mut [T],
) where
    T: Float,
{
    let n = fft.len();
    assert!(n >= 2 * signal.len(), "FFT too short for a linear autocorrelation");
    assert!(result.len() <= signal.len());

    let mut signal_ref = buffers.get_complex_buffer();
    let signal_complex = &mut signal_ref[..n];

    copy_real_to_complex(signal, signal_complex);
    fft.process(signal_complex);
    modulus_squared(signal_complex);
    inv_fft.process(signal_complex);
    // rustfft doesn't normalize, so the forward/inverse pair scales by `n`.
    let normalization_const = T::one() / T::from_count(n);
    copy_complex_to_real(
        &signal_complex[..result.len()],
        result,
        normalization_const,
    );
}

/// Compute the square difference function of `signal` into `result`,
///
///  > d(t) = sum_{i=0}^{n-t-1} (x_i - x_{i+t})^2
///
/// for `t in 0..result.len()`, using the expansion
/// `d(t) = E[0, n-t) + E[t, n) - 2 r(t)` with `E` the energy over a range and `r`
/// the autocorrelation. FFT round-off can leave tiny negative values, which are
/// clamped to zero. `d(0)` is always zero.
pub fn square_difference<T>(
    signal: &[T],
    fft: &dyn Fft<T>,
    inv_fft: &dyn Fft<T>,
    buffers: &BufferPool<T>,
    result: &mut [T],
) where
    T: Float,
{
    let n = signal.len();
    assert!(result.len() <= n);
    if result.is_empty() {
        return;
    }

    autocorrelation(signal, fft, inv_fft, buffers, result);

    let mut energy_ref = buffers.get_real_buffer();
    let energy = &mut energy_ref[..n + 1];
    prefix_square_sums(signal, energy);

    let two = T::from_lit(2.0);
    result[0] = T::zero();
    result
        .iter_mut()
        .enumerate()
        .skip(1)
        .for_each(|(tau, r)| {
            let head = energy[n - tau];
            let tail = energy[n] - energy[tau];
            let d = head + tail - two * *r;
            *r = if d > T::zero() { d } else { T::zero() };
        });
}

/// Calculate the "cumulative mean normalized difference function" as
/// specified in the YIN paper. If _d(t)_ is the square error function,
/// compute _d'(0) = 1_ and for _t > 0_
///
///  > d'(t) = d(t) * t / sum_{i=1}^t d(i)
///
/// A zero running sum (silence) maps to 1.
pub fn yin_normalize_square_error<T: Float>(square_error: &mut [T]) {
    if square_error.is_empty() {
        return;
    }
    let mut sum = T::zero();
    square_error[0] = T::one();
    square_error
        .iter_mut()
        .enumerate()
        .skip(1)
        .for_each(|(i, a)| {
            sum = sum + *a;
            *a = if sum == T::zero() {
                T::one()
            } else {
                *a * T::from_count(i) / sum
            };
        });
}

/// The first `t >= 2` whose normalized difference falls below `threshold`.
pub fn absolute_threshold<T: Float>(normalized: &[T], threshold: T) -> Option<usize> {
    normalized
        .iter()
        .enumerate()
        .skip(2)
        .find(|(_, v)| **v < threshold)
        .map(|(tau, _)| tau)
}
