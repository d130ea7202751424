//! The YIN pitch detection algorithm is based on the algorithm from the paper
//! *[YIN, a fundamental frequency estimator for speech and music](http://recherche.ircam.fr/equipes/pcm/cheveign/ps/2002_JASA_YIN_proof.pdf)*.
//!
//! Let $S=(s_0,s_1,\ldots,s_{N-1})$ be a discrete signal. The *square difference function*
//! at lag $t$ is
//! $$ d(t) = \sum_{i=0}^{N-t-1} (s_i-s_{i+t})^2. $$
//! This function is close to zero when the signal "lines up" with itself, but its scale
//! depends on volume. YIN therefore works with the *cumulative mean normalized difference
//! function*,
//! $$ d\'(t) = \begin{cases}1&\text{if }t=0\\\\ d(t) / \left[ \tfrac{1}{t}\sum_{i=1}^t d(i) \right] & \text{otherwise}\end{cases}, $$
//! and takes the first dip below an absolute threshold as the period.
//!
//! ## Implementation
//! The square difference is computed from an FFT autocorrelation and running energies
//! rather than directly, which is much faster for the lag ranges used on speech.
//!
//! The search range is bounded by `[min_freq, max_freq]`: the longest lag is
//! `round(sample_rate / min_freq)`, capped at half the frame, and the shortest is
//! `round(sample_rate / max_freq)`, never below 2. Once the first lag under the
//! threshold is found, the search descends to the bottom of that dip and applies
//! quadratic interpolation there.
//!
//! Every failure (short frame, silence, nothing under the threshold, an estimate
//! outside the frequency bounds) is reported as an unvoiced [Pitch].

use tracing::trace;

use crate::detector::internals::{
    absolute_threshold, yin_normalize_square_error, DetectorInternals, Pitch,
};
use crate::detector::PitchDetector;
use crate::float::Float;
use crate::utils::peak::{descend_to_minimum, refine_extremum};

/// Frames shorter than this are reported unvoiced without analysis.
pub const MIN_FRAME_LEN: usize = 16;

/// The shortest lag YIN will consider, in samples.
pub const MIN_LAG: usize = 2;

pub struct YINDetector<T>
where
    T: Float,
{
    internals: DetectorInternals<T>,
    min_freq: T,
    max_freq: T,
    threshold: T,
}

impl<T> YINDetector<T>
where
    T: Float,
{
    /// `size` is the expected frame length. `threshold` is YIN's absolute threshold;
    /// the paper uses 0.1.
    ///
    /// FFT plans and scratch buffers are built once, for `size`. A longer frame is
    /// still analysed correctly but plans a new FFT on every call, so size the detector
    /// for the longest frame it will see.
    pub fn new(size: usize, min_freq: T, max_freq: T, threshold: T) -> Self {
        YINDetector {
            internals: DetectorInternals::new(size),
            min_freq,
            max_freq,
            threshold,
        }
    }

    /// The `(min_lag, max_lag)` search range for a frame of `len` samples, or `None`
    /// when the range is empty.
    fn lag_bounds(&self, len: usize, sample_rate: T) -> Option<(usize, usize)> {
        let valid = |x: T| x.is_finite() && x > T::zero();
        if !valid(sample_rate) || !valid(self.min_freq) || !valid(self.max_freq) {
            return None;
        }

        let max_lag = (sample_rate / self.min_freq).round().to_usize()?;
        let min_lag = (sample_rate / self.max_freq).round().to_usize()?;

        // Past half the frame the difference function sums too few terms to mean anything.
        let max_lag = max_lag.min(len / 2);
        let min_lag = min_lag.max(MIN_LAG);

        if min_lag >= max_lag {
            None
        } else {
            Some((min_lag, max_lag))
        }
    }
}

/// Pitch detection based on the YIN algorithm. See <http://recherche.ircam.fr/equipes/pcm/cheveign/ps/2002_JASA_YIN_proof.pdf>
impl<T> PitchDetector<T> for YINDetector<T>
where
    T: Float,
{
    fn get_pitch(&self, signal: &[T], sample_rate: T) -> Pitch<T> {
        if signal.len() < MIN_FRAME_LEN {
            return Pitch::unvoiced();
        }

        // STEP 1: Turn the frequency bounds into a lag range.
        let (min_lag, max_lag) = match self.lag_bounds(signal.len(), sample_rate) {
            Some(bounds) => bounds,
            None => return Pitch::unvoiced(),
        };

        let mut result_ref = self.internals.buffers.get_real_buffer();
        if result_ref.len() < max_lag {
            result_ref.resize(max_lag, T::zero());
        }
        let result = &mut result_ref[..max_lag];

        // STEP 2: Calculate the difference function, d_t.
        self.internals.square_difference(signal, result);

        // STEP 3: Calculate the cumulative mean normalized difference function, d_t'.
        yin_normalize_square_error(result);

        // STEP 4: The absolute threshold. We want the first dip below `threshold`.
        let candidate = match absolute_threshold(result, self.threshold) {
            Some(tau) => tau,
            None => return Pitch::unvoiced(),
        };

        // A dip before `min_lag` means a pitch above `max_freq`.
        if candidate < min_lag {
            trace!(candidate, min_lag, "dip below the shortest lag");
            return Pitch::unvoiced();
        }

        // STEP 5: Find the bottom of the dip and use quadratic interpolation to fine-tune it.
        let tau = descend_to_minimum(result, candidate);
        let refined_tau = refine_extremum(result, tau);
        if refined_tau.is_nan() || refined_tau <= T::zero() {
            return Pitch::unvoiced();
        }

        let frequency = sample_rate / refined_tau;
        let confidence = T::one() - result[tau];

        if frequency < self.min_freq || frequency > self.max_freq || confidence <= T::zero() {
            return Pitch::unvoiced();
        }

        Pitch {
            frequency,
            confidence,
            voiced: true,
        }
    }
}
