use serde::Serialize;

use crate::float::Float;
use crate::track::pitch::PitchFrame;

/// Frames below this confidence are left out of the traits.
pub const MIN_TRAIT_CONFIDENCE: f64 = 0.85;

/// Summary of a pitch trajectory, all in Hz.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PitchTraits<T>
where
    T: Float,
{
    pub mean_hz: T,
    pub range_hz: T,
    /// Population standard deviation of f0.
    pub stability_hz: T,
    /// Mean absolute change between consecutive selected f0 values.
    pub mean_glide_hz: T,
}

impl<T: Float> Default for PitchTraits<T> {
    fn default() -> Self {
        PitchTraits {
            mean_hz: T::zero(),
            range_hz: T::zero(),
            stability_hz: T::zero(),
            mean_glide_hz: T::zero(),
        }
    }
}

/// Aggregate the voiced frames with confidence at least [MIN_TRAIT_CONFIDENCE].
///
/// Fewer than two such frames is not enough to say anything, and gives all-zero
/// traits. Glide is measured between consecutive *selected* frames, so gaps left by
/// unvoiced or low-confidence frames are bridged.
pub fn compute_traits<T: Float>(frames: &[PitchFrame<T>]) -> PitchTraits<T> {
    let min_confidence = T::from_lit(MIN_TRAIT_CONFIDENCE);
    let values: Vec<T> = frames
        .iter()
        .filter(|f| f.voiced && f.confidence >= min_confidence)
        .map(|f| f.f0)
        .collect();

    if values.len() < 2 {
        return PitchTraits::default();
    }

    let n = T::from_count(values.len());
    let mean = values.iter().copied().sum::<T>() / n;

    let (min, max) = values
        .iter()
        .fold((T::infinity(), T::neg_infinity()), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });

    let variance = values
        .iter()
        .map(|&v| (v - mean) * (v - mean))
        .sum::<T>()
        / n;

    let glide = values
        .windows(2)
        .map(|w| (w[1] - w[0]).magnitude())
        .sum::<T>()
        / T::from_count(values.len() - 1);

    PitchTraits {
        mean_hz: mean,
        range_hz: max - min,
        stability_hz: variance.sqrt(),
        mean_glide_hz: glide,
    }
}
