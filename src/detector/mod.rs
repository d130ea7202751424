use crate::detector::internals::Pitch;
use crate::float::Float;

pub mod internals;
pub mod yin;

/// A per-frame fundamental-frequency estimator.
///
/// Implementations never fail: a frame that cannot be analysed (silence, too short,
/// no periodicity inside the configured range) yields [Pitch::unvoiced]. Detection
/// takes `&self` so one detector can serve every frame of a signal, including from
/// several threads at once.
pub trait PitchDetector<T>
where
    T: Float,
{
    fn get_pitch(&self, signal: &[T], sample_rate: T) -> Pitch<T>;
}
