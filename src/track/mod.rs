//! Whole-signal trajectories built from the per-frame estimators, and the
//! post-processing applied to them.

pub mod formant;
pub mod pitch;
pub mod smoothing;
pub mod traits;

pub use formant::{track_formants, FormantFrame, FormantTrackerConfig};
pub use pitch::{track_pitch, PitchFrame, PitchTracker, PitchTrackerConfig};
pub use smoothing::median_smooth;
pub use traits::{compute_traits, PitchTraits};
