//! Vocal-tract resonances from linear prediction.
//!
//! [lpc] fits an all-pole model to a frame; [roots] turns the model's poles into
//! formant frequencies.

pub mod lpc;
pub mod roots;

pub use lpc::{compute_lpc, Lpc};
pub use roots::extract_formants;
