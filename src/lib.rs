//! # Vocal Contour
//! *vocal_contour* estimates the pitch contour and formant frequencies of a
//! recorded voice, then summarizes the contour into a handful of traits.
//!
//! # Pipeline
//! A signal is cut into overlapping frames. Each frame goes through:
//!
//!   * a Hann window and the [YIN detector][detector::yin] for f0 and confidence
//!   * [linear prediction][formant::lpc] and [root solving][formant::roots] for formants,
//!     on voiced frames only
//!
//! The resulting pitch track is [median smoothed][track::smoothing] and
//! [aggregated][track::traits]. [analysis::analyze] runs the whole thing.
//!
//! # Examples
//! ```
//! use vocal_contour::detector::yin::YINDetector;
//! use vocal_contour::detector::PitchDetector;
//!
//! fn main() {
//!     const SAMPLE_RATE: f64 = 16000.0;
//!     const SIZE: usize = 1024;
//!     const MIN_FREQ: f64 = 70.0;
//!     const MAX_FREQ: f64 = 500.0;
//!     const THRESHOLD: f64 = 0.1;
//!
//!     // Signal coming from some source (microphone, generated, etc...)
//!     let dt = 1.0 / SAMPLE_RATE;
//!     let freq = 220.0;
//!     let signal: Vec<f64> = (0..SIZE)
//!         .map(|x| (2.0 * std::f64::consts::PI * x as f64 * dt * freq).sin())
//!         .collect();
//!
//!     let detector = YINDetector::new(SIZE, MIN_FREQ, MAX_FREQ, THRESHOLD);
//!     let pitch = detector.get_pitch(&signal, SAMPLE_RATE);
//!
//!     println!("Frequency: {}, Confidence: {}", pitch.frequency, pitch.confidence);
//! }
//! ```

pub use analysis::{analyze, analyze_wav, AnalysisConfig, AnalysisReport};
pub use detector::internals::Pitch;
pub use error::{Error, Result};

pub mod analysis;
pub mod decode;
pub mod detector;
pub mod error;
pub mod float;
pub mod formant;
pub mod synth;
pub mod track;
pub mod utils;
