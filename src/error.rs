//! Error types.
//!
//! Only caller contract violations and decode failures are errors. Silence,
//! short frames, ill-conditioned recursions and the like are ordinary data and
//! resolve to unvoiced pitch frames, empty formant sets, or zeroed traits.

use thiserror::Error;

/// Result type alias using this crate's [enum@Error].
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Frame and hop sizes must both be positive; a zero hop would never advance.
    #[error("invalid frame configuration: frame_size={frame_size}, hop_size={hop_size}")]
    InvalidFrameConfig { frame_size: usize, hop_size: usize },

    /// A frame buffer and its window differ in length.
    #[error("frame has {frame} samples but window has {window}")]
    LengthMismatch { frame: usize, window: usize },

    #[error("sample rate must be positive and finite, got {0}")]
    InvalidSampleRate(f64),

    #[error("LPC order must be at least 1")]
    InvalidLpcOrder,

    #[error("audio payload is empty")]
    EmptySignal,

    /// Malformed RIFF/WAVE container or truncated data.
    #[error("failed to decode audio: {0}")]
    Decode(#[from] hound::Error),

    /// Well-formed container with a sample encoding we do not read.
    #[error("unsupported audio format: {0}")]
    UnsupportedFormat(String),
}
