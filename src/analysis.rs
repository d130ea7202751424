//! The full pipeline: pitch track, median smoothing, traits, and optionally formants.
//!
//! [AnalysisConfig] carries the knobs a caller would send along with a recording.
//! Every field has a default, and a partial config deserializes with the rest filled in.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::decode::decode_wav;
use crate::error::{Error, Result};
use crate::float::Float;
use crate::track::formant::{DEFAULT_LPC_ORDER, DEFAULT_PRE_EMPHASIS};
use crate::track::{
    compute_traits, median_smooth, track_formants, FormantFrame, FormantTrackerConfig,
    PitchFrame, PitchTracker, PitchTrackerConfig, PitchTraits,
};
use crate::utils::framing::FrameConfig;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub frame_size: usize,
    pub hop_size: usize,
    pub min_freq: f64,
    pub max_freq: f64,
    /// YIN absolute threshold.
    pub threshold: f64,
    /// Median filter width in frames; below 3 or even disables smoothing.
    pub smoothing_width: usize,
    pub lpc_order: usize,
    pub pre_emphasis: f64,
    /// Run the formant tracker.
    pub formants: bool,
    /// Return the smoothed pitch trajectory alongside the traits.
    pub include_trajectory: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        AnalysisConfig {
            frame_size: 1024,
            hop_size: 512,
            min_freq: 70.0,
            max_freq: 500.0,
            threshold: 0.1,
            smoothing_width: 5,
            lpc_order: DEFAULT_LPC_ORDER,
            pre_emphasis: DEFAULT_PRE_EMPHASIS,
            formants: true,
            include_trajectory: true,
        }
    }
}

impl AnalysisConfig {
    pub fn frame_config(&self) -> Result<FrameConfig> {
        FrameConfig::new(self.frame_size, self.hop_size)
    }

    fn pitch_config<T: Float>(&self, sample_rate: T) -> Result<PitchTrackerConfig<T>> {
        Ok(PitchTrackerConfig {
            sample_rate,
            frame: self.frame_config()?,
            min_freq: T::from_lit(self.min_freq),
            max_freq: T::from_lit(self.max_freq),
            threshold: T::from_lit(self.threshold),
        })
    }

    fn formant_config<T: Float>(&self, sample_rate: T) -> Result<FormantTrackerConfig<T>> {
        Ok(FormantTrackerConfig {
            sample_rate,
            frame: self.frame_config()?,
            lpc_order: self.lpc_order,
            pre_emphasis: T::from_lit(self.pre_emphasis),
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AnalysisReport<T>
where
    T: Float,
{
    pub sample_rate: T,
    pub frame_count: usize,
    pub mean_pitch: T,
    pub traits: PitchTraits<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pitch: Option<Vec<PitchFrame<T>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formants: Option<Vec<FormantFrame<T>>>,
}

/// Analyse a mono signal.
///
/// Traits come from the smoothed trajectory. Formants are gated on the raw pitch
/// tracker's voicing, frame by frame.
pub fn analyze<T: Float>(
    signal: &[T],
    sample_rate: T,
    config: &AnalysisConfig,
) -> Result<AnalysisReport<T>> {
    if signal.is_empty() {
        return Err(Error::EmptySignal);
    }

    let tracker = PitchTracker::new(config.pitch_config(sample_rate)?)?;
    let pitch = tracker.track(signal)?;
    if pitch.is_empty() {
        warn!(
            samples = signal.len(),
            frame_size = config.frame_size,
            "signal shorter than one frame"
        );
    }

    let smoothed = median_smooth(&pitch, config.smoothing_width);
    let traits = compute_traits(&smoothed);

    let formants = if config.formants {
        Some(track_formants(
            signal,
            &pitch,
            &config.formant_config(sample_rate)?,
        )?)
    } else {
        None
    };

    debug!(
        frames = pitch.len(),
        mean_pitch = %traits.mean_hz,
        "analysis complete"
    );

    Ok(AnalysisReport {
        sample_rate,
        frame_count: pitch.len(),
        mean_pitch: traits.mean_hz,
        traits,
        pitch: config.include_trajectory.then(|| smoothed),
        formants,
    })
}

/// Decode a WAV payload and analyse it.
pub fn analyze_wav(bytes: &[u8], config: &AnalysisConfig) -> Result<AnalysisReport<f64>> {
    let audio = decode_wav(bytes)?;
    analyze(&audio.samples, audio.sample_rate as f64, config)
}
