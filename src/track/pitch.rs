use serde::Serialize;
use tracing::debug;

use crate::detector::yin::YINDetector;
use crate::detector::PitchDetector;
use crate::error::{Error, Result};
use crate::float::Float;
use crate::utils::framing::{frame_signal, FrameConfig};
use crate::utils::window::{apply_window, hann};

/// One point of a pitch trajectory. `time` is the frame's midpoint in seconds.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PitchFrame<T>
where
    T: Float,
{
    pub time: T,
    pub f0: T,
    pub confidence: T,
    pub voiced: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PitchTrackerConfig<T>
where
    T: Float,
{
    pub sample_rate: T,
    pub frame: FrameConfig,
    pub min_freq: T,
    pub max_freq: T,
    pub threshold: T,
}

pub(crate) fn check_sample_rate<T: Float>(sample_rate: T) -> Result<()> {
    if sample_rate.is_finite() && sample_rate > T::zero() {
        Ok(())
    } else {
        Err(Error::InvalidSampleRate(
            sample_rate.to_f64().unwrap_or(f64::NAN),
        ))
    }
}

/// Hann-windowed YIN over every frame of a signal.
///
/// The window is built once. Each frame is copied into its own buffer before
/// windowing, so the source signal is never written and frames can be analysed
/// independently of one another.
pub struct PitchTracker<T>
where
    T: Float,
{
    config: PitchTrackerConfig<T>,
    detector: YINDetector<T>,
    window: Vec<T>,
}

impl<T> PitchTracker<T>
where
    T: Float,
{
    pub fn new(config: PitchTrackerConfig<T>) -> Result<Self> {
        check_sample_rate(config.sample_rate)?;
        let size = config.frame.frame_size();
        Ok(PitchTracker {
            detector: YINDetector::new(size, config.min_freq, config.max_freq, config.threshold),
            window: hann(size),
            config,
        })
    }

    /// Analyse frame `index` of a signal. `frame` is borrowed read-only.
    pub fn analyze_frame(&self, index: usize, frame: &[T]) -> Result<PitchFrame<T>> {
        let mut scratch = frame.to_vec();
        apply_window(&mut scratch, &self.window)?;
        let pitch = self.detector.get_pitch(&scratch, self.config.sample_rate);

        Ok(PitchFrame {
            time: self.config.frame.frame_time(index, self.config.sample_rate),
            f0: pitch.frequency,
            confidence: pitch.confidence,
            voiced: pitch.voiced,
        })
    }

    /// One [PitchFrame] per frame, unvoiced frames included, in frame order.
    pub fn track(&self, signal: &[T]) -> Result<Vec<PitchFrame<T>>> {
        let frames = frame_signal(signal, self.config.frame)
            .enumerate()
            .map(|(i, frame)| self.analyze_frame(i, frame))
            .collect::<Result<Vec<_>>>()?;

        debug!(
            frames = frames.len(),
            voiced = frames.iter().filter(|f| f.voiced).count(),
            "pitch track complete"
        );
        Ok(frames)
    }
}

/// Convenience wrapper around [PitchTracker::new] and [PitchTracker::track].
pub fn track_pitch<T: Float>(
    signal: &[T],
    config: &PitchTrackerConfig<T>,
) -> Result<Vec<PitchFrame<T>>> {
    PitchTracker::new(*config)?.track(signal)
}
