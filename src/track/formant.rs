use serde::Serialize;
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::float::Float;
use crate::formant::{compute_lpc, extract_formants};
use crate::track::pitch::{check_sample_rate, PitchFrame};
use crate::utils::framing::{frame_signal, FrameConfig};

/// Model order for speech at typical sample rates.
pub const DEFAULT_LPC_ORDER: usize = 12;

pub const DEFAULT_PRE_EMPHASIS: f64 = 0.97;

/// Formants of one voiced frame, ascending, at the same time as its [PitchFrame].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FormantFrame<T>
where
    T: Float,
{
    pub time: T,
    pub formants: Vec<T>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct FormantTrackerConfig<T>
where
    T: Float,
{
    pub sample_rate: T,
    pub frame: FrameConfig,
    pub lpc_order: usize,
    pub pre_emphasis: T,
}

impl<T: Float> FormantTrackerConfig<T> {
    /// Default LPC order and pre-emphasis for the given framing.
    pub fn new(sample_rate: T, frame: FrameConfig) -> Self {
        FormantTrackerConfig {
            sample_rate,
            frame,
            lpc_order: DEFAULT_LPC_ORDER,
            pre_emphasis: T::from_lit(DEFAULT_PRE_EMPHASIS),
        }
    }
}

/// Formants for the voiced frames of `signal`, using the voicing decisions in `pitch`.
///
/// `pitch` must come from the same framing. Frames are visited while both a frame
/// and a pitch frame exist. Unvoiced frames, frames whose LPC model has no residual
/// energy, and frames without any in-band formant produce no output at all.
pub fn track_formants<T: Float>(
    signal: &[T],
    pitch: &[PitchFrame<T>],
    config: &FormantTrackerConfig<T>,
) -> Result<Vec<FormantFrame<T>>> {
    check_sample_rate(config.sample_rate)?;
    if config.lpc_order == 0 {
        return Err(Error::InvalidLpcOrder);
    }

    let results: Vec<FormantFrame<T>> = frame_signal(signal, config.frame)
        .zip(pitch)
        .enumerate()
        .filter(|(_, (_, p))| p.voiced)
        .filter_map(|(i, (frame, p))| {
            let lpc = compute_lpc(frame, config.lpc_order, config.pre_emphasis);
            if !lpc.is_usable() {
                trace!(frame = i, "LPC residual energy not positive");
                return None;
            }
            let formants = extract_formants(&lpc.coefficients, config.sample_rate);
            if formants.is_empty() {
                return None;
            }
            Some(FormantFrame {
                time: p.time,
                formants,
            })
        })
        .collect();

    debug!(frames = results.len(), "formant track complete");
    Ok(results)
}
