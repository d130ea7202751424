use std::cmp::Ordering;

use crate::float::Float;
use crate::track::pitch::PitchFrame;

/// Median-filter the f0 of a pitch trajectory to knock out isolated octave jumps
/// and dropouts.
///
/// `width` must be odd and at least 3, otherwise the input comes back unchanged. For
/// each index at least `width / 2` frames from both ends, the f0 values of the voiced
/// frames inside the window are collected from the *input*; the output frame takes
/// their median (the upper one for an even count) and becomes voiced, or becomes
/// unvoiced when the window holds no voiced frame. Boundary frames, `time`, and
/// `confidence` pass through.
pub fn median_smooth<T: Float>(frames: &[PitchFrame<T>], width: usize) -> Vec<PitchFrame<T>> {
    let mut out = frames.to_vec();
    if width < 3 || width % 2 == 0 || frames.len() < width {
        return out;
    }

    let half = width / 2;
    let mut values = Vec::with_capacity(width);

    for i in half..frames.len() - half {
        values.clear();
        values.extend(
            frames[i - half..=i + half]
                .iter()
                .filter(|f| f.voiced)
                .map(|f| f.f0),
        );

        if values.is_empty() {
            out[i].voiced = false;
            continue;
        }

        values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
        out[i].f0 = values[values.len() / 2];
        out[i].voiced = true;
    }

    out
}
