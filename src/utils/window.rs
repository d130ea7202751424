//! Tapering windows applied to frames before pitch detection.
use crate::error::{Error, Result};
use crate::float::Float;

/// Symmetric Hann window of length `n`,
///
///  > w(i) = 0.5 * (1 - cos(2 pi i / (n - 1)))
///
/// A single-sample window is `[1.0]` so the formula never divides by zero.
pub fn hann<T: Float>(n: usize) -> Vec<T> {
    match n {
        0 => Vec::new(),
        1 => vec![T::one()],
        _ => {
            let half = T::from_lit(0.5);
            let two_pi = T::from_lit(2.0 * std::f64::consts::PI);
            let denom = T::from_count(n - 1);
            (0..n)
                .map(|i| half * (T::one() - (two_pi * T::from_count(i) / denom).cos()))
                .collect()
        }
    }
}

/// Multiply `frame` by `window` in place. `frame` must be a scratch copy owned by
/// the caller; the source signal is never passed here directly.
pub fn apply_window<T: Float>(frame: &mut [T], window: &[T]) -> Result<()> {
    if frame.len() != window.len() {
        return Err(Error::LengthMismatch {
            frame: frame.len(),
            window: window.len(),
        });
    }
    frame.iter_mut().zip(window).for_each(|(s, &w)| *s = *s * w);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_sample_window_is_unity() {
        assert_eq!(hann::<f64>(1), vec![1.0]);
        assert!(hann::<f64>(0).is_empty());
    }

    #[test]
    fn hann_is_symmetric_and_bounded() {
        let w = hann::<f64>(513);
        assert_eq!(w[0], 0.0);
        assert!((w[256] - 1.0).abs() < 1e-12);
        for i in 0..w.len() {
            assert!((0.0..=1.0).contains(&w[i]));
            assert!((w[i] - w[w.len() - 1 - i]).abs() < 1e-12);
        }
    }

    #[test]
    fn hann_weights_sum_to_half_length() {
        // The symmetric window sums to exactly (n - 1) / 2.
        for n in [16usize, 1024, 2048] {
            let total: f64 = hann::<f64>(n).iter().sum();
            assert!((total - 0.5 * n as f64).abs() <= 0.5 + 1e-9, "n = {}", n);
        }
    }

    #[test]
    fn window_length_mismatch_is_an_error() {
        let mut frame = vec![1.0f32; 8];
        let window = hann::<f32>(7);
        match apply_window(&mut frame, &window) {
            Err(Error::LengthMismatch { frame: 8, window: 7 }) => {}
            other => panic!("unexpected result {:?}", other),
        }
        // The frame is left untouched on error.
        assert!(frame.iter().all(|&s| s == 1.0));
    }

    #[test]
    fn apply_window_tapers_edges() {
        let mut frame = vec![2.0f64; 5];
        apply_window(&mut frame, &hann(5)).unwrap();
        assert_eq!(frame[0], 0.0);
        assert!((frame[2] - 2.0).abs() < 1e-12);
        assert!(frame[4].abs() < 1e-12);
    }
}
