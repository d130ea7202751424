//! Formant frequencies from the poles of an LPC model.
//!
//! The poles of `1 / A(z)` are the roots of
//! `z^p - a_1 z^(p-1) - ... - a_p`, which are the eigenvalues of its companion
//! matrix: the negated polynomial coefficients (here `a_1 .. a_p`) across the first
//! row and ones on the sub-diagonal. Each complex-conjugate pole pair is one
//! resonance, at frequency `arg(z) * sample_rate / (2 pi)`.

use std::cmp::Ordering;

use nalgebra::{DMatrix, Schur};
use tracing::debug;

use crate::float::Float;

/// Lowest frequency, in Hz, accepted as a vocal-tract resonance (exclusive).
pub const MIN_FORMANT_HZ: f64 = 90.0;

/// Highest frequency, in Hz, accepted as a vocal-tract resonance (exclusive).
pub const MAX_FORMANT_HZ: f64 = 5000.0;

/// Iteration cap for the Schur decomposition.
const MAX_SCHUR_ITERATIONS: usize = 1000;

/// Relative spacing under which two roots count as the same frequency.
const DUPLICATE_TOLERANCE: f64 = 1e-9;

/// Companion matrix of `A(z)` for `coefficients = [_, a_1, .., a_p]`.
pub fn companion_matrix<T: Float>(coefficients: &[T]) -> Option<DMatrix<f64>> {
    let order = coefficients.len().checked_sub(1).filter(|&p| p > 0)?;
    let a: Vec<f64> = coefficients[1..]
        .iter()
        .map(|c| c.to_f64().filter(|c| c.is_finite()))
        .collect::<Option<_>>()?;

    Some(DMatrix::from_fn(order, order, |row, col| {
        if row == 0 {
            a[col]
        } else if row == col + 1 {
            1.0
        } else {
            0.0
        }
    }))
}

/// Ascending formant frequencies in `(MIN_FORMANT_HZ, MAX_FORMANT_HZ)` for an LPC
/// coefficient vector whose element 0 is unused.
///
/// Fewer than two coefficients, non-finite coefficients, or a decomposition that
/// fails to converge give an empty result.
pub fn extract_formants<T: Float>(coefficients: &[T], sample_rate: T) -> Vec<T> {
    let companion = match companion_matrix(coefficients) {
        Some(m) => m,
        None => return Vec::new(),
    };
    let sample_rate = match sample_rate.to_f64() {
        Some(sr) if sr.is_finite() && sr > 0.0 => sr,
        _ => return Vec::new(),
    };

    let schur = match Schur::try_new(companion, f64::EPSILON, MAX_SCHUR_ITERATIONS) {
        Some(schur) => schur,
        None => {
            debug!(order = coefficients.len() - 1, "companion matrix did not converge");
            return Vec::new();
        }
    };

    let mut formants: Vec<f64> = schur
        .complex_eigenvalues()
        .iter()
        // One root per conjugate pair.
        .filter(|z| z.im > 0.0)
        .map(|z| z.im.atan2(z.re) * sample_rate / (2.0 * std::f64::consts::PI))
        .filter(|&f| f > MIN_FORMANT_HZ && f < MAX_FORMANT_HZ)
        .collect();

    formants.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    formants.dedup_by(|b, a| (*b - *a).abs() <= DUPLICATE_TOLERANCE * a.abs());

    formants.into_iter().map(T::from_lit).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formant::lpc::{autocorrelation, levinson_durbin};

    const SAMPLE_RATE: f64 = 16000.0;

    /// Predictor coefficients `[0, a_1, .., a_p]` of an all-pole filter with a
    /// conjugate pole pair at each `(frequency, radius)`.
    fn resonator(poles: &[(f64, f64)]) -> Vec<f64> {
        // Multiply out A(z) = prod (1 - 2 r cos(theta) z^-1 + r^2 z^-2).
        let mut poly = vec![1.0];
        for &(freq, radius) in poles {
            let theta = 2.0 * std::f64::consts::PI * freq / SAMPLE_RATE;
            let section = [1.0, -2.0 * radius * theta.cos(), radius * radius];
            let mut next = vec![0.0; poly.len() + 2];
            for (i, p) in poly.iter().enumerate() {
                for (j, s) in section.iter().enumerate() {
                    next[i + j] += p * s;
                }
            }
            poly = next;
        }
        let mut coefficients = vec![0.0];
        coefficients.extend(poly[1..].iter().map(|c| -c));
        coefficients
    }

    #[test]
    fn companion_first_row_is_predictor_coefficients() {
        let m = companion_matrix(&[0.0f64, 0.5, -0.25]).unwrap();
        assert_eq!(m.row(0).iter().copied().collect::<Vec<_>>(), vec![0.5, -0.25]);
        assert_eq!(m[(1, 0)], 1.0);
        assert_eq!(m[(1, 1)], 0.0);
    }

    #[test]
    fn recovers_pole_frequencies() {
        let coefficients = resonator(&[(700.0, 0.98), (1800.0, 0.97)]);
        let formants = extract_formants(&coefficients, SAMPLE_RATE);
        assert_eq!(formants.len(), 2);
        assert!((formants[0] - 700.0).abs() < 1e-6);
        assert!((formants[1] - 1800.0).abs() < 1e-6);
    }

    #[test]
    fn out_of_band_poles_are_dropped() {
        let coefficients = resonator(&[(60.0, 0.95), (1200.0, 0.95), (6000.0, 0.9)]);
        let formants = extract_formants(&coefficients, SAMPLE_RATE);
        assert_eq!(formants.len(), 1);
        assert!((formants[0] - 1200.0).abs() < 1e-6);
    }

    #[test]
    fn lpc_of_resonator_output() {
        let coefficients = resonator(&[(500.0, 0.97), (1500.0, 0.96)]);
        let mut x = vec![0.0f64; 1024];
        for n in 0..x.len() {
            let excitation = if n == 0 { 1.0 } else { 0.0 };
            x[n] = excitation
                + (1..coefficients.len())
                    .filter(|&j| j <= n)
                    .map(|j| coefficients[j] * x[n - j])
                    .sum::<f64>();
        }
        let lpc = levinson_durbin(&autocorrelation(&x, 4), 4);
        let formants = extract_formants(&lpc.coefficients, SAMPLE_RATE);
        assert_eq!(formants.len(), 2);
        assert!((formants[0] - 500.0).abs() < 1.0);
        assert!((formants[1] - 1500.0).abs() < 1.0);
    }

    #[test]
    fn degenerate_coefficients_give_nothing() {
        assert!(extract_formants::<f64>(&[], SAMPLE_RATE).is_empty());
        assert!(extract_formants(&[0.0f64], SAMPLE_RATE).is_empty());
        assert!(extract_formants(&[0.0f64; 13], SAMPLE_RATE).is_empty());
        assert!(extract_formants(&[0.0f64, f64::NAN, 0.5], SAMPLE_RATE).is_empty());
    }

    #[test]
    fn results_are_ascending_and_in_band() {
        let coefficients = resonator(&[
            (3200.0, 0.9),
            (450.0, 0.97),
            (2400.0, 0.92),
            (1100.0, 0.95),
        ]);
        let formants = extract_formants(&coefficients, SAMPLE_RATE);
        assert_eq!(formants.len(), 4);
        for pair in formants.windows(2) {
            assert!(pair[0] < pair[1]);
        }
        assert!(formants
            .iter()
            .all(|&f| f > MIN_FORMANT_HZ && f < MAX_FORMANT_HZ));
    }
}
