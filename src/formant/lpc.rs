//! Linear prediction of a frame: pre-emphasis, autocorrelation, and the
//! Levinson-Durbin recursion.
//!
//! Coefficients follow the predictor convention
//!
//!  > x(n) ~ sum_{j=1}^p a_j x(n-j)
//!
//! so the all-pole model is `1 / A(z)` with `A(z) = 1 - a_1 z^-1 - ... - a_p z^-p`.

use serde::Serialize;

use crate::float::Float;

/// Output of [levinson_durbin]. `coefficients[0]` is unused and always zero.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Lpc<T>
where
    T: Float,
{
    pub coefficients: Vec<T>,
    pub residual_energy: T,
}

impl<T: Float> Lpc<T> {
    /// A non-positive residual energy marks a frame whose model cannot be trusted.
    pub fn is_usable(&self) -> bool {
        self.residual_energy > T::zero()
    }
}

/// First-order high-pass `y(n) = x(n) - alpha x(n-1)`, with `y(0) = x(0)`.
pub fn pre_emphasis<T: Float>(x: &[T], alpha: T) -> Vec<T> {
    let mut y = Vec::with_capacity(x.len());
    if let Some(&first) = x.first() {
        y.push(first);
        y.extend(x.windows(2).map(|w| w[1] - alpha * w[0]));
    }
    y
}

/// Autocorrelation `r(lag) = sum_{n=lag}^{N-1} x(n) x(n-lag)` for `lag` in `0..=order`.
/// Lags at or past the signal length are zero.
pub fn autocorrelation<T: Float>(x: &[T], order: usize) -> Vec<T> {
    (0..=order)
        .map(|lag| {
            if lag >= x.len() {
                T::zero()
            } else {
                x[lag..].iter().zip(x).map(|(&a, &b)| a * b).sum()
            }
        })
        .collect()
}

/// Solve the order-`order` normal equations for the autocorrelation `r`.
///
/// A zero `r[0]` (silence) yields all-zero coefficients and zero energy. If the error
/// energy stops being positive part way through, the recursion stops there and returns
/// what it has, energy included, so callers can discard the frame.
pub fn levinson_durbin<T: Float>(r: &[T], order: usize) -> Lpc<T> {
    let mut a = vec![T::zero(); order + 1];

    if r.is_empty() || r[0] == T::zero() {
        return Lpc {
            coefficients: a,
            residual_energy: T::zero(),
        };
    }

    let order = order.min(r.len() - 1);
    let mut previous = a.clone();
    let mut e = r[0];

    for i in 1..=order {
        let acc: T = (1..i).map(|j| a[j] * r[i - j]).sum();
        let k = (r[i] - acc) / e;

        previous[..i].copy_from_slice(&a[..i]);
        a[i] = k;
        for j in 1..i {
            a[j] = previous[j] - k * previous[i - j];
        }

        e = e * (T::one() - k * k);
        if e <= T::zero() {
            break;
        }
    }

    Lpc {
        coefficients: a,
        residual_energy: e,
    }
}

/// Pre-emphasis, autocorrelation, then Levinson-Durbin. An empty frame yields no
/// coefficients and zero energy.
pub fn compute_lpc<T: Float>(frame: &[T], order: usize, pre_emphasis_coeff: T) -> Lpc<T> {
    if frame.is_empty() {
        return Lpc {
            coefficients: Vec::new(),
            residual_energy: T::zero(),
        };
    }

    let emphasized = pre_emphasis(frame, pre_emphasis_coeff);
    let r = autocorrelation(&emphasized, order);
    levinson_durbin(&r, order)
}
