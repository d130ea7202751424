//! Generic [Float] type which acts as a stand-in for `f32` or `f64`.
use rustfft::num_traits::Float as NumFloat;
use rustfft::FftNum;
use std::fmt::{Debug, Display};
use std::iter::Sum;

/// Signals are processed as arrays of [Float]s. A [Float] is normally `f32` or `f64`.
pub trait Float: Display + Debug + NumFloat + FftNum + Sum {
    /// Convert a literal. Out-of-range values become NaN rather than panicking.
    fn from_lit(x: f64) -> Self {
        <Self as rustfft::num_traits::FromPrimitive>::from_f64(x).unwrap_or_else(Self::nan)
    }

    /// Convert a count or index.
    fn from_count(n: usize) -> Self {
        <Self as rustfft::num_traits::FromPrimitive>::from_usize(n).unwrap_or_else(Self::nan)
    }

    /// `|self|` without the ambiguity between `Signed::abs` and `Float::abs`.
    fn magnitude(self) -> Self {
        <Self as NumFloat>::abs(self)
    }
}

impl Float for f64 {}
impl Float for f32 {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_conversion() {
        assert_eq!(<f32 as Float>::from_lit(0.5), 0.5f32);
        assert_eq!(<f64 as Float>::from_count(1024), 1024.0);
        assert_eq!((-2.5f64).magnitude(), 2.5);
    }
}
