//! Slicing a signal into overlapping analysis frames.
use serde::Serialize;

use crate::error::{Error, Result};
use crate::float::Float;

/// Frame length and hop, both in samples. Construct through [FrameConfig::new]
/// so a zero size can never reach the framer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct FrameConfig {
    frame_size: usize,
    hop_size: usize,
}

impl FrameConfig {
    /// A hop larger than the frame is allowed and leaves gaps between frames.
    pub fn new(frame_size: usize, hop_size: usize) -> Result<Self> {
        if frame_size == 0 || hop_size == 0 {
            return Err(Error::InvalidFrameConfig {
                frame_size,
                hop_size,
            });
        }
        Ok(FrameConfig {
            frame_size,
            hop_size,
        })
    }

    pub fn frame_size(&self) -> usize {
        self.frame_size
    }

    pub fn hop_size(&self) -> usize {
        self.hop_size
    }

    /// Number of whole frames in a signal of `len` samples.
    pub fn frame_count(&self, len: usize) -> usize {
        if len < self.frame_size {
            0
        } else {
            (len - self.frame_size) / self.hop_size + 1
        }
    }

    pub fn frame_start(&self, index: usize) -> usize {
        index * self.hop_size
    }

    /// Temporal midpoint of frame `index`, in seconds.
    pub fn frame_time<T: Float>(&self, index: usize, sample_rate: T) -> T {
        T::from_count(self.frame_start(index) + self.frame_size / 2) / sample_rate
    }
}

/// Read-only frame views over a borrowed signal, in frame order.
pub struct Frames<'a, T> {
    signal: &'a [T],
    config: FrameConfig,
    next: usize,
    count: usize,
}

/// Iterate over the frames of `signal`. Frame `i` covers
/// `signal[i * hop .. i * hop + frame_size]`; a trailing partial frame is dropped.
pub fn frame_signal<T: Float>(signal: &[T], config: FrameConfig) -> Frames<'_, T> {
    Frames {
        signal,
        config,
        next: 0,
        count: config.frame_count(signal.len()),
    }
}

impl<'a, T> Iterator for Frames<'a, T> {
    type Item = &'a [T];

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.count {
            return None;
        }
        let start = self.config.frame_start(self.next);
        self.next += 1;
        Some(&self.signal[start..start + self.config.frame_size])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.count - self.next;
        (remaining, Some(remaining))
    }
}

impl<'a, T> ExactSizeIterator for Frames<'a, T> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_sizes_are_rejected() {
        assert!(matches!(
            FrameConfig::new(0, 512),
            Err(Error::InvalidFrameConfig { .. })
        ));
        assert!(matches!(
            FrameConfig::new(1024, 0),
            Err(Error::InvalidFrameConfig { .. })
        ));
    }

    #[test]
    fn frame_count_matches_closed_form() {
        let config = FrameConfig::new(1024, 512).unwrap();
        let signal = vec![0.0f64; 2048];
        assert_eq!(config.frame_count(2048), 3);
        assert_eq!(frame_signal(&signal, config).count(), 3);
        assert_eq!(frame_signal(&signal[..1023], config).len(), 0);
        assert_eq!(frame_signal(&signal[..1024], config).len(), 1);
    }

    #[test]
    fn hop_larger_than_frame_leaves_gaps() {
        let config = FrameConfig::new(4, 6).unwrap();
        let signal: Vec<f64> = (0..16).map(|i| i as f64).collect();
        let frames: Vec<&[f64]> = frame_signal(&signal, config).collect();
        assert_eq!(frames.len(), 3);
        assert_eq!(frames[1], &[6.0, 7.0, 8.0, 9.0]);
        assert_eq!(frames[2], &[12.0, 13.0, 14.0, 15.0]);
    }

    #[test]
    fn frame_time_is_midpoint() {
        let config = FrameConfig::new(1024, 512).unwrap();
        assert_eq!(config.frame_time(0, 16000.0f64), 512.0 / 16000.0);
        assert_eq!(config.frame_time(2, 16000.0f64), 1536.0 / 16000.0);
    }
}
