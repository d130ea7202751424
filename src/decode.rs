//! WAV decoding into normalized mono PCM.
//!
//! Integer PCM of 8, 16, 24, or 32 bits is scaled by `2^(bits - 1)` into `[-1, 1)`;
//! 32-bit float samples pass through. Multichannel audio is averaged to mono, frame
//! by frame. Anything else is rejected rather than decoded partially.

use std::io::{Cursor, Read};
use std::path::Path;

use hound::{SampleFormat, WavReader};
use tracing::debug;

use crate::error::{Error, Result};

#[derive(Clone, Debug, PartialEq)]
pub struct DecodedAudio {
    pub samples: Vec<f64>,
    pub sample_rate: u32,
    /// Channel count of the source, before mixing down.
    pub channels: u16,
}

impl DecodedAudio {
    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }
}

/// Decode a complete WAV file held in memory.
pub fn decode_wav(bytes: &[u8]) -> Result<DecodedAudio> {
    if bytes.is_empty() {
        return Err(Error::EmptySignal);
    }
    decode_reader(WavReader::new(Cursor::new(bytes))?)
}

pub fn decode_wav_file<P: AsRef<Path>>(path: P) -> Result<DecodedAudio> {
    decode_reader(WavReader::open(path)?)
}

fn decode_reader<R: Read>(reader: WavReader<R>) -> Result<DecodedAudio> {
    let spec = reader.spec();
    if spec.channels == 0 {
        return Err(Error::UnsupportedFormat("zero channels".into()));
    }
    if spec.sample_rate == 0 {
        return Err(Error::UnsupportedFormat("zero sample rate".into()));
    }

    let interleaved: Vec<f64> = match (spec.sample_format, spec.bits_per_sample) {
        (SampleFormat::Int, bits @ (8 | 16 | 24 | 32)) => {
            let scale = (1i64 << (bits - 1)) as f64;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f64 / scale))
                .collect::<std::result::Result<Vec<f64>, _>>()?
        }
        (SampleFormat::Float, 32) => reader
            .into_samples::<f32>()
            .map(|s| s.map(|v| v as f64))
            .collect::<std::result::Result<Vec<f64>, _>>()?,
        (format, bits) => {
            return Err(Error::UnsupportedFormat(format!(
                "{}-bit {:?} samples",
                bits, format
            )))
        }
    };

    let channels = spec.channels as usize;
    let samples: Vec<f64> = if channels == 1 {
        interleaved
    } else {
        interleaved
            .chunks_exact(channels)
            .map(|frame| frame.iter().sum::<f64>() / channels as f64)
            .collect()
    };

    debug!(
        samples = samples.len(),
        sample_rate = spec.sample_rate,
        channels = spec.channels,
        "decoded wav"
    );

    Ok(DecodedAudio {
        samples,
        sample_rate: spec.sample_rate,
        channels: spec.channels,
    })
}
