//! Streaming sample decimator
//!
//! Rather than decoding every frame, the decimator reads one frame sample,
//! then jumps `bits_per_sample * channels * 3` bytes ahead. Each frame sample
//! is decoded from its first two bytes as a little-endian `i16`, whatever the
//! declared bit depth; only 16-bit input is guaranteed to be meaningful.
//!
//! Decoded values are grouped into buckets of `1 / resolution` iterations and
//! each bucket is reduced to its `(min, max)` envelope.

use super::types::{PayloadLocation, SampleSummary, Waveform};
use crate::error::{Error, Result};
use crate::source::ByteSource;
use tracing::debug;

/// Stride multiplier applied to `bits_per_sample * channels` after each read
pub const STRIDE_FACTOR: i64 = 3;

/// Number of iterations summarized per bucket
///
/// The sample rate cancels out of the ratio, so only the resolution matters.
/// Fractional lengths truncate; the result is never below 1.
pub fn bucket_length(resolution: f64) -> u64 {
    ((1.0 / resolution) as u64).max(1)
}

/// Groups decoded values into buckets and tracks their envelopes.
///
/// The iteration counter is compared before it is incremented, so the first
/// bucket closes after `bucket_length + 1` values and every later bucket
/// after `bucket_length`. A trailing partial bucket is dropped by
/// [`finish`](Self::finish).
#[derive(Debug)]
pub struct BucketAccumulator {
    bucket_length: u64,
    iteration: u64,
    current: Option<SampleSummary>,
    waveform: Waveform,
}

impl BucketAccumulator {
    pub fn new(bucket_length: u64) -> Self {
        Self {
            bucket_length: bucket_length.max(1),
            iteration: 0,
            current: None,
            waveform: Vec::new(),
        }
    }

    /// Feed one decoded value
    pub fn push(&mut self, value: i16) {
        self.current = Some(match self.current {
            Some(s) => SampleSummary {
                min: s.min.min(value),
                max: s.max.max(value),
            },
            None => SampleSummary {
                min: value,
                max: value,
            },
        });

        if self.iteration > 0 && self.iteration % self.bucket_length == 0 {
            if let Some(summary) = self.current.take() {
                self.waveform.push(summary);
            }
        }
        self.iteration += 1;
    }

    /// Return all completed buckets, discarding any partial one
    pub fn finish(self) -> Waveform {
        self.waveform
    }
}

/// Decimate the payload into an ordered waveform.
///
/// `resolution` must already be validated by the caller. Reading continues
/// until the stream is exhausted, past the declared payload size if the file
/// carries trailing chunks.
///
/// # Errors
/// - `Read`: seek failure, `bits_per_sample == 0`, a short non-empty read,
///   or a frame sample too short to decode
pub fn decimate<S: ByteSource + ?Sized>(
    source: &mut S,
    payload: &PayloadLocation,
    channels: u16,
    bits_per_sample: u16,
    resolution: f64,
) -> Result<Waveform> {
    source.seek_absolute(payload.offset).map_err(|e| {
        Error::Read(format!(
            "Failed to seek to payload at offset {}: {}",
            payload.offset, e
        ))
    })?;

    if bits_per_sample == 0 {
        return Err(Error::Read("Invalid value for bits_per_sample: 0".to_string()));
    }

    let stride = bits_per_sample as i64 * channels as i64 * STRIDE_FACTOR;
    let mut frame = vec![0u8; bits_per_sample as usize];
    let mut buckets = BucketAccumulator::new(bucket_length(resolution));

    loop {
        let n = source
            .read_up_to(&mut frame)
            .map_err(|e| Error::Read(format!("Failed to read frame sample: {}", e)))?;
        if n == 0 {
            break;
        }
        if n < frame.len() {
            return Err(Error::Read(format!(
                "Short read: expected {} bytes, got {}",
                frame.len(),
                n
            )));
        }

        buckets.push(decode_frame_sample(&frame)?);

        source
            .seek_by(stride)
            .map_err(|e| Error::Read(format!("Failed to seek in file: {}", e)))?;
    }

    let waveform = buckets.finish();
    debug!(
        "Decimated payload into {} buckets (bucket length {}, stride {} bytes)",
        waveform.len(),
        bucket_length(resolution),
        stride
    );
    Ok(waveform)
}

fn decode_frame_sample(bytes: &[u8]) -> Result<i16> {
    match bytes {
        [lo, hi, ..] => Ok(i16::from_le_bytes([*lo, *hi])),
        _ => Err(Error::Read(format!(
            "Failed to decode frame sample: need 2 bytes, have {}",
            bytes.len()
        ))),
    }
}
