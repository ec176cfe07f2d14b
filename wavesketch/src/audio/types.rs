//! Core data types produced by the decode stages
//!
//! All values are immutable once built: the header and payload location are
//! produced once per load, the waveform once per render.

use serde::Serialize;

/// Validated RIFF/WAVE format header
///
/// Invariants (checked by the header parser):
/// - `byte_rate == sample_rate * channels * bits_per_sample / 8`
/// - `block_align == channels * bits_per_sample / 8`
/// - `channels >= 1`, `sample_rate > 0`, `bits_per_sample > 0`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContainerHeader {
    /// RIFF chunk size (stored, not checked against the file length)
    pub chunk_size: u32,

    /// Declared size of the `fmt ` sub-chunk
    pub sub_chunk1_size: u32,

    /// Audio format code (always 1, linear PCM)
    pub audio_format: u16,

    pub channels: u16,
    pub sample_rate: u32,

    /// Bytes of audio consumed per second of playback
    pub byte_rate: u32,

    /// Bytes per frame (all channels)
    pub block_align: u16,

    pub bits_per_sample: u16,
}

impl ContainerHeader {
    /// Bit rate in kilobits per second
    pub fn kilobits_per_second(&self) -> f64 {
        self.byte_rate as f64 * 8.0 / 1000.0
    }
}

/// Position and declared length of the `data` chunk payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PayloadLocation {
    /// Absolute offset of the first sample byte
    pub offset: u64,

    /// Declared payload length in bytes
    pub size_bytes: u32,
}

impl PayloadLocation {
    /// Samples per channel, truncated
    pub fn total_samples(&self, header: &ContainerHeader) -> u64 {
        let bits_per_frame = header.bits_per_sample as u64 * header.channels as u64;
        self.size_bytes as u64 * 8 / bits_per_frame
    }

    /// Duration in whole seconds, rounded half away from zero
    pub fn total_seconds(&self, header: &ContainerHeader) -> u64 {
        self.total_seconds_precise(header).round() as u64
    }

    /// Duration in seconds
    pub fn total_seconds_precise(&self, header: &ContainerHeader) -> f64 {
        self.size_bytes as f64 / header.byte_rate as f64
    }
}

/// Min/max envelope of one bucket of decoded values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleSummary {
    pub min: i16,
    pub max: i16,
}

impl SampleSummary {
    /// Buckets touching zero on either side are drawn as gaps
    pub fn is_silent(&self) -> bool {
        self.min == 0 || self.max == 0
    }
}

/// Ordered bucket summaries; index maps to horizontal position
pub type Waveform = Vec<SampleSummary>;
