//! Audio Test File Generation Utilities
//!
//! Deterministic 16-bit PCM WAV files with known characteristics:
//! - Silent audio (all zeros)
//! - Sine waves at a given frequency and amplitude

use hound::{WavSpec, WavWriter};
use std::f32::consts::PI;
use std::path::Path;

fn pcm16_spec(channels: u16, sample_rate: u32) -> WavSpec {
    WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    }
}

/// Generate a silent WAV file
///
/// # Arguments
/// * `path` - Output file path
/// * `channels` - Channel count (1 or 2 keeps hound on the plain PCM header)
/// * `sample_rate` - Frames per second
/// * `duration_ms` - Duration in milliseconds
pub fn generate_silent_wav<P: AsRef<Path>>(
    path: P,
    channels: u16,
    sample_rate: u32,
    duration_ms: u64,
) -> Result<(), hound::Error> {
    let mut writer = WavWriter::create(path, pcm16_spec(channels, sample_rate))?;

    let total_frames = (sample_rate as u64 * duration_ms) / 1000;
    for _ in 0..total_frames * channels as u64 {
        writer.write_sample(0i16)?;
    }

    writer.finalize()?;
    Ok(())
}

/// Generate a sine wave WAV file, same value on every channel
///
/// # Arguments
/// * `path` - Output file path
/// * `channels` - Channel count
/// * `sample_rate` - Frames per second
/// * `duration_ms` - Duration in milliseconds
/// * `frequency_hz` - Sine frequency (e.g. 440.0 for A4)
/// * `amplitude` - 0.0-1.0 (0.5 recommended to avoid clipping)
pub fn generate_sine_wav<P: AsRef<Path>>(
    path: P,
    channels: u16,
    sample_rate: u32,
    duration_ms: u64,
    frequency_hz: f32,
    amplitude: f32,
) -> Result<(), hound::Error> {
    let mut writer = WavWriter::create(path, pcm16_spec(channels, sample_rate))?;

    let total_frames = (sample_rate as u64 * duration_ms) / 1000;
    let amplitude_i16 = (amplitude * i16::MAX as f32) as i16;

    for frame_idx in 0..total_frames {
        let t = frame_idx as f32 / sample_rate as f32;
        let sample = ((2.0 * PI * frequency_hz * t).sin() * amplitude_i16 as f32) as i16;
        for _ in 0..channels {
            writer.write_sample(sample)?;
        }
    }

    writer.finalize()?;
    Ok(())
}
