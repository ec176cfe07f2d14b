//! Waveform Render Throughput Benchmark
//!
//! Measures how quickly a loaded file is decimated and rendered to SVG,
//! reading from memory so disk caching does not skew results.
//!
//! ## Scenarios
//!
//! - Mono 16-bit @ 44.1kHz, 30s, at several resolutions
//! - Stereo 16-bit @ 44.1kHz, 30s, at the default resolution
//! - Header parse + chunk scan alone

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use wavesketch::{MemorySource, WaveformDecoder, DEFAULT_RESOLUTION};

/// 16-bit PCM WAV bytes containing a 440 Hz sine
fn sine_wav(channels: u16, sample_rate: u32, seconds: u32) -> Vec<u8> {
    let frames = sample_rate * seconds;
    let block_align = channels * 2;
    let data_len = frames * block_align as u32;

    let mut bytes = Vec::with_capacity(44 + data_len as usize);
    bytes.extend_from_slice(b"RIFF");
    bytes.extend_from_slice(&(36 + data_len).to_le_bytes());
    bytes.extend_from_slice(b"WAVE");
    bytes.extend_from_slice(b"fmt ");
    bytes.extend_from_slice(&16u32.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes());
    bytes.extend_from_slice(&channels.to_le_bytes());
    bytes.extend_from_slice(&sample_rate.to_le_bytes());
    bytes.extend_from_slice(&(sample_rate * block_align as u32).to_le_bytes());
    bytes.extend_from_slice(&block_align.to_le_bytes());
    bytes.extend_from_slice(&16u16.to_le_bytes());
    bytes.extend_from_slice(b"data");
    bytes.extend_from_slice(&data_len.to_le_bytes());

    for i in 0..frames {
        let t = i as f32 / sample_rate as f32;
        let value = ((2.0 * std::f32::consts::PI * 440.0 * t).sin() * 16384.0) as i16;
        for _ in 0..channels {
            bytes.extend_from_slice(&value.to_le_bytes());
        }
    }
    bytes
}

fn loaded_decoder(bytes: &[u8]) -> WaveformDecoder<MemorySource> {
    let mut decoder = WaveformDecoder::new();
    decoder
        .load(MemorySource::new(bytes.to_vec()))
        .expect("Failed to load benchmark WAV");
    decoder
}

/// Benchmark: mono render across resolutions
fn bench_render_mono_resolutions(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_mono_30s");
    let bytes = sine_wav(1, 44100, 30);
    let decoder = loaded_decoder(&bytes);
    group.throughput(Throughput::Bytes(bytes.len() as u64));

    for resolution in [1.0, DEFAULT_RESOLUTION, 0.0001] {
        group.bench_with_input(
            BenchmarkId::from_parameter(resolution),
            &resolution,
            |b, &resolution| {
                b.iter(|| {
                    decoder
                        .render(black_box(resolution), None)
                        .expect("Failed to render")
                });
            },
        );
    }

    group.finish();
}

/// Benchmark: stereo render at the default resolution
fn bench_render_stereo(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_stereo_30s");
    let bytes = sine_wav(2, 44100, 30);
    let decoder = loaded_decoder(&bytes);
    group.throughput(Throughput::Bytes(bytes.len() as u64));

    group.bench_function("default_resolution", |b| {
        b.iter(|| {
            decoder
                .render(black_box(DEFAULT_RESOLUTION), None)
                .expect("Failed to render")
        });
    });

    group.finish();
}

/// Benchmark: header parse and chunk scan only
fn bench_load(c: &mut Criterion) {
    let bytes = sine_wav(2, 48000, 1);
    let source = MemorySource::new(bytes);

    c.bench_function("load_header", |b| {
        b.iter(|| {
            let mut decoder = WaveformDecoder::new();
            decoder
                .load(black_box(source.clone()))
                .map(|h| h.channels)
                .expect("Failed to load")
        });
    });
}

criterion_group!(
    benches,
    bench_render_mono_resolutions,
    bench_render_stereo,
    bench_load
);
criterion_main!(benches);
