//! Waveform decoder
//!
//! Composes the decode stages: parse header → locate payload → decimate →
//! synthesize. `load` keeps only immutable header/payload values plus the
//! provider; every `render` reopens the source, so no handle outlives a call.

use crate::audio::{decimate, locate_payload, parse_header, ContainerHeader, PayloadLocation};
use crate::error::{Error, Result};
use crate::render::render_svg;
use crate::source::{ByteSink, FileSource, SourceProvider};
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info, warn};

/// Resolution used when the caller has no preference
pub const DEFAULT_RESOLUTION: f64 = 0.01;

/// Smallest accepted resolution
pub const MIN_RESOLUTION: f64 = 0.000001;

/// Largest accepted resolution
pub const MAX_RESOLUTION: f64 = 1.0;

/// Check that `resolution` lies in `[MIN_RESOLUTION, MAX_RESOLUTION]`
pub fn validate_resolution(resolution: f64) -> Result<()> {
    if !(MIN_RESOLUTION..=MAX_RESOLUTION).contains(&resolution) {
        return Err(Error::Param(format!(
            "Resolution must be between {} and {}, got {}",
            MIN_RESOLUTION, MAX_RESOLUTION, resolution
        )));
    }
    Ok(())
}

/// Snapshot of everything the accessors report
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WaveInfo {
    pub chunk_size: u32,
    pub audio_format: u16,
    pub channels: u16,
    pub sample_rate: u32,
    pub byte_rate: u32,
    pub block_align: u16,
    pub bits_per_sample: u16,
    pub kilobits_per_second: f64,
    pub total_samples: u64,
    pub total_seconds: u64,
    pub total_seconds_precise: f64,
    pub payload_offset: u64,
    pub payload_size: u32,
}

struct LoadedSource<P> {
    provider: P,
    header: ContainerHeader,
    payload: PayloadLocation,
}

/// Decodes a PCM container and renders its waveform envelope
pub struct WaveformDecoder<P: SourceProvider = FileSource> {
    loaded: Option<LoadedSource<P>>,
}

impl<P: SourceProvider> Default for WaveformDecoder<P> {
    fn default() -> Self {
        Self { loaded: None }
    }
}

impl WaveformDecoder<FileSource> {
    /// Validate `path`, then load it
    ///
    /// # Errors
    /// - `Param` for an empty or missing path
    /// - any error from [`load`](Self::load)
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let mut decoder = Self::new();
        decoder.load(FileSource::new(path)?)?;
        Ok(decoder)
    }
}

impl<P: SourceProvider> WaveformDecoder<P> {
    /// Create a decoder with nothing loaded
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the header and locate the payload of a new source.
    ///
    /// Any previously loaded source is forgotten first, so a failed load
    /// leaves the decoder empty.
    pub fn load(&mut self, provider: P) -> Result<&ContainerHeader> {
        self.loaded = None;

        let name = provider.describe();
        debug!("Loading {}", name);

        let (header, payload) = {
            let mut source = provider.open()?;
            let header = parse_header(&mut source)?;
            let payload = locate_payload(&mut source)?;
            (header, payload)
        };

        info!(
            "Loaded {}: {} ch, {} Hz, {} bit, {} payload bytes at offset {}",
            name,
            header.channels,
            header.sample_rate,
            header.bits_per_sample,
            payload.size_bytes,
            payload.offset
        );

        let loaded = self.loaded.insert(LoadedSource {
            provider,
            header,
            payload,
        });
        Ok(&loaded.header)
    }

    /// Render the waveform at `resolution`, optionally writing it to `sink`.
    ///
    /// The sink is closed after writing, and also when rendering fails.
    ///
    /// # Errors
    /// - `Param`: resolution outside `[0.000001, 1.0]`
    /// - `Access`: nothing loaded, or the source cannot be reopened
    /// - `Read` / `InvalidRange`: decimation or synthesis failed
    /// - `Write` / `Close`: the sink rejected the output
    pub fn render(&self, resolution: f64, sink: Option<&mut dyn ByteSink>) -> Result<String> {
        let rendered = self.render_document(resolution);

        let Some(sink) = sink else {
            return rendered;
        };

        match rendered {
            Ok(svg) => {
                write_output(sink, &svg)?;
                Ok(svg)
            }
            Err(e) => {
                if let Err(close_err) = sink.close() {
                    warn!("Failed to close output after render error: {}", close_err);
                }
                Err(e)
            }
        }
    }

    fn render_document(&self, resolution: f64) -> Result<String> {
        validate_resolution(resolution)?;

        let loaded = self
            .loaded
            .as_ref()
            .ok_or_else(|| Error::Access("No source loaded".to_string()))?;
        let header = &loaded.header;

        let waveform = {
            let mut source = loaded.provider.open()?;
            decimate(
                &mut source,
                &loaded.payload,
                header.channels,
                header.bits_per_sample,
                resolution,
            )?
        };

        let svg = render_svg(header, &waveform)?;
        debug!(
            "Rendered {} buckets into {} bytes of SVG",
            waveform.len(),
            svg.len()
        );
        Ok(svg)
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.is_some()
    }

    pub fn header(&self) -> Option<&ContainerHeader> {
        self.loaded.as_ref().map(|l| &l.header)
    }

    pub fn payload(&self) -> Option<&PayloadLocation> {
        self.loaded.as_ref().map(|l| &l.payload)
    }

    pub fn channels(&self) -> Option<u16> {
        self.header().map(|h| h.channels)
    }

    pub fn sample_rate(&self) -> Option<u32> {
        self.header().map(|h| h.sample_rate)
    }

    pub fn byte_rate(&self) -> Option<u32> {
        self.header().map(|h| h.byte_rate)
    }

    pub fn bits_per_sample(&self) -> Option<u16> {
        self.header().map(|h| h.bits_per_sample)
    }

    pub fn chunk_size(&self) -> Option<u32> {
        self.header().map(|h| h.chunk_size)
    }

    pub fn audio_format(&self) -> Option<u16> {
        self.header().map(|h| h.audio_format)
    }

    pub fn kilobits_per_second(&self) -> Option<f64> {
        self.header().map(ContainerHeader::kilobits_per_second)
    }

    pub fn total_samples(&self) -> Option<u64> {
        self.loaded
            .as_ref()
            .map(|l| l.payload.total_samples(&l.header))
    }

    /// Duration rounded to whole seconds
    pub fn total_seconds(&self) -> Option<u64> {
        self.loaded
            .as_ref()
            .map(|l| l.payload.total_seconds(&l.header))
    }

    pub fn total_seconds_precise(&self) -> Option<f64> {
        self.loaded
            .as_ref()
            .map(|l| l.payload.total_seconds_precise(&l.header))
    }

    /// All accessor values at once
    pub fn info(&self) -> Option<WaveInfo> {
        let l = self.loaded.as_ref()?;
        let h = &l.header;
        Some(WaveInfo {
            chunk_size: h.chunk_size,
            audio_format: h.audio_format,
            channels: h.channels,
            sample_rate: h.sample_rate,
            byte_rate: h.byte_rate,
            block_align: h.block_align,
            bits_per_sample: h.bits_per_sample,
            kilobits_per_second: h.kilobits_per_second(),
            total_samples: l.payload.total_samples(h),
            total_seconds: l.payload.total_seconds(h),
            total_seconds_precise: l.payload.total_seconds_precise(h),
            payload_offset: l.payload.offset,
            payload_size: l.payload.size_bytes,
        })
    }
}

fn write_output(sink: &mut dyn ByteSink, svg: &str) -> Result<()> {
    let written = sink
        .write_bytes(svg.as_bytes())
        .map_err(|e| Error::Write(format!("Failed to write to output: {}", e)));
    let closed = sink
        .close()
        .map_err(|e| Error::Close(format!("Failed to close output: {}", e)));
    written?;
    closed
}
