//! # wavesketch
//!
//! Waveform previews for uncompressed PCM (RIFF/WAVE) audio.
//!
//! **Pipeline:** parse header → locate `data` chunk → decimate the sample
//! stream into min/max buckets → synthesize a closed SVG path.
//!
//! ```no_run
//! use wavesketch::{WaveformDecoder, DEFAULT_RESOLUTION};
//!
//! let decoder = WaveformDecoder::open("speech.wav")?;
//! println!("{} Hz, {} s", decoder.sample_rate().unwrap_or(0), decoder.total_seconds().unwrap_or(0));
//! let svg = decoder.render(DEFAULT_RESOLUTION, None)?;
//! # Ok::<(), wavesketch::Error>(())
//! ```

pub mod audio;
pub mod decoder;
pub mod error;
pub mod render;
pub mod source;

pub use decoder::{WaveInfo, WaveformDecoder, DEFAULT_RESOLUTION};
pub use error::{Error, Result};
pub use source::{ByteSink, ByteSource, FileSource, MemorySource, SourceProvider};
