//! Test helper modules for wavesketch integration tests
//!
//! - audio_generator: real WAV files written with hound
//! - wav_builder: hand-assembled RIFF bytes for malformed/unusual layouts

#![allow(dead_code)]

pub mod audio_generator;
pub mod wav_builder;

pub use audio_generator::{generate_silent_wav, generate_sine_wav};
pub use wav_builder::WavBuilder;
