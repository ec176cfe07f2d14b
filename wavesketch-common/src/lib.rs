//! # wavesketch Common Library
//!
//! Shared code for the wavesketch crates:
//! - Error types
//! - TOML configuration loading
//! - Tracing subscriber setup

pub mod config;
pub mod error;
pub mod logging;

pub use error::{Error, Result};
