//! RIFF/WAVE decoding stages
//!
//! - [`header`]: fixed-layout header parsing and validation
//! - [`chunks`]: scan past auxiliary chunks to the `data` payload
//! - [`decimate`]: stream the payload into min/max bucket summaries

pub mod chunks;
pub mod decimate;
pub mod header;
pub mod types;

pub use chunks::locate_payload;
pub use decimate::decimate;
pub use header::parse_header;
pub use types::{ContainerHeader, PayloadLocation, SampleSummary, Waveform};

use crate::error::{Error, Result};
use crate::source::ByteSource;

/// Read exactly `buf.len()` bytes, treating a short read as a read error
pub(crate) fn read_field<S: ByteSource + ?Sized>(
    source: &mut S,
    buf: &mut [u8],
    what: &str,
) -> Result<()> {
    let n = source
        .read_up_to(buf)
        .map_err(|e| Error::Read(format!("Failed to read {}: {}", what, e)))?;
    if n < buf.len() {
        return Err(Error::Read(format!(
            "Failed to read {}: expected {} bytes, got {}",
            what,
            buf.len(),
            n
        )));
    }
    Ok(())
}
