//! Chunk scanner
//!
//! Walks `(tag, size, payload)` chunks after the header until the `data`
//! chunk appears. Any number of intervening chunks (`LIST`, `fact`, `cue `,
//! ...) is skipped by trusting the declared size.

use super::types::PayloadLocation;
use crate::error::{Error, Result};
use crate::source::ByteSource;
use tracing::debug;

pub const DATA_TAG: [u8; 4] = *b"data";

const END_OF_STREAM: &str = "unexpected end of stream while scanning chunks";

/// Find the sample payload, starting from the cursor right after the header.
///
/// Returns the absolute offset of the first payload byte and the declared
/// payload size. The cursor is left at that offset.
///
/// # Errors
/// - `Read`: the stream ends or fails before a `data` chunk is found
/// - `HeaderInconsistency`: a skipped chunk declares a size that is negative
///   when read as a signed 32-bit value
pub fn locate_payload<S: ByteSource + ?Sized>(source: &mut S) -> Result<PayloadLocation> {
    loop {
        let mut tag = [0u8; 4];
        read_chunk_field(source, &mut tag)?;

        let mut size = [0u8; 4];
        read_chunk_field(source, &mut size)?;
        let size = u32::from_le_bytes(size);

        if tag == DATA_TAG {
            let offset = source
                .tell()
                .map_err(|e| Error::Read(format!("Failed to tell position in file: {}", e)))?;

            debug!("Found data chunk at offset {} ({} bytes)", offset, size);
            return Ok(PayloadLocation {
                offset,
                size_bytes: size,
            });
        }

        let skip = i32::try_from(size)
            .map_err(|_| Error::inconsistent("chunk size", format!("at most {}", i32::MAX), size))?;

        debug!("Skipping '{}' chunk ({} bytes)", tag.escape_ascii(), skip);
        source
            .seek_by(skip as i64)
            .map_err(|e| Error::Read(format!("Failed to seek in file: {}", e)))?;
    }
}

fn read_chunk_field<S: ByteSource + ?Sized>(source: &mut S, buf: &mut [u8]) -> Result<()> {
    let n = source
        .read_up_to(buf)
        .map_err(|e| Error::Read(format!("{}: {}", END_OF_STREAM, e)))?;
    if n < buf.len() {
        return Err(Error::Read(END_OF_STREAM.to_string()));
    }
    Ok(())
}
