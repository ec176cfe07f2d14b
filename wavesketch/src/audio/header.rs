//! Container header parser
//!
//! Layout (little-endian, offsets from stream start):
//!
//! | Offset | Size | Field |
//! |--------|------|-------|
//! | 0  | 4 | `RIFF` |
//! | 4  | 4 | chunk size |
//! | 8  | 4 | `WAVE` |
//! | 12 | 4 | `fmt ` |
//! | 16 | 4 | sub-chunk 1 size |
//! | 20 | 2 | audio format (1 = PCM) |
//! | 22 | 2 | channels |
//! | 24 | 4 | sample rate |
//! | 28 | 4 | byte rate |
//! | 32 | 2 | block align |
//! | 34 | 2 | bits per sample |

use super::read_field;
use super::types::ContainerHeader;
use crate::error::{Error, Result};
use crate::source::ByteSource;
use tracing::debug;

pub const RIFF_TAG: [u8; 4] = *b"RIFF";
pub const WAVE_TAG: [u8; 4] = *b"WAVE";
pub const FMT_TAG: [u8; 4] = *b"fmt ";

/// Linear PCM format code
pub const PCM_FORMAT: u16 = 1;

/// Bytes consumed by a successful [`parse_header`]
pub const HEADER_LEN: u64 = 36;

/// Parse and validate the header from a source positioned at offset 0.
///
/// On success the cursor sits exactly [`HEADER_LEN`] bytes in.
///
/// # Errors
/// - `IncompatibleFormat`: wrong magic tag or non-PCM audio format
/// - `Read`: the stream ends inside a numeric field
/// - `HeaderInconsistency`: derived fields disagree (see [`validate`])
pub fn parse_header<S: ByteSource + ?Sized>(source: &mut S) -> Result<ContainerHeader> {
    expect_tag(source, RIFF_TAG, "Unsupported file type")?;

    let mut size = [0u8; 4];
    read_field(source, &mut size, "chunk size")?;
    let chunk_size = u32::from_le_bytes(size);

    expect_tag(source, WAVE_TAG, "Unsupported file format")?;
    expect_tag(source, FMT_TAG, "Unsupported file format")?;

    let mut fmt = [0u8; 20];
    read_field(source, &mut fmt, "fmt sub-chunk")?;

    let header = ContainerHeader {
        chunk_size,
        sub_chunk1_size: u32::from_le_bytes([fmt[0], fmt[1], fmt[2], fmt[3]]),
        audio_format: u16::from_le_bytes([fmt[4], fmt[5]]),
        channels: u16::from_le_bytes([fmt[6], fmt[7]]),
        sample_rate: u32::from_le_bytes([fmt[8], fmt[9], fmt[10], fmt[11]]),
        byte_rate: u32::from_le_bytes([fmt[12], fmt[13], fmt[14], fmt[15]]),
        block_align: u16::from_le_bytes([fmt[16], fmt[17]]),
        bits_per_sample: u16::from_le_bytes([fmt[18], fmt[19]]),
    };

    if header.audio_format != PCM_FORMAT {
        return Err(Error::IncompatibleFormat(format!(
            "Unsupported audio format {} (only linear PCM is supported)",
            header.audio_format
        )));
    }

    validate(&header)?;

    debug!(
        "Parsed header: channels={}, sample_rate={}, byte_rate={}, block_align={}, bits_per_sample={}",
        header.channels,
        header.sample_rate,
        header.byte_rate,
        header.block_align,
        header.bits_per_sample
    );

    Ok(header)
}

/// Cross-check the derived fields of a header.
///
/// Both products must divide evenly by 8 and equal the stored values.
pub fn validate(header: &ContainerHeader) -> Result<()> {
    if header.channels == 0 {
        return Err(Error::inconsistent("channels", "at least 1", 0));
    }
    if header.sample_rate == 0 {
        return Err(Error::inconsistent("sample_rate", "greater than 0", 0));
    }
    if header.bits_per_sample == 0 {
        return Err(Error::inconsistent("bits_per_sample", "greater than 0", 0));
    }

    let frame_bits = header.channels as u64 * header.bits_per_sample as u64;

    let byte_rate_bits = header.sample_rate as u64 * frame_bits;
    if byte_rate_bits % 8 != 0 || byte_rate_bits / 8 != header.byte_rate as u64 {
        return Err(Error::inconsistent(
            "byte_rate",
            bits_as_bytes(byte_rate_bits),
            header.byte_rate,
        ));
    }

    if frame_bits % 8 != 0 || frame_bits / 8 != header.block_align as u64 {
        return Err(Error::inconsistent(
            "block_align",
            bits_as_bytes(frame_bits),
            header.block_align,
        ));
    }

    Ok(())
}

fn bits_as_bytes(bits: u64) -> String {
    if bits % 8 == 0 {
        (bits / 8).to_string()
    } else {
        (bits as f64 / 8.0).to_string()
    }
}

fn expect_tag<S: ByteSource + ?Sized>(
    source: &mut S,
    expected: [u8; 4],
    message: &str,
) -> Result<()> {
    let mut tag = [0u8; 4];
    let n = source
        .read_up_to(&mut tag)
        .map_err(|e| Error::Read(format!("Failed to read chunk tag: {}", e)))?;

    if n < tag.len() || tag != expected {
        return Err(Error::IncompatibleFormat(format!(
            "{}: expected '{}', found '{}'",
            message,
            expected.escape_ascii(),
            tag[..n].escape_ascii()
        )));
    }
    Ok(())
}
