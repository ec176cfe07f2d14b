//! Byte source and sink capabilities
//!
//! The decoder never opens files itself. It asks a [`SourceProvider`] for a
//! fresh [`ByteSource`] on every load/render call and drops it when the call
//! returns, so the handle is released on every exit path.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::{self, BufReader, Cursor, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Positioned, seekable byte stream
pub trait ByteSource {
    /// Fill `buf` as far as the stream allows.
    ///
    /// Returns the number of bytes read; fewer than `buf.len()` only at end
    /// of stream, `0` when already at the end.
    fn read_up_to(&mut self, buf: &mut [u8]) -> io::Result<usize>;

    /// Move the cursor to an absolute offset
    fn seek_absolute(&mut self, offset: u64) -> io::Result<u64>;

    /// Move the cursor relative to its current position
    fn seek_by(&mut self, delta: i64) -> io::Result<u64>;

    /// Current cursor position
    fn tell(&mut self) -> io::Result<u64>;
}

fn fill_from<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

impl<T: Read + Seek + ?Sized> ByteSource for T {
    fn read_up_to(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        fill_from(self, buf)
    }

    fn seek_absolute(&mut self, offset: u64) -> io::Result<u64> {
        self.seek(SeekFrom::Start(offset))
    }

    fn seek_by(&mut self, delta: i64) -> io::Result<u64> {
        self.seek(SeekFrom::Current(delta))
    }

    fn tell(&mut self) -> io::Result<u64> {
        self.stream_position()
    }
}

/// Destination for rendered output
pub trait ByteSink {
    /// Write all of `bytes`
    fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()>;

    /// Flush and release the sink
    fn close(&mut self) -> io::Result<()>;
}

impl<W: Write + ?Sized> ByteSink for W {
    fn write_bytes(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.write_all(bytes)
    }

    fn close(&mut self) -> io::Result<()> {
        self.flush()
    }
}

/// Opens a fresh [`ByteSource`] on demand
pub trait SourceProvider {
    type Source: ByteSource;

    /// Open a new source positioned at offset 0
    fn open(&self) -> Result<Self::Source>;

    /// Human-readable name for log messages
    fn describe(&self) -> String;
}

/// Provider backed by a file on disk
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Validate and remember a file path
    ///
    /// # Errors
    /// - `Param` if the path is empty or does not exist
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(Error::Param("No file specified".to_string()));
        }
        if !path.exists() {
            return Err(Error::Param(format!(
                "File does not exist: {}",
                path.display()
            )));
        }
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Buffered file handle
///
/// Relative seeks stay inside the read buffer when possible, which matters
/// for the decimator's short forward strides.
pub struct FileReader {
    inner: BufReader<File>,
}

impl ByteSource for FileReader {
    fn read_up_to(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        fill_from(&mut self.inner, buf)
    }

    fn seek_absolute(&mut self, offset: u64) -> io::Result<u64> {
        self.inner.seek(SeekFrom::Start(offset))
    }

    fn seek_by(&mut self, delta: i64) -> io::Result<u64> {
        self.inner.seek_relative(delta)?;
        self.inner.stream_position()
    }

    fn tell(&mut self) -> io::Result<u64> {
        self.inner.stream_position()
    }
}

impl SourceProvider for FileSource {
    type Source = FileReader;

    fn open(&self) -> Result<FileReader> {
        let file = File::open(&self.path).map_err(|e| {
            Error::Access(format!("Failed to open file {}: {}", self.path.display(), e))
        })?;
        Ok(FileReader {
            inner: BufReader::new(file),
        })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Provider backed by bytes already in memory
#[derive(Debug, Clone)]
pub struct MemorySource {
    bytes: Arc<[u8]>,
}

impl MemorySource {
    pub fn new(bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl From<Vec<u8>> for MemorySource {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

impl SourceProvider for MemorySource {
    type Source = Cursor<Arc<[u8]>>;

    fn open(&self) -> Result<Self::Source> {
        Ok(Cursor::new(Arc::clone(&self.bytes)))
    }

    fn describe(&self) -> String {
        format!("<memory: {} bytes>", self.bytes.len())
    }
}
