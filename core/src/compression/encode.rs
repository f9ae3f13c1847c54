//! Push-based gzip encoding half.

use std::io::{self, Write};

use flate2::{write::GzEncoder, Compression};
use tracing::debug;

use crate::constants::{DEFAULT_GZIP_LEVEL, MAX_GZIP_LEVEL};

/// Compressing byte sink.
///
/// Writes feed the deflate state; whatever compressed output it yields goes
/// straight to the inner sink. Output is not aligned with write calls.
pub struct GzipSink<W: Write> {
    encoder: GzEncoder<W>,
    bytes_in: u64,
}

impl<W: Write> GzipSink<W> {
    pub fn new(inner: W) -> Self {
        Self::with_level(inner, DEFAULT_GZIP_LEVEL)
    }

    /// Levels above 9 are clamped.
    pub fn with_level(inner: W, level: u32) -> Self {
        let level = Compression::new(level.min(MAX_GZIP_LEVEL));
        Self { encoder: GzEncoder::new(inner, level), bytes_in: 0 }
    }

    /// Uncompressed bytes accepted so far.
    #[inline]
    pub fn bytes_in(&self) -> u64 {
        self.bytes_in
    }

    /// Write the gzip trailer, flush the inner sink and hand it back.
    pub fn finish(self) -> io::Result<W> {
        let bytes_in = self.bytes_in;
        let mut inner = self.encoder.finish()?;
        inner.flush()?;
        debug!(bytes_in, "gzip stream finalized");
        Ok(inner)
    }
}

impl<W: Write> Write for GzipSink<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.encoder.write(buf)?;
        self.bytes_in += n as u64;
        Ok(n)
    }

    /// Sync-flush: everything written so far becomes decodable.
    fn flush(&mut self) -> io::Result<()> {
        self.encoder.flush()
    }
}
