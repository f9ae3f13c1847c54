//! Pull-based gzip decoding half.

use std::io::{self, BufReader, Read};

use bytes::{Buf, Bytes, BytesMut};
use flate2::bufread::GzDecoder;
use tracing::{debug, trace};

use crate::compression::constants::GZIP_CODEC;
use crate::compression::types::CompressionError;
use crate::constants::{DEFAULT_BLOCK_SIZE, MAX_BLOCK_SIZE};

/// Wraps the raw source so IO failures can be told apart from corrupt
/// compressed data once both come back out of the decoder as `io::Error`.
#[derive(Debug)]
struct SourceProbe<R> {
    inner: R,
    bytes_in: u64,
    failed: bool,
}

impl<R: Read> Read for SourceProbe<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.inner.read(buf) {
            Ok(n) => {
                self.bytes_in += n as u64;
                Ok(n)
            }
            Err(e) => {
                if e.kind() != io::ErrorKind::Interrupted {
                    self.failed = true;
                }
                Err(e)
            }
        }
    }
}

/// Decompressing byte source.
///
/// Raw input is pulled in `block_size` blocks and inflated into an
/// accumulation buffer; requests are served by slicing that buffer. Once the
/// gzip trailer has been consumed the decoder is marked finished and is never
/// driven again.
pub struct GzipSource<R: Read> {
    decoder: GzDecoder<BufReader<SourceProbe<R>>>,
    buffer: BytesMut,
    scratch: Vec<u8>,
    finished: bool,
}

impl<R: Read> GzipSource<R> {
    pub fn new(inner: R) -> Self {
        Self::with_block_size(inner, DEFAULT_BLOCK_SIZE)
    }

    pub fn with_block_size(inner: R, block_size: usize) -> Self {
        let block_size = block_size.clamp(1, MAX_BLOCK_SIZE);
        let probe = SourceProbe { inner, bytes_in: 0, failed: false };

        Self {
            decoder: GzDecoder::new(BufReader::with_capacity(block_size, probe)),
            buffer: BytesMut::with_capacity(block_size),
            scratch: vec![0u8; block_size],
            finished: false,
        }
    }

    /// The compressed stream has ended; only buffered bytes remain.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Decompressed bytes waiting to be read.
    #[inline]
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// Compressed bytes pulled from the underlying source so far.
    pub fn compressed_bytes_in(&self) -> u64 {
        self.probe().bytes_in
    }

    /// Return up to `n` bytes: exactly `n` unless the stream finished first.
    ///
    /// A short result always comes with `is_finished() == true`.
    pub fn read_chunk(&mut self, n: usize) -> io::Result<Bytes> {
        self.fill(n)?;
        let take = n.min(self.buffer.len());
        Ok(self.buffer.split_to(take).freeze())
    }

    pub fn into_inner(self) -> R {
        self.decoder.into_inner().into_inner().inner
    }

    fn probe(&self) -> &SourceProbe<R> {
        self.decoder.get_ref().get_ref()
    }

    fn fill(&mut self, want: usize) -> io::Result<()> {
        while !self.finished && self.buffer.len() < want {
            match self.decoder.read(&mut self.scratch) {
                Ok(0) => {
                    self.finished = true;
                    debug!(
                        compressed_in = self.compressed_bytes_in(),
                        buffered = self.buffer.len(),
                        "gzip stream finished"
                    );
                }
                Ok(n) => {
                    trace!(inflated = n, "gzip block");
                    self.buffer.extend_from_slice(&self.scratch[..n]);
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(self.classify(e)),
            }
        }
        Ok(())
    }

    fn classify(&self, e: io::Error) -> io::Error {
        if self.probe().failed {
            return e;
        }
        CompressionError::Corrupt { codec: GZIP_CODEC, msg: e.to_string() }.into_io()
    }
}

impl<R: Read> Read for GzipSource<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }

        self.fill(buf.len())?;
        let n = buf.len().min(self.buffer.len());
        buf[..n].copy_from_slice(&self.buffer[..n]);
        self.buffer.advance(n);
        Ok(n)
    }
}
