//! Normalized I/O for record streams: where bytes come from or go to, and the
//! raw/gzip transport laid over them.

use std::fs::{File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::compression::{GzipSink, GzipSource};
use crate::config::{Transport, WriterOptions};
use crate::constants::DEFAULT_BUFFER_SIZE;
use crate::recordio::framing::classify_length;
use crate::types::RecordIoError;
use crate::varint::VarintDecoder;

/// Canonical input abstraction
pub enum InputSource {
    Reader(Box<dyn Read + Send>),
    File(PathBuf),
    Memory(Vec<u8>),
}

/// Canonical output abstraction
pub enum OutputSink {
    Writer(Box<dyn Write + Send>),
    File(PathBuf),
}

/// Normalize input source into a boxed reader.
///
/// Raw file sources get a read buffer. The gzip transport pulls whole blocks
/// through its own buffer, so files feeding it are left unbuffered.
pub fn open_input(
    src: InputSource,
    transport: Transport,
) -> Result<Box<dyn Read + Send>, RecordIoError> {
    let reader: Box<dyn Read + Send> = match src {
        InputSource::Reader(r) => r,
        InputSource::File(p) => {
            let file = File::open(&p)?;
            debug!(path = %p.display(), ?transport, "opened record input");
            match transport {
                Transport::Raw => Box::new(BufReader::with_capacity(DEFAULT_BUFFER_SIZE, file)),
                Transport::Gzip => Box::new(file),
            }
        }
        InputSource::Memory(b) => Box::new(io::Cursor::new(b)),
    };
    Ok(reader)
}

/// Normalize output sink into a boxed writer.
///
/// File sinks are truncated unless `options.append` is set, in which case an
/// existing raw stream is reopened for continuation.
pub fn open_output(
    sink: OutputSink,
    options: &WriterOptions,
) -> Result<Box<dyn Write + Send>, RecordIoError> {
    match sink {
        OutputSink::Writer(w) => {
            if options.append {
                return Err(RecordIoError::InvalidConfig(
                    "append requires a file sink".into(),
                ));
            }
            Ok(w)
        }
        OutputSink::File(p) => {
            let file = if options.append {
                open_for_append(&p)?
            } else {
                File::create(&p)?
            };
            debug!(path = %p.display(), append = options.append, "opened record output");
            Ok(Box::new(BufWriter::with_capacity(options.buffer_size, file)))
        }
    }
}

/// Reopen a cleanly closed raw stream so new frames land before a fresh
/// terminator.
///
/// A missing or empty file is a valid empty starting point. Anything else must
/// decode frame by frame up to a terminator that ends exactly at the end of
/// the file; that terminator is cut off.
pub fn open_for_append(path: &Path) -> Result<File, RecordIoError> {
    let mut file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(path)?;

    let len = file.metadata()?.len();
    if len > 0 {
        let Some(kept) = terminator_offset(&mut file, len)? else {
            return Err(RecordIoError::MissingTerminator);
        };
        file.set_len(kept)?;
        debug!(path = %path.display(), kept, "dropped trailing terminator");
    }

    file.seek(SeekFrom::End(0))?;
    Ok(file)
}

/// Offset of the terminator frame when it is the last thing in the file.
///
/// Payloads are skipped without being read. Any framing problem, or bytes
/// after the terminator, yields `None`.
fn terminator_offset(file: &mut File, len: u64) -> Result<Option<u64>, RecordIoError> {
    file.seek(SeekFrom::Start(0))?;
    let mut reader = BufReader::with_capacity(DEFAULT_BUFFER_SIZE, file);
    let mut offset = 0u64;

    while offset < len {
        let mut decoder = VarintDecoder::new();
        let length = loop {
            let mut byte = [0u8; 1];
            match reader.read_exact(&mut byte) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => return Ok(None),
                Err(e) => return Err(e.into()),
            }
            match decoder.push(byte[0]) {
                Ok(Some(length)) => break length,
                Ok(None) => {}
                Err(_) => return Ok(None),
            }
        };
        let frame_start = offset;
        offset += decoder.consumed() as u64;

        match classify_length(length) {
            Ok(None) => return Ok((offset == len).then_some(frame_start)),
            Ok(Some(payload_len)) => {
                offset += payload_len as u64;
                if offset > len {
                    return Ok(None);
                }
                reader.seek_relative(payload_len as i64)?;
            }
            Err(_) => return Ok(None),
        }
    }

    Ok(None)
}

// ================= Transports =================

/// Write side of a stream: bytes go out as-is or through gzip.
pub enum SinkTransport<W: Write> {
    Raw(W),
    Gzip(GzipSink<W>),
}

impl<W: Write> SinkTransport<W> {
    pub fn new(inner: W, transport: Transport, level: u32) -> Self {
        match transport {
            Transport::Raw => SinkTransport::Raw(inner),
            Transport::Gzip => SinkTransport::Gzip(GzipSink::with_level(inner, level)),
        }
    }

    pub fn transport(&self) -> Transport {
        match self {
            SinkTransport::Raw(_) => Transport::Raw,
            SinkTransport::Gzip(_) => Transport::Gzip,
        }
    }

    /// Finalize the transport (gzip trailer), flush and return the sink.
    pub fn finish(self) -> io::Result<W> {
        match self {
            SinkTransport::Raw(mut w) => {
                w.flush()?;
                Ok(w)
            }
            SinkTransport::Gzip(gz) => gz.finish(),
        }
    }
}

impl<W: Write> Write for SinkTransport<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            SinkTransport::Raw(w) => w.write(buf),
            SinkTransport::Gzip(gz) => gz.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            SinkTransport::Raw(w) => w.flush(),
            SinkTransport::Gzip(gz) => gz.flush(),
        }
    }
}

/// Read side of a stream.
pub enum SourceTransport<R: Read> {
    Raw(R),
    Gzip(GzipSource<R>),
}

impl<R: Read> SourceTransport<R> {
    pub fn new(inner: R, transport: Transport, block_size: usize) -> Self {
        match transport {
            Transport::Raw => SourceTransport::Raw(inner),
            Transport::Gzip => SourceTransport::Gzip(GzipSource::with_block_size(inner, block_size)),
        }
    }

    /// Next byte, or `None` once the source is exhausted.
    pub fn read_byte(&mut self) -> Result<Option<u8>, RecordIoError> {
        let mut byte = [0u8; 1];
        loop {
            match self.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(byte[0])),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    pub fn into_inner(self) -> R {
        match self {
            SourceTransport::Raw(r) => r,
            SourceTransport::Gzip(gz) => gz.into_inner(),
        }
    }
}

impl<R: Read> Read for SourceTransport<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            SourceTransport::Raw(r) => r.read(buf),
            SourceTransport::Gzip(gz) => gz.read(buf),
        }
    }
}
