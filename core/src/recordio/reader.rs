//! Record stream reader.

use std::io::Read;
use std::path::Path;

use bytes::Bytes;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};

use crate::config::{EofPolicy, ReaderOptions, Transport};
use crate::constants::{DEFAULT_BLOCK_SIZE, READ_RESERVE_LIMIT};
use crate::recordio::framing::{classify_length, Frame};
use crate::recordio::io::{open_input, InputSource, SourceTransport};
use crate::recordio::message::decode_message;
use crate::telemetry::StreamCounters;
use crate::types::RecordIoError;
use crate::varint::VarintDecoder;

/// Reads records until the terminator frame.
///
/// After the terminator every further read reports end-of-stream without
/// touching the source. After a framing, decompression or I/O error the
/// position in the stream is unknown, so every further read reports `Failed`.
pub struct RecordReader<R: Read> {
    source: Option<SourceTransport<R>>,
    eof_policy: EofPolicy,
    ended: bool,
    failed: bool,
    counters: StreamCounters,
}

/// Reader over a normalized input source.
pub type StreamReader = RecordReader<Box<dyn Read + Send>>;

impl<R: Read> RecordReader<R> {
    pub fn new(inner: R, options: &ReaderOptions) -> Result<Self, RecordIoError> {
        options.validate()?;
        Ok(Self {
            source: Some(SourceTransport::new(inner, options.transport, options.block_size)),
            eof_policy: options.eof_policy,
            ended: false,
            failed: false,
            counters: StreamCounters::default(),
        })
    }

    pub fn with_transport(inner: R, transport: Transport) -> Self {
        Self {
            source: Some(SourceTransport::new(inner, transport, DEFAULT_BLOCK_SIZE)),
            eof_policy: EofPolicy::Strict,
            ended: false,
            failed: false,
            counters: StreamCounters::default(),
        }
    }

    /// The terminator (or, when lenient, a clean EOF) has been reached.
    pub fn is_ended(&self) -> bool {
        self.ended
    }

    pub fn counters(&self) -> &StreamCounters {
        &self.counters
    }

    pub fn is_failed(&self) -> bool {
        self.failed
    }

    pub fn read_frame(&mut self) -> Result<Frame, RecordIoError> {
        if self.ended {
            return Ok(Frame::End);
        }
        if self.source.is_none() {
            return Err(RecordIoError::Closed);
        }
        if self.failed {
            return Err(RecordIoError::Failed);
        }

        let frame = self.next_frame();
        if frame.is_err() {
            self.failed = true;
        }
        frame
    }

    fn next_frame(&mut self) -> Result<Frame, RecordIoError> {
        let prefix = {
            let source = self.source.as_mut().ok_or(RecordIoError::Closed)?;
            read_prefix(source)?
        };
        let Some((length, prefix_len)) = prefix else {
            return self.end_without_terminator();
        };

        let Some(len) = classify_length(length)? else {
            self.ended = true;
            self.counters.add_terminator(prefix_len);
            debug!(records = self.counters.records, "terminator reached");
            return Ok(Frame::End);
        };

        let source = self.source.as_mut().ok_or(RecordIoError::Closed)?;
        let payload = read_payload(source, len)?;
        self.counters.add_record(len, prefix_len);
        trace!(len, "record read");
        Ok(Frame::Record(payload))
    }

    /// Next record, or `None` at end-of-stream.
    pub fn read(&mut self) -> Result<Option<Bytes>, RecordIoError> {
        Ok(self.read_frame()?.into_record())
    }

    pub fn read_message<T: DeserializeOwned>(&mut self) -> Result<Option<T>, RecordIoError> {
        self.read()?.map(|payload| decode_message(&payload)).transpose()
    }

    /// Iterate the remaining records. Stops after end-of-stream or the first
    /// error.
    pub fn records(&mut self) -> Records<'_, R> {
        Records { reader: self, failed: false }
    }

    /// Release the transport. Reading afterwards fails with `Closed`.
    pub fn close(&mut self) -> Result<StreamCounters, RecordIoError> {
        self.source.take().ok_or(RecordIoError::Closed)?;
        debug!(
            records = self.counters.records,
            ended = self.ended,
            "record reader closed"
        );
        Ok(self.counters.clone())
    }

    fn end_without_terminator(&mut self) -> Result<Frame, RecordIoError> {
        match self.eof_policy {
            EofPolicy::Strict => Err(RecordIoError::MissingTerminator),
            EofPolicy::Lenient => {
                self.ended = true;
                debug!(records = self.counters.records, "clean EOF treated as end of stream");
                Ok(Frame::End)
            }
        }
    }
}

impl StreamReader {
    pub fn open(src: InputSource, options: &ReaderOptions) -> Result<Self, RecordIoError> {
        options.validate()?;
        let input = open_input(src, options.transport)?;
        Self::new(input, options)
    }
}

/// Open a reader on the stream at `path`.
pub fn open_reader(path: impl AsRef<Path>, compressed: bool) -> Result<StreamReader, RecordIoError> {
    StreamReader::open(
        InputSource::File(path.as_ref().to_path_buf()),
        &ReaderOptions::compressed(compressed),
    )
}

/// Decode one length prefix, byte by byte.
///
/// `Ok(None)` means the source ended before the first byte.
fn read_prefix<R: Read>(
    source: &mut SourceTransport<R>,
) -> Result<Option<(i32, usize)>, RecordIoError> {
    let mut decoder = VarintDecoder::new();
    loop {
        match source.read_byte()? {
            Some(byte) => {
                if let Some(length) = decoder.push(byte)? {
                    return Ok(Some((length, decoder.consumed())));
                }
            }
            None if decoder.in_progress() => return Err(decoder.truncated().into()),
            None => return Ok(None),
        }
    }
}

/// Read exactly `len` payload bytes.
///
/// The buffer grows with what the source delivers, so a corrupt length
/// cannot force a huge allocation up front.
fn read_payload<R: Read>(source: &mut SourceTransport<R>, len: usize) -> Result<Bytes, RecordIoError> {
    let mut buf = Vec::with_capacity(len.min(READ_RESERVE_LIMIT));
    let actual = source.by_ref().take(len as u64).read_to_end(&mut buf)?;
    if actual < len {
        return Err(RecordIoError::TruncatedPayload { expected: len, actual });
    }
    Ok(Bytes::from(buf))
}

pub struct Records<'a, R: Read> {
    reader: &'a mut RecordReader<R>,
    failed: bool,
}

impl<R: Read> Iterator for Records<'_, R> {
    type Item = Result<Bytes, RecordIoError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.reader.read() {
            Ok(Some(payload)) => Some(Ok(payload)),
            Ok(None) => None,
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}
