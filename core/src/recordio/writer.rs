//! Record stream writer.

use std::io::{self, Write};
use std::path::Path;

use bytes::BytesMut;
use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::config::{Transport, WriterOptions};
use crate::constants::{MAX_VARINT32_LEN, TERMINATOR_LEN};
use crate::recordio::framing::frame_length;
use crate::recordio::io::{open_output, OutputSink, SinkTransport};
use crate::recordio::message::encode_message;
use crate::telemetry::StreamCounters;
use crate::types::RecordIoError;
use crate::varint::put_varint32;

/// Writes length-prefixed records and a closing terminator.
///
/// The stream is closed explicitly with [`close`](Self::close) or
/// [`finish`](Self::finish); a writer dropped while open closes itself so the
/// terminator and any buffered gzip output still reach the sink.
///
/// An I/O error can leave part of a frame on the sink. The writer is then
/// failed: every later call returns `Failed` and no terminator is written.
pub struct RecordWriter<W: Write> {
    sink: Option<SinkTransport<W>>,
    prefix: BytesMut,
    failed: bool,
    counters: StreamCounters,
}

/// Writer over a normalized output sink.
pub type StreamWriter = RecordWriter<Box<dyn Write + Send>>;

impl<W: Write> RecordWriter<W> {
    pub fn new(inner: W, options: &WriterOptions) -> Result<Self, RecordIoError> {
        options.validate()?;
        Ok(Self::with_transport(inner, options.transport, options.level))
    }

    pub fn with_transport(inner: W, transport: Transport, level: u32) -> Self {
        Self {
            sink: Some(SinkTransport::new(inner, transport, level)),
            prefix: BytesMut::with_capacity(MAX_VARINT32_LEN),
            failed: false,
            counters: StreamCounters::default(),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.sink.is_none()
    }

    pub fn is_failed(&self) -> bool {
        self.failed
    }

    pub fn counters(&self) -> &StreamCounters {
        &self.counters
    }

    /// Append one record: length prefix first, then the payload.
    pub fn write(&mut self, payload: &[u8]) -> Result<(), RecordIoError> {
        let length = frame_length(payload.len())?;
        self.ensure_writable()?;

        self.prefix.clear();
        let prefix_len = put_varint32(&mut self.prefix, length);
        let written = match self.sink.as_mut() {
            Some(sink) => sink.write_all(&self.prefix).and_then(|()| sink.write_all(payload)),
            None => return Err(RecordIoError::Closed),
        };
        self.check(written)?;

        self.counters.add_record(payload.len(), prefix_len);
        trace!(len = payload.len(), "record written");
        Ok(())
    }

    pub fn write_message<T: Serialize>(&mut self, message: &T) -> Result<(), RecordIoError> {
        let payload = encode_message(message)?;
        self.write(&payload)
    }

    /// Push buffered bytes to the sink. With gzip this is a sync flush: the
    /// output so far becomes decodable, at some cost in ratio.
    pub fn flush(&mut self) -> Result<(), RecordIoError> {
        self.ensure_writable()?;
        let flushed = match self.sink.as_mut() {
            Some(sink) => sink.flush(),
            None => return Err(RecordIoError::Closed),
        };
        self.check(flushed)
    }

    /// Write the terminator and finalize the transport.
    ///
    /// A failed writer releases its sink without a terminator and reports
    /// `Failed`.
    pub fn close(&mut self) -> Result<StreamCounters, RecordIoError> {
        let sink = self.sink.take().ok_or(RecordIoError::Closed)?;
        self.terminate(sink)?;
        Ok(self.counters.clone())
    }

    /// Close and hand back the underlying sink.
    pub fn finish(mut self) -> Result<W, RecordIoError> {
        let sink = self.sink.take().ok_or(RecordIoError::Closed)?;
        self.terminate(sink)
    }

    fn ensure_writable(&self) -> Result<(), RecordIoError> {
        if self.sink.is_none() {
            return Err(RecordIoError::Closed);
        }
        if self.failed {
            return Err(RecordIoError::Failed);
        }
        Ok(())
    }

    fn check<T>(&mut self, result: io::Result<T>) -> Result<T, RecordIoError> {
        result.map_err(|e| {
            self.failed = true;
            warn!(error = %e, "record sink failed, stream abandoned");
            RecordIoError::from(e)
        })
    }

    fn terminate(&mut self, mut sink: SinkTransport<W>) -> Result<W, RecordIoError> {
        if self.failed {
            debug!(records = self.counters.records, "failed record stream released without terminator");
            return Err(RecordIoError::Failed);
        }

        self.prefix.clear();
        let prefix_len = put_varint32(&mut self.prefix, TERMINATOR_LEN);
        let written = sink.write_all(&self.prefix);
        self.check(written)?;
        self.counters.add_terminator(prefix_len);

        let transport = sink.transport();
        let inner = self.check(sink.finish())?;
        debug!(
            ?transport,
            records = self.counters.records,
            bytes_payload = self.counters.bytes_payload,
            "record stream closed"
        );
        Ok(inner)
    }
}

impl StreamWriter {
    pub fn open(sink: OutputSink, options: &WriterOptions) -> Result<Self, RecordIoError> {
        options.validate()?;
        let out = open_output(sink, options)?;
        Ok(Self::with_transport(out, options.transport, options.level))
    }

    pub fn create(path: impl AsRef<Path>, options: &WriterOptions) -> Result<Self, RecordIoError> {
        Self::open(OutputSink::File(path.as_ref().to_path_buf()), options)
    }
}

impl<W: Write> Drop for RecordWriter<W> {
    fn drop(&mut self) {
        if let Some(sink) = self.sink.take() {
            if self.failed {
                return;
            }
            if let Err(e) = self.terminate(sink) {
                warn!(error = %e, "failed to close record stream on drop");
            }
        }
    }
}

/// Create (or truncate) `path` and open a writer on it.
pub fn open_writer(path: impl AsRef<Path>, compressed: bool) -> Result<StreamWriter, RecordIoError> {
    StreamWriter::create(path, &WriterOptions::compressed(compressed))
}
