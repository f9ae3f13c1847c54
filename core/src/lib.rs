//! recordio-core
//!
//! Sequential record streams: length-prefixed opaque payloads with an
//! optional gzip transport.
//! No Python, no FFI.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod types;
pub mod config;

// Codecs
pub mod varint;
pub mod compression;

pub mod telemetry;

// Stream layer
pub mod recordio;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::config::{EofPolicy, ReaderOptions, Transport, WriterOptions};
    pub use crate::recordio::{
        open_reader, open_writer, BufferedRecordWriter, Frame, InputSource, OutputSink,
        RecordReader, RecordWriter, StreamReader, StreamWriter,
    };
    pub use crate::telemetry::StreamCounters;
    pub use crate::types::RecordIoError;
}
