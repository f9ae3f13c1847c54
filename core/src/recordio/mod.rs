//! Record streams: varint-length-prefixed payloads closed by a `-1`
//! terminator, over a raw or gzip transport.
//!
//! ```text
//! Stream     := Frame* Terminator
//! Frame      := varint(len >= 0) payload[len]
//! Terminator := varint(-1)            (ff ff ff ff 0f)
//! ```
//!
//! The transport is not self-describing; readers must be told whether the
//! file is compressed.

pub mod framing;
pub mod io;
pub mod reader;
pub mod writer;
pub mod message;
pub mod buffered;

pub use framing::{Frame, FrameError};
pub use io::{InputSource, OutputSink, SinkTransport, SourceTransport};
pub use reader::{open_reader, RecordReader, Records, StreamReader};
pub use writer::{open_writer, RecordWriter, StreamWriter};
pub use message::{decode_message, encode_message, for_each_record, read_into_vec};
pub use buffered::BufferedRecordWriter;
