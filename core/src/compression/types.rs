use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompressionError {
    /// The compressed stream is invalid: bad header, corrupt deflate data,
    /// checksum mismatch or a stream cut short.
    #[error("codec {codec} rejected input: {msg}")]
    Corrupt { codec: &'static str, msg: String },
}

impl CompressionError {
    /// Carry this error through `std::io::Read`/`Write` signatures.
    ///
    /// `RecordIoError::from(io::Error)` unwraps it again.
    pub fn into_io(self) -> io::Error {
        io::Error::new(io::ErrorKind::InvalidData, self)
    }
}
