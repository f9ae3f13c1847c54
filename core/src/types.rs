use std::io;

use thiserror::Error;

use crate::compression::CompressionError;
use crate::recordio::framing::FrameError;
use crate::varint::VarintError;

/// Unified record stream error covering IO, framing, varint, compression,
/// message and configuration failures.
/// - `From<T>` impls let `?` cross every layer.
/// - A caller seeing any of these should treat the stream as unusable.
#[derive(Debug, Error)]
pub enum RecordIoError {
    /// Underlying source/sink failure, passed through unchanged.
    #[error("I/O error: {0}")]
    Io(io::Error),

    /// Length prefix overran 5 bytes or stopped mid-way.
    #[error("malformed varint: {0}")]
    MalformedVarint(VarintError),

    /// Negative length that is not the terminator sentinel.
    #[error("malformed frame: length {length}")]
    MalformedFrame { length: i32 },

    /// Source exhausted inside a payload.
    #[error("truncated payload: expected {expected} bytes, got {actual}")]
    TruncatedPayload { expected: usize, actual: usize },

    /// Source exhausted at a frame boundary without a terminator.
    #[error("stream ended without a terminator frame")]
    MissingTerminator,

    #[error("decompression error: {0}")]
    Decompression(CompressionError),

    #[error("record too large: {len} bytes")]
    RecordTooLarge { len: usize },

    #[error("message encode error: {0}")]
    Encode(#[from] bincode::error::EncodeError),

    #[error("message decode error: {0}")]
    Decode(#[from] bincode::error::DecodeError),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The handle was already closed.
    #[error("stream is closed")]
    Closed,

    /// An earlier error left the stream at an unknown frame boundary.
    #[error("stream is unusable after an earlier error")]
    Failed,
}

impl From<io::Error> for RecordIoError {
    fn from(e: io::Error) -> Self {
        // Compression errors ride inside io::Error through Read/Write.
        let carries_codec_error = e
            .get_ref()
            .is_some_and(|inner| inner.is::<CompressionError>());
        if !carries_codec_error {
            return RecordIoError::Io(e);
        }

        let kind = e.kind();
        match e.into_inner().map(|inner| inner.downcast::<CompressionError>()) {
            Some(Ok(codec)) => RecordIoError::Decompression(*codec),
            Some(Err(other)) => RecordIoError::Io(io::Error::new(kind, other)),
            None => RecordIoError::Io(io::Error::from(kind)),
        }
    }
}

impl From<CompressionError> for RecordIoError {
    fn from(e: CompressionError) -> Self {
        RecordIoError::Decompression(e)
    }
}

impl From<VarintError> for RecordIoError {
    fn from(e: VarintError) -> Self {
        RecordIoError::MalformedVarint(e)
    }
}

impl From<FrameError> for RecordIoError {
    fn from(e: FrameError) -> Self {
        match e {
            FrameError::Varint(v) => RecordIoError::MalformedVarint(v),
            FrameError::Malformed { length } => RecordIoError::MalformedFrame { length },
            FrameError::Incomplete { expected, actual } => {
                RecordIoError::TruncatedPayload { expected, actual }
            }
            FrameError::TooLarge { len } => RecordIoError::RecordTooLarge { len },
        }
    }
}

pub type Result<T, E = RecordIoError> = std::result::Result<T, E>;
