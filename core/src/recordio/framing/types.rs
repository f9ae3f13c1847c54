use bytes::Bytes;
use thiserror::Error;

use crate::constants::TERMINATOR_LEN;
use crate::recordio::framing::encode::frame_length;
use crate::varint::{varint32_len, VarintError};

/// One decoded frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    /// A payload, possibly empty.
    Record(Bytes),
    /// The terminator: the writer closed the stream here.
    End,
}

impl Frame {
    pub fn record(payload: impl Into<Bytes>) -> Self {
        Frame::Record(payload.into())
    }

    #[inline]
    pub fn is_end(&self) -> bool {
        matches!(self, Frame::End)
    }

    pub fn into_record(self) -> Option<Bytes> {
        match self {
            Frame::Record(payload) => Some(payload),
            Frame::End => None,
        }
    }

    /// Length field as it appears on the wire.
    ///
    /// Payloads longer than `i32::MAX` have no wire length.
    pub fn wire_length(&self) -> Result<i32, FrameError> {
        match self {
            Frame::Record(payload) => frame_length(payload.len()),
            Frame::End => Ok(TERMINATOR_LEN),
        }
    }

    /// Total encoded size: prefix plus payload.
    pub fn wire_len(&self) -> Result<usize, FrameError> {
        let payload_len = match self {
            Frame::Record(payload) => payload.len(),
            Frame::End => 0,
        };
        Ok(varint32_len(self.wire_length()?) + payload_len)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameError {
    #[error("invalid length prefix: {0}")]
    Varint(#[from] VarintError),

    /// Negative length other than the terminator.
    #[error("malformed frame: length {length}")]
    Malformed { length: i32 },

    /// Fewer payload bytes than the prefix announced.
    #[error("incomplete frame: expected {expected} payload bytes, got {actual}")]
    Incomplete { expected: usize, actual: usize },

    #[error("payload of {len} bytes does not fit a frame length")]
    TooLarge { len: usize },
}
