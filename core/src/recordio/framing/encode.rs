use bytes::{BufMut, BytesMut};

use crate::constants::{MAX_RECORD_LEN, TERMINATOR_LEN};
use crate::recordio::framing::types::{Frame, FrameError};
use crate::varint::put_varint32;

/// Length prefix value for a payload of `payload_len` bytes.
#[inline]
pub fn frame_length(payload_len: usize) -> Result<i32, FrameError> {
    if payload_len > MAX_RECORD_LEN {
        return Err(FrameError::TooLarge { len: payload_len });
    }
    Ok(payload_len as i32)
}

/// Append one record frame to `out`.
///
/// Layout:
///
/// ```text
/// [ varint(len) (1-5) ]
/// [ payload (len)     ]
/// ```
pub fn encode_record(payload: &[u8], out: &mut BytesMut) -> Result<usize, FrameError> {
    let length = frame_length(payload.len())?;
    out.reserve(payload.len() + 5);
    let prefix_len = put_varint32(out, length);
    out.put_slice(payload);
    Ok(prefix_len + payload.len())
}

/// Append the terminator frame (`varint(-1)`, no payload).
pub fn encode_terminator(out: &mut BytesMut) -> usize {
    put_varint32(out, TERMINATOR_LEN)
}

/// Append `frame` to `out`, returning the bytes written.
pub fn encode_frame(frame: &Frame, out: &mut BytesMut) -> Result<usize, FrameError> {
    match frame {
        Frame::Record(payload) => encode_record(payload, out),
        Frame::End => Ok(encode_terminator(out)),
    }
}
