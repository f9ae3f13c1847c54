use bytes::Bytes;

use crate::constants::TERMINATOR_LEN;
use crate::recordio::framing::types::{Frame, FrameError};
use crate::varint::decode_varint32;

/// Interpret a decoded length prefix.
///
/// `Ok(None)` is the terminator; any other negative value is malformed.
#[inline]
pub fn classify_length(length: i32) -> Result<Option<usize>, FrameError> {
    match length {
        TERMINATOR_LEN => Ok(None),
        l if l < 0 => Err(FrameError::Malformed { length: l }),
        l => Ok(Some(l as usize)),
    }
}

/// Decode a single frame from the front of `wire`.
///
/// Returns the frame and the number of bytes it occupied; bytes after it are
/// left for the caller.
pub fn decode_frame(wire: &[u8]) -> Result<(Frame, usize), FrameError> {
    let (length, prefix_len) = decode_varint32(wire)?;

    let Some(len) = classify_length(length)? else {
        return Ok((Frame::End, prefix_len));
    };

    let body = &wire[prefix_len..];
    if body.len() < len {
        return Err(FrameError::Incomplete { expected: len, actual: body.len() });
    }

    let payload = Bytes::copy_from_slice(&body[..len]);
    Ok((Frame::Record(payload), prefix_len + len))
}

/// Decode a complete in-memory stream up to and including its terminator.
///
/// Returns the payloads in order and the bytes consumed.
pub fn decode_stream(wire: &[u8]) -> Result<(Vec<Bytes>, usize), FrameError> {
    let mut records = Vec::new();
    let mut off = 0;

    loop {
        match decode_frame(&wire[off..])? {
            (Frame::Record(payload), used) => {
                records.push(payload);
                off += used;
            }
            (Frame::End, used) => return Ok((records, off + used)),
        }
    }
}
