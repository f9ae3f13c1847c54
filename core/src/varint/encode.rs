use bytes::BufMut;

use crate::constants::MAX_VARINT32_LEN;

const CONTINUATION: u8 = 0x80;
const PAYLOAD_MASK: u32 = 0x7f;

/// Append `value` to `buf` as a base-128 varint, low group first.
///
/// Returns the number of bytes written (1..=5).
pub fn put_varint32(buf: &mut impl BufMut, value: i32) -> usize {
    let mut bits = value as u32;
    let mut written = 0;

    loop {
        let mut byte = (bits & PAYLOAD_MASK) as u8;
        bits >>= 7;

        if bits != 0 {
            byte |= CONTINUATION;
        }

        buf.put_u8(byte);
        written += 1;

        if bits == 0 {
            return written;
        }
    }
}

/// Encode into a fresh buffer.
pub fn encode_varint32(value: i32) -> Vec<u8> {
    let mut out = Vec::with_capacity(MAX_VARINT32_LEN);
    put_varint32(&mut out, value);
    out
}

/// Encoded size of `value` without writing it.
#[inline]
pub const fn varint32_len(value: i32) -> usize {
    let bits = value as u32;
    match bits {
        0..=0x7f => 1,
        0x80..=0x3fff => 2,
        0x4000..=0x1f_ffff => 3,
        0x20_0000..=0x0fff_ffff => 4,
        _ => 5,
    }
}
