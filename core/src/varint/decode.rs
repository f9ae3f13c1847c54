use crate::constants::MAX_VARINT32_LEN;
use crate::varint::types::VarintError;

/// Push-based varint decoder.
///
/// Feed one byte at a time; `push` yields the value once a byte with the
/// continuation flag clear arrives. Bits beyond the 32nd in the fifth byte are
/// discarded.
#[derive(Debug, Default, Clone, Copy)]
pub struct VarintDecoder {
    value: u32,
    consumed: usize,
}

impl VarintDecoder {
    pub const fn new() -> Self {
        Self { value: 0, consumed: 0 }
    }

    /// Bytes accepted so far.
    #[inline]
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// True once at least one byte has been pushed.
    #[inline]
    pub fn in_progress(&self) -> bool {
        self.consumed > 0
    }

    pub fn push(&mut self, byte: u8) -> Result<Option<i32>, VarintError> {
        if self.consumed == MAX_VARINT32_LEN {
            return Err(VarintError::Overlong);
        }

        let shift = 7 * self.consumed as u32;
        self.value |= ((byte & 0x7f) as u32) << shift;
        self.consumed += 1;

        if byte & 0x80 != 0 {
            if self.consumed == MAX_VARINT32_LEN {
                return Err(VarintError::Overlong);
            }
            return Ok(None);
        }

        // Raw values above 0x7fffffff are negative in two's complement.
        Ok(Some(self.value as i32))
    }

    /// Error to report when the input ends before the varint does.
    pub fn truncated(&self) -> VarintError {
        VarintError::Truncated { consumed: self.consumed }
    }
}

/// Decode one varint from the front of `buf`.
///
/// Returns the value and the number of bytes consumed.
pub fn decode_varint32(buf: &[u8]) -> Result<(i32, usize), VarintError> {
    let mut decoder = VarintDecoder::new();

    for &byte in buf {
        if let Some(value) = decoder.push(byte)? {
            return Ok((value, decoder.consumed()));
        }
    }

    Err(decoder.truncated())
}
