use thiserror::Error;

use crate::constants::MAX_VARINT32_LEN;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum VarintError {
    /// More than five bytes carried the continuation flag.
    #[error("varint exceeds {} bytes without terminating", MAX_VARINT32_LEN)]
    Overlong,

    /// Input ended while the continuation flag was still set.
    #[error("varint truncated after {consumed} byte(s)")]
    Truncated { consumed: usize },
}
