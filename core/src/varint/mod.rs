//! Variable-length integer codec for frame length prefixes.
//!
//! Responsibilities:
//! - Encode a signed 32-bit length as a little-endian base-128 varint
//! - Decode it back one byte at a time, rejecting overlong input
//!
//! Negative values are encoded from their two's-complement bit pattern
//! (protobuf `int32` via `uint32`), not zig-zag. `-1` therefore always takes
//! the full 5 bytes.
//!
//! Non-responsibilities:
//! - Deciding what a negative length means (see `recordio::framing`)
//! - IO

pub mod types;
pub mod encode;
pub mod decode;

pub use types::VarintError;
pub use encode::{encode_varint32, put_varint32, varint32_len};
pub use decode::{decode_varint32, VarintDecoder};
