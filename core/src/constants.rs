//! Wire constants and defaults shared by every layer.

/// Length value reserved for the end-of-stream frame.
pub const TERMINATOR_LEN: i32 = -1;

/// Canonical wire bytes of the terminator frame (`varint(-1)`).
pub const TERMINATOR_WIRE: [u8; 5] = [0xff, 0xff, 0xff, 0xff, 0x0f];

/// A 32-bit value never needs more than 5 groups of 7 bits.
pub const MAX_VARINT32_LEN: usize = 5;

/// Largest payload a frame length can describe.
pub const MAX_RECORD_LEN: usize = i32::MAX as usize;

/// Raw bytes pulled from the source per decompression step (16 KiB).
pub const DEFAULT_BLOCK_SIZE: usize = 16 * 1024;

/// Block size sanity bound (32 MiB).
pub const MAX_BLOCK_SIZE: usize = 32 * 1024 * 1024;

/// Buffer in front of file sinks and sources (64 KiB).
pub const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

/// zlib's `Z_DEFAULT_COMPRESSION` resolves to level 6.
pub const DEFAULT_GZIP_LEVEL: u32 = 6;
pub const MAX_GZIP_LEVEL: u32 = 9;

/// Payload bytes reserved up front when reading a record; the buffer grows
/// with the bytes actually delivered beyond this.
pub const READ_RESERVE_LIMIT: usize = 64 * 1024;
