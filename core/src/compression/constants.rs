/// gzip member magic (RFC 1952).
pub const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Codec name used in error messages and logs.
pub const GZIP_CODEC: &str = "gzip";
