//! compression/mod.rs
//! Streaming gzip transport for record streams.
//!
//! Notes:
//! - One wire format: gzip header + deflate blocks + gzip trailer, i.e. what
//!   zlib produces with window bits `16 + MAX_WBITS`.
//! - The decoding half is pull-based and buffers decompressed bytes until a
//!   request can be served; the encoding half is push-based.
//! - Corrupt input is reported as `CompressionError`, kept apart from IO
//!   failures of the underlying source.

pub mod constants;
pub mod types;
pub mod decode;
pub mod encode;

pub use constants::*;
pub use types::*;
pub use decode::GzipSource;
pub use encode::GzipSink;
