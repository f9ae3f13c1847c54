//! Wire framing for record streams.
//!
//! Responsibilities:
//! - Map payload lengths to frame length prefixes and back
//! - Model the `-1` sentinel as `Frame::End` so callers never see it as a length
//! - Encode/decode frames held entirely in memory
//!
//! Non-responsibilities:
//! - Compression
//! - IO (see `recordio::reader` / `recordio::writer`)

pub mod types;
pub mod encode;
pub mod decode;

pub use types::{Frame, FrameError};
pub use encode::{encode_frame, encode_record, encode_terminator, frame_length};
pub use decode::{classify_length, decode_frame, decode_stream};
