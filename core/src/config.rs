//! Stream options.
//!
//! The transport is not recorded in the file, so readers and writers must be
//! configured with the same `Transport` out of band.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_BLOCK_SIZE, DEFAULT_BUFFER_SIZE, DEFAULT_GZIP_LEVEL, MAX_BLOCK_SIZE, MAX_GZIP_LEVEL,
};
use crate::types::RecordIoError;

/// Byte transport underneath the frames.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transport {
    #[default]
    Raw,
    Gzip,
}

impl Transport {
    pub fn from_compressed(compressed: bool) -> Self {
        if compressed {
            Transport::Gzip
        } else {
            Transport::Raw
        }
    }

    pub fn is_compressed(self) -> bool {
        self == Transport::Gzip
    }
}

/// What a reader does when the source ends cleanly at a frame boundary
/// before any terminator was seen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EofPolicy {
    /// Report `MissingTerminator`.
    #[default]
    Strict,
    /// Treat the clean EOF as end-of-stream.
    Lenient,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriterOptions {
    pub transport: Transport,
    /// gzip level 0-9, ignored for `Transport::Raw`.
    pub level: u32,
    /// Continue a cleanly closed raw stream instead of truncating it.
    pub append: bool,
    /// Capacity of the buffer in front of file sinks.
    pub buffer_size: usize,
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self {
            transport: Transport::Raw,
            level: DEFAULT_GZIP_LEVEL,
            append: false,
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

impl WriterOptions {
    pub fn compressed(compressed: bool) -> Self {
        Self { transport: Transport::from_compressed(compressed), ..Self::default() }
    }

    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    pub fn with_append(mut self, append: bool) -> Self {
        self.append = append;
        self
    }

    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size;
        self
    }

    pub fn validate(&self) -> Result<(), RecordIoError> {
        if self.level > MAX_GZIP_LEVEL {
            return Err(RecordIoError::InvalidConfig(format!(
                "gzip level {} out of range 0..={}",
                self.level, MAX_GZIP_LEVEL
            )));
        }
        if self.append && self.transport.is_compressed() {
            return Err(RecordIoError::InvalidConfig(
                "append is only supported for the raw transport".into(),
            ));
        }
        if self.buffer_size == 0 {
            return Err(RecordIoError::InvalidConfig("buffer_size must be > 0".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderOptions {
    pub transport: Transport,
    /// Raw bytes pulled per decompression step.
    pub block_size: usize,
    pub eof_policy: EofPolicy,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            transport: Transport::Raw,
            block_size: DEFAULT_BLOCK_SIZE,
            eof_policy: EofPolicy::Strict,
        }
    }
}

impl ReaderOptions {
    pub fn compressed(compressed: bool) -> Self {
        Self { transport: Transport::from_compressed(compressed), ..Self::default() }
    }

    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size;
        self
    }

    pub fn with_eof_policy(mut self, eof_policy: EofPolicy) -> Self {
        self.eof_policy = eof_policy;
        self
    }

    pub fn lenient(self) -> Self {
        self.with_eof_policy(EofPolicy::Lenient)
    }

    pub fn validate(&self) -> Result<(), RecordIoError> {
        if self.block_size == 0 || self.block_size > MAX_BLOCK_SIZE {
            return Err(RecordIoError::InvalidConfig(format!(
                "block_size {} out of range 1..={}",
                self.block_size, MAX_BLOCK_SIZE
            )));
        }
        Ok(())
    }
}
