//! telemetry/counters.rs
//! Counters updated as frames cross a reader or writer.
use std::ops::AddAssign;

use serde::{Deserialize, Serialize};

/// Deterministic counters collected during stream processing.
#[derive(Default, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamCounters {
    pub records: u64,
    pub terminators: u64,
    pub bytes_payload: u64,
    /// Length prefix bytes, terminator included.
    pub bytes_prefix: u64,
}

impl StreamCounters {
    /// Record one data frame.
    ///
    /// - `payload_len`: payload bytes
    /// - `prefix_len`: encoded varint length prefix
    pub fn add_record(&mut self, payload_len: usize, prefix_len: usize) {
        self.records += 1;
        self.bytes_payload += payload_len as u64;
        self.bytes_prefix += prefix_len as u64;
    }

    /// Mark the terminator frame processed.
    pub fn add_terminator(&mut self, prefix_len: usize) {
        self.terminators += 1;
        self.bytes_prefix += prefix_len as u64;
    }

    /// Bytes spent on framing rather than payload.
    pub fn framing_overhead_bytes(&self) -> u64 {
        self.bytes_prefix
    }

    /// Size of the uncompressed stream seen so far.
    pub fn stream_bytes(&self) -> u64 {
        self.bytes_payload + self.bytes_prefix
    }

    pub fn merge(&mut self, other: &StreamCounters) {
        self.records += other.records;
        self.terminators += other.terminators;
        self.bytes_payload += other.bytes_payload;
        self.bytes_prefix += other.bytes_prefix;
    }
}

impl AddAssign for StreamCounters {
    fn add_assign(&mut self, rhs: Self) {
        self.merge(&rhs);
    }
}
