//! Typed messages on top of opaque records.
//!
//! A message is serialized with bincode (serde path, standard config) and
//! stored as exactly one record. The framing layer never looks inside.

use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::config::ReaderOptions;
use crate::recordio::io::InputSource;
use crate::recordio::reader::StreamReader;
use crate::types::RecordIoError;

#[inline]
fn bincode_config() -> bincode::config::Configuration {
    bincode::config::standard()
}

pub fn encode_message<T: Serialize>(message: &T) -> Result<Vec<u8>, RecordIoError> {
    Ok(bincode::serde::encode_to_vec(message, bincode_config())?)
}

pub fn decode_message<T: DeserializeOwned>(payload: &[u8]) -> Result<T, RecordIoError> {
    let (message, _) = bincode::serde::decode_from_slice(payload, bincode_config())?;
    Ok(message)
}

/// Read every message of the stream at `path`.
pub fn read_into_vec<T: DeserializeOwned>(
    path: impl AsRef<Path>,
    options: &ReaderOptions,
) -> Result<Vec<T>, RecordIoError> {
    let mut reader = StreamReader::open(InputSource::File(path.as_ref().to_path_buf()), options)?;
    let mut out = Vec::new();
    while let Some(message) = reader.read_message()? {
        out.push(message);
    }
    reader.close()?;
    Ok(out)
}

/// Hand each message to `visit` until it returns `false` or the stream ends.
///
/// Returns how many messages were visited.
pub fn for_each_record<T, F>(
    path: impl AsRef<Path>,
    options: &ReaderOptions,
    mut visit: F,
) -> Result<usize, RecordIoError>
where
    T: DeserializeOwned,
    F: FnMut(T) -> bool,
{
    let mut reader = StreamReader::open(InputSource::File(path.as_ref().to_path_buf()), options)?;
    let mut visited = 0;
    while let Some(message) = reader.read_message()? {
        visited += 1;
        if !visit(message) {
            break;
        }
    }
    reader.close()?;
    Ok(visited)
}
