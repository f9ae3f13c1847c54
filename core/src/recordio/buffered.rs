//! Collect messages from many threads, write them out once.

use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use tracing::debug;

use crate::config::WriterOptions;
use crate::recordio::writer::StreamWriter;
use crate::telemetry::StreamCounters;
use crate::types::RecordIoError;

/// Thread-safe message collector.
///
/// `write` only appends to an in-memory list; nothing touches the file until
/// `close`, which writes every message in insertion order through a regular
/// [`StreamWriter`]. Defaults to the gzip transport.
pub struct BufferedRecordWriter<T> {
    path: PathBuf,
    options: WriterOptions,
    records: Mutex<Vec<T>>,
}

impl<T: Serialize> BufferedRecordWriter<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_options(path, WriterOptions::compressed(true))
    }

    pub fn with_options(path: impl Into<PathBuf>, options: WriterOptions) -> Self {
        Self { path: path.into(), options, records: Mutex::new(Vec::new()) }
    }

    pub fn write(&self, message: T) {
        self.lock().push(message);
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn close(self) -> Result<StreamCounters, RecordIoError> {
        let records = self.records.into_inner().unwrap_or_else(PoisonError::into_inner);

        let mut writer = StreamWriter::create(&self.path, &self.options)?;
        for record in &records {
            writer.write_message(record)?;
        }
        let counters = writer.close()?;
        debug!(path = %self.path.display(), records = counters.records, "buffered records flushed");
        Ok(counters)
    }

    // A panic in another writer thread cannot leave the Vec half-pushed.
    fn lock(&self) -> MutexGuard<'_, Vec<T>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
