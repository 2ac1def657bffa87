//! Operation log writer
//!
//! Handles appending entries to the operation log file.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use super::entry::now_millis;
use super::{LogEntry, OpLogReader};
use crate::error::Result;

/// Appends entries to the operation log
///
/// ## Concurrency:
/// - `state`: Mutex around the file handle and the last timestamp, so two
///   appends never interleave and timestamps follow append order
/// - All methods use `&self`
pub struct OpLog {
    /// Location of the log file
    path: PathBuf,

    /// Open handle plus ordering state
    state: Mutex<LogState>,
}

struct LogState {
    file: File,

    /// Timestamp of the most recent append (unix millis)
    last_timestamp: u64,
}

impl OpLog {
    /// Open or create the log file in append mode
    ///
    /// An existing log is continued; its last timestamp seeds the ordering
    /// so entries written by this instance never sort before older ones.
    pub fn open(path: &Path) -> Result<Self> {
        let last_timestamp = if path.exists() {
            OpLogReader::last_entry(path)?
                .map(|entry| entry.timestamp)
                .unwrap_or(0)
        } else {
            0
        };

        let file = OpenOptions::new().create(true).append(true).open(path)?;

        Ok(Self {
            path: path.to_path_buf(),
            state: Mutex::new(LogState {
                file,
                last_timestamp,
            }),
        })
    }

    /// Append a message and return the entry that was recorded
    ///
    /// A failed write is reported through `tracing` and otherwise ignored;
    /// logging never aborts the operation being logged.
    pub fn append(&self, message: impl Into<String>) -> LogEntry {
        let mut state = self.state.lock();

        let timestamp = now_millis().max(state.last_timestamp);
        state.last_timestamp = timestamp;

        let entry = LogEntry::new(message, timestamp);
        if let Err(e) = state.file.write_all(entry.to_line().as_bytes()) {
            tracing::warn!("Failed to append to {}: {}", self.path.display(), e);
        }

        entry
    }

    /// Force buffered entries to disk
    pub fn sync(&self) -> Result<()> {
        let mut state = self.state.lock();
        state.file.flush()?;
        state.file.sync_data()?;
        Ok(())
    }

    /// Discard every entry, keeping the file
    pub fn truncate(&self) -> Result<()> {
        let state = self.state.lock();
        state.file.set_len(0)?;
        state.file.sync_all()?;
        Ok(())
    }

    /// Get the log file path
    pub fn path(&self) -> &Path {
        &self.path
    }
}
