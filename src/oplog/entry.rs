//! Log entry definitions
//!
//! Defines a single operation log line and its text form.

use std::time::{SystemTime, UNIX_EPOCH};

/// A single entry in the operation log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Human-readable outcome of the operation
    pub message: String,

    /// Timestamp (unix millis) when the entry was appended
    pub timestamp: u64,
}

impl LogEntry {
    pub fn new(message: impl Into<String>, timestamp: u64) -> Self {
        Self {
            message: message.into(),
            timestamp,
        }
    }

    /// Render the entry as a log line, trailing newline included
    ///
    /// Newlines inside the message are flattened to spaces so one entry
    /// always occupies exactly one line.
    pub fn to_line(&self) -> String {
        let message = self.message.replace(['\r', '\n'], " ");
        format!("{} {}\n", message, self.timestamp)
    }

    /// Parse a line produced by [`LogEntry::to_line`]
    ///
    /// Returns `None` for lines without a trailing integer timestamp.
    pub fn parse_line(line: &str) -> Option<Self> {
        let line = line.trim_end_matches(['\r', '\n']);
        let (message, timestamp) = line.rsplit_once(' ')?;
        let timestamp = timestamp.parse().ok()?;
        Some(Self::new(message, timestamp))
    }
}

/// Current wall-clock time in unix millis
pub(crate) fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
