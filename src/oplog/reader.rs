//! Operation log reader
//!
//! Reads entries back from the operation log file.

use std::fs::File;
use std::io::{BufRead, BufReader, Lines, Read, Seek, SeekFrom};
use std::path::Path;

use super::LogEntry;
use crate::error::Result;

/// Reads entries from the operation log
pub struct OpLogReader {
    lines: Lines<BufReader<File>>,
}

impl OpLogReader {
    /// Open a log file for reading
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self {
            lines: BufReader::new(file).lines(),
        })
    }

    /// Read the next well-formed entry, skipping malformed lines
    pub fn next_entry(&mut self) -> Result<Option<LogEntry>> {
        for line in self.lines.by_ref() {
            let line = line?;
            match LogEntry::parse_line(&line) {
                Some(entry) => return Ok(Some(entry)),
                None => tracing::debug!("Skipping malformed log line: {:?}", line),
            }
        }
        Ok(None)
    }

    /// Iterate over all well-formed entries
    ///
    /// Stops at the first I/O error.
    pub fn entries(self) -> OpLogIterator {
        OpLogIterator { reader: self }
    }

    /// Find the last well-formed entry without reading the whole log
    ///
    /// Scans backwards from the end of the file in growing windows until a
    /// complete, parseable line turns up or the start of the file is reached.
    pub fn last_entry(path: &Path) -> Result<Option<LogEntry>> {
        const INITIAL_WINDOW: u64 = 4096;

        let mut file = File::open(path)?;
        let len = file.metadata()?.len();
        let mut window = INITIAL_WINDOW;

        loop {
            let start = len.saturating_sub(window);
            file.seek(SeekFrom::Start(start))?;

            let mut tail = Vec::with_capacity((len - start) as usize);
            file.read_to_end(&mut tail)?;
            let text = String::from_utf8_lossy(&tail);

            // The first line of a window that starts mid-file may be cut off
            let mut lines: Vec<&str> = text.lines().collect();
            if start > 0 && !lines.is_empty() {
                lines.remove(0);
            }

            if let Some(entry) = lines.iter().rev().find_map(|line| LogEntry::parse_line(line)) {
                return Ok(Some(entry));
            }
            if start == 0 {
                return Ok(None);
            }
            window = window.saturating_mul(2);
        }
    }

    /// Read every well-formed entry into memory
    pub fn read_all(path: &Path) -> Result<Vec<LogEntry>> {
        let mut reader = Self::open(path)?;
        let mut entries = Vec::new();
        while let Some(entry) = reader.next_entry()? {
            entries.push(entry);
        }
        Ok(entries)
    }
}

/// Iterator over log entries
pub struct OpLogIterator {
    reader: OpLogReader,
}

impl Iterator for OpLogIterator {
    type Item = LogEntry;

    fn next(&mut self) -> Option<Self::Item> {
        match self.reader.next_entry() {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Stopped reading operation log: {}", e);
                None
            }
        }
    }
}
