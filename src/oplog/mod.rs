//! Operation Log Module
//!
//! Append-only, timestamped record of every store operation.
//!
//! ## Responsibilities
//! - Append exactly one line per operation, in call order
//! - Keep timestamps non-decreasing even if the wall clock steps back
//! - Never fail the calling operation because the log could not be written
//!
//! ## File Format
//! ```text
//! <message> <epoch-ms>\n
//! <message> <epoch-ms>\n
//! ...
//! ```
//! The timestamp is always the last space-separated token of a line, so
//! messages may themselves contain spaces.

mod entry;
mod writer;
mod reader;

pub use entry::LogEntry;
pub use writer::OpLog;
pub use reader::OpLogReader;
