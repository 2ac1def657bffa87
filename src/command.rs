//! Command definitions
//!
//! Every store operation as a value, plus the reply each one produces.
//! Front ends build a [`Command`] and hand it to [`Engine::execute`].
//!
//! [`Engine::execute`]: crate::Engine::execute

use serde_json::Value;

use crate::ops::{MergeReport, SetOp};
use crate::storage::Document;

/// Command types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandType {
    Get,
    Set,
    Remove,
    Create,
    Delete,
    Union,
    Intersect,
    Difference,
    Merge,
    Reset,
    Show,
    List,
}

/// A store command
#[derive(Debug, Clone)]
pub enum Command {
    /// Read one key from a document
    Get { file: String, key: String },

    /// Insert or overwrite one key in an existing document
    Set { file: String, key: String, value: Value },

    /// Delete one key from an existing document
    Remove { file: String, key: String },

    /// Create a document holding `{}`
    Create { file: String },

    /// Delete a document
    Delete { file: String },

    /// Key-set operation over two documents
    Keys { op: SetOp, a: String, b: String },

    /// Merge every document into the composite output
    Merge,

    /// Rewrite the seed documents and truncate the log
    Reset,

    /// Read a whole document
    Show { file: String },

    /// List documents
    List,
}

impl Command {
    /// Get the command type
    pub fn command_type(&self) -> CommandType {
        match self {
            Command::Get { .. } => CommandType::Get,
            Command::Set { .. } => CommandType::Set,
            Command::Remove { .. } => CommandType::Remove,
            Command::Create { .. } => CommandType::Create,
            Command::Delete { .. } => CommandType::Delete,
            Command::Keys { op, .. } => match op {
                SetOp::Union => CommandType::Union,
                SetOp::Intersect => CommandType::Intersect,
                SetOp::Difference => CommandType::Difference,
            },
            Command::Merge => CommandType::Merge,
            Command::Reset => CommandType::Reset,
            Command::Show { .. } => CommandType::Show,
            Command::List => CommandType::List,
        }
    }
}

/// Successful result of a command
#[derive(Debug, Clone)]
pub enum Reply {
    /// A single value (get, and the removed value for remove)
    Value(Value),

    /// A whole document (show)
    Document(Document),

    /// Key names (set operations) or document names (list)
    Names(Vec<String>),

    /// Merge outcome
    Merged(MergeReport),

    /// Count of documents written (reset)
    Count(usize),

    /// Completed with nothing to return
    Done,
}
