//! Engine Module
//!
//! The store facade that ties documents, operations and the operation log
//! together.
//!
//! ## Responsibilities
//! - Own the document directory and the operation log
//! - Run each operation and record exactly one log entry for it
//! - Hand the structured outcome back to the caller
//!
//! Callers that only care about the log may ignore the returned `Result`;
//! failures are already recorded by the time it is returned.

use std::path::Path;

use serde_json::Value;

use crate::command::{Command, Reply};
use crate::config::Config;
use crate::error::{Result, StoreError};
use crate::ops::{self, MergeReport, SetOp};
use crate::oplog::OpLog;
use crate::storage::{display_value, validate_name, Document, DocumentStore};

/// The main store engine
///
/// ## Concurrency Model
///
/// - Every method takes `&self`; the engine is `Send + Sync`
/// - Log appends are serialized inside [`OpLog`], so entries keep call order
/// - Document read-modify-write cycles are not isolated from each other:
///   a racing `set` and `remove` on one document can lose an update
pub struct Engine {
    /// Engine configuration
    config: Config,

    /// Document file accessor
    documents: DocumentStore,

    /// Append-only operation log
    log: OpLog,
}

impl Engine {
    /// Open or create a store with the given config
    ///
    /// On startup:
    /// 1. Validate the configured file names
    /// 2. Create the store directory if needed
    /// 3. Open the operation log for appending
    pub fn open(config: Config) -> Result<Self> {
        for name in [&config.log_file, &config.merge_output] {
            validate_name(name).map_err(|_| {
                StoreError::Config(format!("{:?} is not a plain file name", name))
            })?;
        }
        if config.log_file == config.merge_output {
            return Err(StoreError::Config(
                "log file and merge output must differ".to_string(),
            ));
        }

        let documents = DocumentStore::open(&config.store_dir, config.pretty)?;
        let log = OpLog::open(&config.log_path())?;

        tracing::debug!("Opened store at {}", config.store_dir.display());

        Ok(Self {
            config,
            documents,
            log,
        })
    }

    /// Open with a path (convenience method)
    ///
    /// Uses default config with the specified store directory
    pub fn open_path(path: &Path) -> Result<Self> {
        Self::open(Config::builder().store_dir(path).build())
    }

    /// Execute a command
    ///
    /// Routes commands to the matching operation
    pub fn execute(&self, command: Command) -> Result<Reply> {
        tracing::trace!("Executing {:?}", command.command_type());

        match command {
            Command::Get { file, key } => self.get(&file, &key).map(Reply::Value),
            Command::Set { file, key, value } => {
                self.set(&file, &key, value)?;
                Ok(Reply::Done)
            }
            Command::Remove { file, key } => self.remove(&file, &key).map(Reply::Value),
            Command::Create { file } => {
                self.create_file(&file)?;
                Ok(Reply::Done)
            }
            Command::Delete { file } => {
                self.delete_file(&file)?;
                Ok(Reply::Done)
            }
            Command::Keys { op, a, b } => self.keys(op, &a, &b).map(Reply::Names),
            Command::Merge => self.merge_data().map(Reply::Merged),
            Command::Reset => self.reset().map(Reply::Count),
            Command::Show { file } => self.read_document(&file).map(Reply::Document),
            Command::List => self.list_documents().map(Reply::Names),
        }
    }

    // =========================================================================
    // Key-Value Operations
    // =========================================================================

    /// Get the value stored under `key` in `file`
    pub fn get(&self, file: &str, key: &str) -> Result<Value> {
        let result = ops::kv::get(&self.documents, file, key);
        self.record(result, |value| {
            format!("Got {} from {}", display_value(value), file)
        })
    }

    /// Set `key` to `value` in an existing document
    pub fn set(&self, file: &str, key: &str, value: impl Into<Value>) -> Result<()> {
        let value = value.into();
        let message = format!("Set {} for {} in {}", display_value(&value), key, file);

        let result = self
            .ensure_mutable(file)
            .and_then(|()| ops::kv::set(&self.documents, file, key, value))
            .map(|_| ());
        self.record(result, |_| message)
    }

    /// Remove `key` from an existing document, returning its last value
    pub fn remove(&self, file: &str, key: &str) -> Result<Value> {
        let result = self
            .ensure_mutable(file)
            .and_then(|()| ops::kv::remove(&self.documents, file, key));
        self.record(result, |_| format!("Removed {} from {}", key, file))
    }

    // =========================================================================
    // Document Operations
    // =========================================================================

    /// Whether a document exists (not logged)
    pub fn exists(&self, file: &str) -> bool {
        self.documents.exists(file)
    }

    /// Create a document holding an empty object
    ///
    /// An existing document is left untouched and `AlreadyExists` is logged.
    /// The log and merge output names are refused with `InvalidName`, as in
    /// `delete_file`, `set` and `remove`.
    pub fn create_file(&self, file: &str) -> Result<()> {
        let result = self
            .ensure_mutable(file)
            .and_then(|()| self.documents.create(file));
        self.record(result, |_| format!("{} successfully created", file))
    }

    /// Delete a document
    pub fn delete_file(&self, file: &str) -> Result<()> {
        let result = self
            .ensure_mutable(file)
            .and_then(|()| self.documents.delete(file));
        self.record(result, |_| format!("{} successfully deleted", file))
    }

    /// Read a whole document
    pub fn read_document(&self, file: &str) -> Result<Document> {
        let result = self.documents.read_document(file);
        self.record(result, |_| format!("Read {}", file))
    }

    /// List the `.json` documents in the store, minus excluded files
    pub fn list_documents(&self) -> Result<Vec<String>> {
        let result = self.documents.list(&self.config.unlisted_files());
        self.record(result, |names| format!("Listed {} documents", names.len()))
    }

    // =========================================================================
    // Set Operations
    // =========================================================================

    /// Keys present in either document
    pub fn union(&self, a: &str, b: &str) -> Result<Vec<String>> {
        self.keys(SetOp::Union, a, b)
    }

    /// Keys present in both documents
    pub fn intersect(&self, a: &str, b: &str) -> Result<Vec<String>> {
        self.keys(SetOp::Intersect, a, b)
    }

    /// Keys present in exactly one of the documents
    pub fn difference(&self, a: &str, b: &str) -> Result<Vec<String>> {
        self.keys(SetOp::Difference, a, b)
    }

    /// Evaluate any key-set operation
    pub fn keys(&self, op: SetOp, a: &str, b: &str) -> Result<Vec<String>> {
        let result = ops::sets::evaluate(&self.documents, op, a, b);
        self.record(result, |keys| {
            format!("{} of {} and {}: {}", op, a, b, render_list(keys))
        })
    }

    // =========================================================================
    // Aggregate Operations
    // =========================================================================

    /// Merge every document into the configured output document
    pub fn merge_data(&self) -> Result<MergeReport> {
        let result = ops::merge::merge(&self.documents, &self.config);
        self.record(result, |report| {
            let mut message = format!(
                "Merged {} documents into {}",
                report.merged.len(),
                report.output
            );
            if !report.skipped.is_empty() {
                message.push_str(&format!(", skipped {}", report.skipped.len()));
            }
            message
        })
    }

    /// Rewrite the seed documents and start a fresh log
    ///
    /// Returns the number of seed documents written.
    pub fn reset(&self) -> Result<usize> {
        let result = ops::seed::write_seeds(&self.documents).and_then(|count| {
            self.log.truncate()?;
            Ok(count)
        });
        self.record(result, |count| {
            format!("Reset store with {} seed documents", count)
        })
    }

    /// Close the engine gracefully
    ///
    /// Syncs the operation log to disk
    pub fn close(self) -> Result<()> {
        self.log.sync()
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the store directory path
    pub fn store_dir(&self) -> &Path {
        &self.config.store_dir
    }

    /// Get the operation log
    pub fn oplog(&self) -> &OpLog {
        &self.log
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Refuse names the store manages itself
    fn ensure_mutable(&self, file: &str) -> Result<()> {
        if self.config.is_reserved(file) {
            return Err(StoreError::InvalidName(file.to_string()));
        }
        Ok(())
    }

    /// Append one log entry describing `result`, then hand it back
    fn record<T>(&self, result: Result<T>, describe: impl FnOnce(&T) -> String) -> Result<T> {
        match &result {
            Ok(value) => {
                self.log.append(describe(value));
            }
            Err(e) => {
                tracing::debug!("Operation failed: {}", e);
                self.log.append(format!("Error: {}", e));
            }
        }
        result
    }
}

/// Render key names as a JSON array
fn render_list(keys: &[String]) -> String {
    serde_json::to_string(keys).unwrap_or_else(|_| format!("{:?}", keys))
}
