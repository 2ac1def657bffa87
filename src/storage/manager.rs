//! Document Store
//!
//! Reads, writes, creates and deletes JSON documents in one directory.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;
use tempfile::NamedTempFile;

use super::document::{into_object, validate_name, Document};
use crate::error::{Result, StoreError};

/// File accessor for documents
///
/// ## Concurrency:
/// - No locking; concurrent writers to one document race and the last
///   rename wins
/// - Each write lands through a rename of a temp file, so readers see
///   either the old or the new content, never a torn file
pub struct DocumentStore {
    /// Directory where documents are stored
    dir: PathBuf,

    /// Pretty-print documents on write
    pretty: bool,
}

impl DocumentStore {
    /// Open or create a document directory
    pub fn open(dir: &Path, pretty: bool) -> Result<Self> {
        fs::create_dir_all(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
            pretty,
        })
    }

    /// Whether a document with exactly this name exists
    ///
    /// Invalid names never exist.
    pub fn exists(&self, name: &str) -> bool {
        match self.path(name) {
            Ok(path) => path.is_file(),
            Err(_) => false,
        }
    }

    /// Read and parse a document as any JSON value
    ///
    /// Content that is not UTF-8 is a `Parse` error like any other bad JSON.
    pub fn read(&self, name: &str) -> Result<Value> {
        let path = self.path(name)?;
        let bytes = fs::read(&path).map_err(|e| Self::map_missing(name, e))?;

        serde_json::from_slice(&bytes).map_err(|source| StoreError::Parse {
            name: name.to_string(),
            source,
        })
    }

    /// Read a document that must hold a JSON object
    pub fn read_document(&self, name: &str) -> Result<Document> {
        into_object(name, self.read(name)?)
    }

    /// Replace a document's content entirely
    ///
    /// The value is serialized to an anonymous temp file in the same
    /// directory, which is then persisted over the target.
    pub fn write<T: Serialize + ?Sized>(&self, name: &str, value: &T) -> Result<()> {
        let path = self.path(name)?;

        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        self.write_contents(tmp.as_file_mut(), value)?;
        tmp.persist(&path).map_err(|e| StoreError::Io(e.error))?;
        Ok(())
    }

    /// Create a document holding an empty object
    ///
    /// Fails with `AlreadyExists` without touching an existing file.
    pub fn create(&self, name: &str) -> Result<()> {
        let path = self.path(name)?;

        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|e| match e.kind() {
                io::ErrorKind::AlreadyExists => StoreError::AlreadyExists(name.to_string()),
                _ => StoreError::Io(e),
            })?;

        let mut writer = BufWriter::new(file);
        writer.write_all(b"{}")?;
        writer.flush()?;
        Ok(())
    }

    /// Delete a document
    pub fn delete(&self, name: &str) -> Result<()> {
        let path = self.path(name)?;
        fs::remove_file(&path).map_err(|e| Self::map_missing(name, e))
    }

    /// List document names ending in `.json`, sorted, minus `excluded`
    pub fn list(&self, excluded: &[String]) -> Result<Vec<String>> {
        let mut names = Vec::new();

        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }

            let name = match entry.file_name().into_string() {
                Ok(name) => name,
                Err(raw) => {
                    tracing::debug!("Skipping non UTF-8 file name {:?}", raw);
                    continue;
                }
            };

            if name.ends_with(".json") && !excluded.iter().any(|x| x == &name) {
                names.push(name);
            }
        }

        names.sort();
        Ok(names)
    }

    /// Get the document directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Resolve a validated name to its path
    fn path(&self, name: &str) -> Result<PathBuf> {
        validate_name(name)?;
        Ok(self.dir.join(name))
    }

    fn write_contents<T: Serialize + ?Sized>(&self, file: &mut File, value: &T) -> Result<()> {
        let mut writer = BufWriter::new(&mut *file);
        let serialized = if self.pretty {
            serde_json::to_writer_pretty(&mut writer, value)
        } else {
            serde_json::to_writer(&mut writer, value)
        };
        serialized.map_err(io::Error::from)?;
        writer.flush()?;
        drop(writer);

        file.sync_all()?;
        Ok(())
    }

    fn map_missing(name: &str, e: io::Error) -> StoreError {
        match e.kind() {
            io::ErrorKind::NotFound => StoreError::NotFound(name.to_string()),
            _ => StoreError::Io(e),
        }
    }
}
