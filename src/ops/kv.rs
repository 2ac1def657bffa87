//! Key-value operations within a single document

use serde_json::Value;

use crate::error::{Result, StoreError};
use crate::storage::{validate_name, DocumentStore};

/// Look up `key` in document `name`
///
/// Only an absent key is `KeyNotFound`; `""`, `false` and `null` are values.
pub fn get(store: &DocumentStore, name: &str, key: &str) -> Result<Value> {
    let document = store.read_document(name)?;

    document
        .get(key)
        .cloned()
        .ok_or_else(|| StoreError::KeyNotFound {
            key: key.to_string(),
            name: name.to_string(),
        })
}

/// Insert or overwrite `key`, returning the previous value if any
///
/// The document must already exist; this never creates one.
pub fn set(store: &DocumentStore, name: &str, key: &str, value: Value) -> Result<Option<Value>> {
    ensure_exists(store, name)?;

    let mut document = store.read_document(name)?;
    let previous = document.insert(key.to_string(), value);
    store.write(name, &document)?;

    Ok(previous)
}

/// Delete `key` from the document entirely, returning its last value
///
/// An absent key is `KeyNotFound` and leaves the file untouched.
pub fn remove(store: &DocumentStore, name: &str, key: &str) -> Result<Value> {
    ensure_exists(store, name)?;

    let mut document = store.read_document(name)?;
    let removed = document
        .shift_remove(key)
        .ok_or_else(|| StoreError::KeyNotFound {
            key: key.to_string(),
            name: name.to_string(),
        })?;
    store.write(name, &document)?;

    Ok(removed)
}

fn ensure_exists(store: &DocumentStore, name: &str) -> Result<()> {
    validate_name(name)?;
    if !store.exists(name) {
        return Err(StoreError::NotFound(name.to_string()));
    }
    Ok(())
}
