//! Document helpers
//!
//! A document is a JSON object; these helpers turn raw values into
//! documents and render values for the operation log.

use serde_json::{Map, Value};

use crate::error::{Result, StoreError};

/// The in-memory form of a document: an insertion-ordered JSON object
pub type Document = Map<String, Value>;

/// Require a parsed value to be a JSON object
pub fn into_object(name: &str, value: Value) -> Result<Document> {
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(StoreError::NotAnObject(name.to_string())),
    }
}

/// Render a value the way a person reads it in the log
///
/// Strings are shown without quotes; everything else as compact JSON.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Check that a document name is a plain file name
///
/// Rejects empty names, `.`/`..`, and anything with a path separator, so a
/// name can never address a file outside the store directory.
pub fn validate_name(name: &str) -> Result<()> {
    let invalid = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\', '\0']);

    if invalid {
        return Err(StoreError::InvalidName(name.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_validate_name() {
        assert!(validate_name("scott.json").is_ok());
        assert!(validate_name("notes").is_ok());

        for bad in ["", ".", "..", "../etc/passwd", "a/b.json", "a\\b.json"] {
            assert!(validate_name(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn test_display_value() {
        assert_eq!(display_value(&json!("scoot")), "scoot");
        assert_eq!(display_value(&json!(42)), "42");
        assert_eq!(display_value(&json!(null)), "null");
        assert_eq!(display_value(&json!({"a": [1, 2]})), r#"{"a":[1,2]}"#);
    }

    #[test]
    fn test_into_object_rejects_arrays() {
        assert!(into_object("a.json", json!({"k": 1})).is_ok());
        let err = into_object("a.json", json!([1, 2])).unwrap_err();
        assert!(matches!(err, StoreError::NotAnObject(ref n) if n == "a.json"));
    }
}
