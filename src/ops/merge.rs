//! Merge aggregation
//!
//! Folds every document into one composite object keyed by file stem and
//! writes it to the configured output document.

use crate::config::{Config, MergePolicy};
use crate::error::{ErrorKind, Result, StoreError};
use crate::storage::{Document, DocumentStore};

/// Outcome of a merge
#[derive(Debug, Clone)]
pub struct MergeReport {
    /// `{ "<file stem>": <parsed contents>, ... }`
    pub composite: Document,

    /// Documents that made it into the composite, in merge order
    pub merged: Vec<String>,

    /// Documents left out under [`MergePolicy::SkipFailures`]
    pub skipped: Vec<SkippedDocument>,

    /// Name of the document the composite was written to
    pub output: String,
}

/// A document the merge could not read
#[derive(Debug, Clone)]
pub struct SkippedDocument {
    pub name: String,
    pub kind: ErrorKind,
    pub reason: String,
}

/// Merge all documents in the store
///
/// The output document, the operation log and `config.excluded_files`
/// are never read.
/// Documents are visited in name order. Under `FailFast` the first
/// unreadable document aborts with `Aggregation` and nothing is written.
pub fn merge(store: &DocumentStore, config: &Config) -> Result<MergeReport> {
    let mut excluded = config.unlisted_files();
    excluded.push(config.merge_output.clone());

    let mut report = MergeReport {
        composite: Document::new(),
        merged: Vec::new(),
        skipped: Vec::new(),
        output: config.merge_output.clone(),
    };

    for name in store.list(&excluded)? {
        let value = match store.read(&name) {
            Ok(value) => value,
            Err(e) => match config.merge_policy {
                MergePolicy::FailFast => {
                    return Err(StoreError::Aggregation {
                        name,
                        source: Box::new(e),
                    });
                }
                MergePolicy::SkipFailures => {
                    tracing::warn!("Leaving {} out of merge: {}", name, e);
                    report.skipped.push(SkippedDocument {
                        kind: e.kind(),
                        reason: e.to_string(),
                        name,
                    });
                    continue;
                }
            },
        };

        let stem = name.strip_suffix(".json").unwrap_or(&name).to_string();
        report.composite.insert(stem, value);
        report.merged.push(name);
    }

    store.write(&config.merge_output, &report.composite)?;
    tracing::debug!(
        "Merged {} documents into {}",
        report.merged.len(),
        report.output
    );

    Ok(report)
}
