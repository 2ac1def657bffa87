//! Set operations over the key sets of two documents
//!
//! Results are deduplicated by construction (object keys are unique) and
//! ordered deterministically: keys of the first document in their stored
//! order, then keys only the second document has.

use std::collections::HashSet;
use std::fmt;

use crate::error::Result;
use crate::storage::{Document, DocumentStore};

/// Which key-set operation to evaluate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOp {
    /// Keys present in either document
    Union,

    /// Keys present in both documents
    Intersect,

    /// Keys present in exactly one of the documents
    Difference,
}

impl SetOp {
    /// Apply the operation to two parsed documents
    pub fn apply(self, a: &Document, b: &Document) -> Vec<String> {
        match self {
            SetOp::Union => union(a, b),
            SetOp::Intersect => intersect(a, b),
            SetOp::Difference => difference(a, b),
        }
    }
}

impl fmt::Display for SetOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SetOp::Union => "Union",
            SetOp::Intersect => "Intersection",
            SetOp::Difference => "Difference",
        };
        f.write_str(label)
    }
}

/// Read both documents and evaluate `op` over their keys
pub fn evaluate(store: &DocumentStore, op: SetOp, a: &str, b: &str) -> Result<Vec<String>> {
    let doc_a = store.read_document(a)?;
    let doc_b = store.read_document(b)?;
    Ok(op.apply(&doc_a, &doc_b))
}

pub fn union(a: &Document, b: &Document) -> Vec<String> {
    a.keys()
        .chain(b.keys().filter(|key| !a.contains_key(*key)))
        .cloned()
        .collect()
}

pub fn intersect(a: &Document, b: &Document) -> Vec<String> {
    a.keys().filter(|key| b.contains_key(*key)).cloned().collect()
}

/// Symmetric difference
pub fn difference(a: &Document, b: &Document) -> Vec<String> {
    let shared: HashSet<&String> = a.keys().filter(|key| b.contains_key(*key)).collect();

    a.keys()
        .chain(b.keys())
        .filter(|key| !shared.contains(key))
        .cloned()
        .collect()
}
