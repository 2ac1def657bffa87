//! Operations Module
//!
//! The store's operations as plain functions over a [`DocumentStore`].
//! They return structured results and never touch the operation log;
//! recording outcomes is the engine's job.
//!
//! [`DocumentStore`]: crate::storage::DocumentStore

pub mod kv;
pub mod sets;
pub mod merge;
pub mod seed;

pub use merge::{MergeReport, SkippedDocument};
pub use sets::SetOp;
