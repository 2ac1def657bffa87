//! Storage Module
//!
//! File-backed persistence for JSON documents.
//!
//! ## Responsibilities
//! - Map document names to files inside the store directory
//! - Read and parse documents, distinguishing "missing" from "malformed"
//! - Replace documents whole, never leaving a half-written file behind
//! - Create and delete documents with explicit existence checks
//!
//! ## Layout
//! ```text
//! {store_dir}/
//!   ├── scott.json     {"firstname": "Scott", ...}
//!   ├── post.json      {"title": "...", ...}
//!   └── ...
//! ```

mod document;
mod manager;

pub use document::{display_value, into_object, validate_name, Document};
pub use manager::DocumentStore;
