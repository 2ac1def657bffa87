//! # jsonkv
//!
//! A minimal key-value store over plain JSON documents with:
//! - One JSON object per file, addressed by file name
//! - Key-level get/set/remove inside a document
//! - Key-set union/intersection/difference between two documents
//! - Merging every document into one composite object
//! - An append-only, timestamped log of every operation
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 CLI  /  Command values                       │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                      Engine                                  │
//! │        (runs an operation, records one log entry)            │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │     ops     │          │    OpLog    │
//!   │ kv/sets/... │          │  (Append)   │
//!   └──────┬──────┘          └─────────────┘
//!          │
//!          ▼
//!   ┌─────────────┐
//!   │  Documents  │
//!   │ (JSON files)│
//!   └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod oplog;
pub mod storage;
pub mod ops;
pub mod command;
pub mod engine;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{ErrorKind, Result, StoreError};
pub use config::{Config, MergePolicy};
pub use command::{Command, Reply};
pub use engine::Engine;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of jsonkv
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
