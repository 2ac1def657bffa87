//! Seed documents for a demo store

use serde_json::{json, Value};

use crate::error::Result;
use crate::storage::DocumentStore;

/// The fixed documents a reset writes
pub fn seed_documents() -> Vec<(&'static str, Value)> {
    vec![
        (
            "scott.json",
            json!({
                "firstname": "Scott",
                "lastname": "Roberts",
                "email": "sroberts@talentpath.com",
                "username": "scoot"
            }),
        ),
        (
            "andrew.json",
            json!({
                "firstname": "Andrew",
                "lastname": "Maney",
                "email": "amaney@talentpath.com"
            }),
        ),
        (
            "post.json",
            json!({
                "title": "Async/Await lesson",
                "description": "How to write asynchronous JavaScript",
                "date": "July 15, 2019"
            }),
        ),
    ]
}

/// (Re)write every seed document, returning how many were written
///
/// Other documents in the store are left alone.
pub fn write_seeds(store: &DocumentStore) -> Result<usize> {
    let seeds = seed_documents();
    for (name, value) in &seeds {
        store.write(name, value)?;
    }
    Ok(seeds.len())
}
