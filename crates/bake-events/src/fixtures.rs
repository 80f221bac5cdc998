//! Sample data fixtures for testing.
//!
//! This module provides a ready-made recorded session for other crates to
//! use. Enable the `test-fixtures` feature to access these helpers.
//!
//! # Example
//!
//! ```ignore
//! // In your Cargo.toml:
//! // [dev-dependencies]
//! // bake-events = { path = "../bake-events", features = ["test-fixtures"] }
//!
//! use bake_events::fixtures;
//!
//! let session = fixtures::sample_session();
//! let terminal = fixtures::terminal_snapshot();
//! ```

use crate::StepSnapshot;

/// Returns the sample recorded session from the fixtures file.
///
/// Contains 5 snapshots:
/// - the initial greeting snapshot
/// - a step fetching dry ingredients (all actions executed)
/// - a step with a fridge/wet ingredient (milk)
/// - a step with a failed attempted action (premature bake)
/// - the terminal success snapshot carrying an explicit outcome
pub fn sample_session() -> Vec<StepSnapshot> {
    let jsonl = include_str!("../tests/fixtures/sample_session.jsonl");
    jsonl
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| {
            serde_json::from_str(l)
                .unwrap_or_else(|e| panic!("Failed to parse snapshot line: {}\nError: {}", l, e))
        })
        .collect()
}

/// Returns the initial snapshot from the sample session.
pub fn initial_snapshot() -> StepSnapshot {
    sample_session().into_iter().next().expect("fixture session is non-empty")
}

/// Returns the terminal snapshot from the sample session.
pub fn terminal_snapshot() -> StepSnapshot {
    sample_session()
        .into_iter()
        .last()
        .expect("fixture session is non-empty")
}
