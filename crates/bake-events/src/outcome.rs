//! Run outcome classification.
//!
//! A finished baking run ends one of three ways: the cake came out right,
//! the ingredient amounts were wrong, or the agent ran out of steps.
//! Terminal snapshots carry the outcome explicitly; older recordings only
//! carry the final message text, so a fallback classifier over that text is
//! kept for compatibility.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a completed baking run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunOutcome {
    /// Every ingredient matched its required amount.
    Success,
    /// The recipe finished but amounts were off.
    Spoiled,
    /// The step budget ran out before the recipe finished.
    Timeout,
}

impl fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunOutcome::Success => write!(f, "success"),
            RunOutcome::Spoiled => write!(f, "spoiled"),
            RunOutcome::Timeout => write!(f, "timeout"),
        }
    }
}

/// Classifies a terminal message by its wording.
///
/// Fallback for snapshots recorded before the explicit `outcome` field
/// existed. Matches the legacy phrases; anything unrecognized is treated
/// as a timeout, which is what the legacy frontend did.
pub fn classify_final_message(message: &str) -> RunOutcome {
    if message.contains("successfully baked") {
        RunOutcome::Success
    } else if message.contains("mistakes with the ingredients") {
        RunOutcome::Spoiled
    } else {
        RunOutcome::Timeout
    }
}
