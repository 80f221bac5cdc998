//! The baking simulation backend.
//!
//! A small turn-based environment: a scripted baker narrates one step at a
//! time, the environment validates and applies each attempted action, and
//! every step is reported as a [`bake_events::StepSnapshot`]. Sessions can
//! be recorded to JSONL and replayed elsewhere.

pub mod baker;
pub mod env;
pub mod record;
pub mod session;

// Re-export environment types
pub use env::{
    BakingEnvironment, MixKind, RecipeStep, StepError, DRY_INGREDIENTS, INGREDIENT_AMOUNTS,
    REQUIRED_OVEN_TEMPERATURE, TOOLS, WET_INGREDIENTS,
};

// Re-export agent and session types
pub use baker::{Baker, ScriptStep};
pub use session::{
    BakingSession, GREETING, SPOILED_MESSAGE, SUCCESS_MESSAGE, TIMEOUT_MESSAGE,
};

// Re-export recording types
pub use record::{RecordError, SessionReader, SessionWriter};
