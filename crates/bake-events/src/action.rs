//! Domain actions reported by the simulation backend.
//!
//! An action is one atomic operation the baking agent attempted during a
//! step, e.g. `add_ingredient("flour", "250")`. The backend reports both the
//! attempted and the executed list per step; an attempted action missing
//! from the executed list failed its preconditions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One atomic domain operation, optionally carrying arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// Action name, e.g. "add_ingredient" or "preheat_oven".
    pub name: String,
    /// Positional arguments, all carried as strings.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,
}

impl Action {
    /// Creates an action with arguments.
    pub fn new<N, I, A>(name: N, args: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        Self {
            name: name.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates an action with no arguments.
    pub fn bare(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// Returns the first argument, if any.
    pub fn first_arg(&self) -> Option<&str> {
        self.args.first().map(String::as_str)
    }
}

impl fmt::Display for Action {
    /// Formats as human-readable text: "Add ingredient: flour, 250".
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut spaced = self.name.replace('_', " ");
        if let Some(first) = spaced.get_mut(0..1) {
            first.make_ascii_uppercase();
        }
        write!(f, "{}", spaced)?;
        if !self.args.is_empty() {
            write!(f, ": {}", self.args.join(", "))?;
        }
        Ok(())
    }
}
