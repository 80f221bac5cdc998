//! Step snapshot types.
//!
//! A snapshot is one immutable report of the simulation state after a step:
//! what the agent said, which actions it attempted and which actually
//! executed, environment feedback, recipe progress, and - once the run is
//! over - the final message and outcome. Snapshots are used both for live
//! display and for history replay.

use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::outcome::{classify_final_message, RunOutcome};

/// One immutable simulation state report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepSnapshot {
    /// Plain message (used by the initial snapshot).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Agent narration for this step.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_message: Option<String>,
    /// Actions the agent tried this step.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attempted_actions: Vec<Action>,
    /// Subset of attempted actions that actually applied.
    #[serde(default)]
    pub executed_actions: Vec<Action>,
    /// Environment feedback lines, newline-joined.
    #[serde(default)]
    pub feedback: String,
    /// Recipe progress after this step.
    #[serde(default)]
    pub progress: Progress,
    /// Whether the run is over.
    pub completed: bool,
    /// Closing message, present on terminal snapshots.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_message: Option<String>,
    /// Explicit run outcome, present on terminal snapshots.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<RunOutcome>,
}

impl StepSnapshot {
    /// Creates the initial (pre-step) snapshot.
    pub fn initial(message: impl Into<String>, progress: Progress) -> Self {
        Self {
            message: Some(message.into()),
            agent_message: None,
            attempted_actions: Vec::new(),
            executed_actions: Vec::new(),
            feedback: String::new(),
            progress,
            completed: false,
            final_message: None,
            outcome: None,
        }
    }

    /// Creates an in-progress step snapshot.
    pub fn step(agent_message: impl Into<String>, progress: Progress) -> Self {
        Self {
            message: None,
            agent_message: Some(agent_message.into()),
            attempted_actions: Vec::new(),
            executed_actions: Vec::new(),
            feedback: String::new(),
            progress,
            completed: false,
            final_message: None,
            outcome: None,
        }
    }

    /// Marks this snapshot terminal with a closing message and outcome.
    pub fn finish(mut self, final_message: impl Into<String>, outcome: RunOutcome) -> Self {
        self.completed = true;
        self.final_message = Some(final_message.into());
        self.outcome = Some(outcome);
        self
    }

    /// The text to display for this step: agent narration, falling back to
    /// the plain message.
    pub fn display_message(&self) -> &str {
        self.agent_message
            .as_deref()
            .or(self.message.as_deref())
            .unwrap_or("")
    }

    /// Attempted actions that did not make it into the executed list.
    ///
    /// Matching is by name, as in the legacy frontend: a step never retries
    /// the same action twice, so name identity is enough.
    pub fn failed_actions(&self) -> Vec<&Action> {
        self.attempted_actions
            .iter()
            .filter(|a| !self.executed_actions.iter().any(|e| e.name == a.name))
            .collect()
    }

    /// The run outcome for a terminal snapshot.
    ///
    /// Prefers the explicit field; falls back to classifying the final
    /// message text for recordings that predate it. Returns `None` for
    /// non-terminal snapshots.
    pub fn run_outcome(&self) -> Option<RunOutcome> {
        if !self.completed {
            return None;
        }
        self.outcome.or_else(|| {
            self.final_message
                .as_deref()
                .map(classify_final_message)
                .or(Some(RunOutcome::Timeout))
        })
    }
}

/// Recipe progress: steps, tools, and per-ingredient amounts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    #[serde(default)]
    pub steps: Vec<StepProgress>,
    #[serde(default)]
    pub dry_ingredients: Vec<IngredientProgress>,
    #[serde(default)]
    pub wet_ingredients: Vec<IngredientProgress>,
}

/// Completion status of a recipe step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Completed,
    Incomplete,
}

/// One recipe step, with the tools it requires (if any).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepProgress {
    pub name: String,
    pub status: StepStatus,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<ToolStatus>,
}

impl StepProgress {
    /// Creates a step entry without tools.
    pub fn new(name: impl Into<String>, status: StepStatus) -> Self {
        Self {
            name: name.into(),
            status,
            tools: Vec::new(),
        }
    }

    /// Attaches tool statuses to this step.
    pub fn with_tools(mut self, tools: Vec<ToolStatus>) -> Self {
        self.tools = tools;
        self
    }
}

/// Whether a named tool has been used yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolStatus {
    pub name: String,
    pub used: bool,
}

impl ToolStatus {
    pub fn new(name: impl Into<String>, used: bool) -> Self {
        Self {
            name: name.into(),
            used,
        }
    }
}

/// Current vs required amount for one ingredient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientProgress {
    pub name: String,
    pub current: u32,
    pub required: u32,
}

impl IngredientProgress {
    pub fn new(name: impl Into<String>, current: u32, required: u32) -> Self {
        Self {
            name: name.into(),
            current,
            required,
        }
    }

    /// True once the exact required amount has been added.
    pub fn satisfied(&self) -> bool {
        self.current == self.required
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_progress() -> Progress {
        Progress {
            steps: vec![
                StepProgress::new("Preheat oven", StepStatus::Completed),
                StepProgress::new("Mix dry ingredients", StepStatus::Incomplete).with_tools(vec![
                    ToolStatus::new("Mixing Bowl", true),
                    ToolStatus::new("Whisk", false),
                ]),
            ],
            dry_ingredients: vec![IngredientProgress::new("Flour", 250, 250)],
            wet_ingredients: vec![IngredientProgress::new("Milk", 0, 240)],
        }
    }

    #[test]
    fn test_initial_snapshot() {
        let snapshot = StepSnapshot::initial("Hi there!", Progress::default());
        assert_eq!(snapshot.display_message(), "Hi there!");
        assert!(!snapshot.completed);
        assert_eq!(snapshot.run_outcome(), None);
    }

    #[test]
    fn test_step_snapshot_display_prefers_agent_message() {
        let mut snapshot = StepSnapshot::step("Adding the flour now.", Progress::default());
        snapshot.message = Some("fallback".to_string());
        assert_eq!(snapshot.display_message(), "Adding the flour now.");
    }

    #[test]
    fn test_failed_actions() {
        let mut snapshot = StepSnapshot::step("Trying to bake.", Progress::default());
        snapshot.attempted_actions = vec![
            Action::bare("bake_cake"),
            Action::new("use_tool", ["pans"]),
        ];
        snapshot.executed_actions = vec![Action::new("use_tool", ["pans"])];

        let failed = snapshot.failed_actions();
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].name, "bake_cake");
    }

    #[test]
    fn test_finish_sets_outcome() {
        let snapshot = StepSnapshot::step("Done!", sample_progress())
            .finish("We've successfully baked the cake.", RunOutcome::Success);
        assert!(snapshot.completed);
        assert_eq!(snapshot.run_outcome(), Some(RunOutcome::Success));
    }

    #[test]
    fn test_run_outcome_fallback_classification() {
        // A legacy terminal snapshot: final message present, no outcome field
        let mut snapshot = StepSnapshot::step("Oh no.", Progress::default());
        snapshot.completed = true;
        snapshot.final_message =
            Some("Hmm... it seems we made some mistakes with the ingredients".to_string());
        assert_eq!(snapshot.run_outcome(), Some(RunOutcome::Spoiled));
    }

    #[test]
    fn test_run_outcome_terminal_without_message() {
        let mut snapshot = StepSnapshot::step("", Progress::default());
        snapshot.completed = true;
        assert_eq!(snapshot.run_outcome(), Some(RunOutcome::Timeout));
    }

    #[test]
    fn test_snapshot_serialization_roundtrip() {
        let mut snapshot = StepSnapshot::step("Mixing.", sample_progress());
        snapshot.attempted_actions = vec![Action::new("mix_ingredients", ["dry"])];
        snapshot.executed_actions = snapshot.attempted_actions.clone();
        snapshot.feedback = "You mixed the dry ingredients".to_string();

        let json = serde_json::to_string(&snapshot).unwrap();
        let parsed: StepSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snapshot, parsed);
    }

    #[test]
    fn test_snapshot_deserialize_legacy_shape() {
        // Shape emitted by the legacy backend for the timeout case: no
        // progress, no attempted actions, no outcome.
        let json = r#"{
            "agent_message": "Oh dear, it seems we've taken too long to bake the cake. Let's try again another time!",
            "completed": true,
            "feedback": "",
            "attempted_actions": [],
            "executed_actions": []
        }"#;
        let snapshot: StepSnapshot = serde_json::from_str(json).unwrap();
        assert!(snapshot.completed);
        assert!(snapshot.progress.steps.is_empty());
        assert_eq!(snapshot.run_outcome(), Some(RunOutcome::Timeout));
    }

    #[test]
    fn test_step_status_serialization() {
        assert_eq!(
            serde_json::to_string(&StepStatus::Completed).unwrap(),
            r#""completed""#
        );
        assert_eq!(
            serde_json::to_string(&StepStatus::Incomplete).unwrap(),
            r#""incomplete""#
        );
    }

    #[test]
    fn test_ingredient_satisfied() {
        assert!(IngredientProgress::new("Flour", 250, 250).satisfied());
        assert!(!IngredientProgress::new("Flour", 500, 250).satisfied());
    }
}
