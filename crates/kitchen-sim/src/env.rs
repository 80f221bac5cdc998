//! The baking environment.
//!
//! Owns the full recipe state: per-ingredient amounts, tool usage, and the
//! set of completed recipe steps. Actions either apply (appending their
//! feedback line) or are rejected with a [`StepError`] whose message
//! becomes the feedback; rejected actions count as attempted but not
//! executed.

use std::collections::{BTreeMap, BTreeSet};

use thiserror::Error;

use bake_events::{Action, IngredientProgress, Progress, StepProgress, StepStatus, ToolStatus};

/// Each ingredient with the amount the recipe requires.
pub const INGREDIENT_AMOUNTS: [(&str, u32); 8] = [
    ("flour", 250),
    ("baking_powder", 2),
    ("salt", 1),
    ("butter", 230),
    ("sugar", 300),
    ("eggs", 4),
    ("vanilla_extract", 2),
    ("milk", 240),
];

/// Ingredients reported under the dry list.
pub const DRY_INGREDIENTS: [&str; 3] = ["flour", "baking_powder", "salt"];

/// Ingredients reported under the wet list.
pub const WET_INGREDIENTS: [&str; 5] = ["butter", "sugar", "eggs", "vanilla_extract", "milk"];

/// The tools available in the kitchen.
pub const TOOLS: [&str; 6] = ["oven", "mixing_bowl", "large_bowl", "whisk", "mixer", "pans"];

/// The only temperature the cake bakes at.
pub const REQUIRED_OVEN_TEMPERATURE: u32 = 350;

/// The nine recipe steps, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RecipeStep {
    PreheatOven,
    PreparePans,
    MixDryIngredients,
    Cream,
    MixWetIngredients,
    CombineAllIngredients,
    PourBatter,
    BakeCake,
    CoolCake,
}

impl RecipeStep {
    pub const ALL: [RecipeStep; 9] = [
        RecipeStep::PreheatOven,
        RecipeStep::PreparePans,
        RecipeStep::MixDryIngredients,
        RecipeStep::Cream,
        RecipeStep::MixWetIngredients,
        RecipeStep::CombineAllIngredients,
        RecipeStep::PourBatter,
        RecipeStep::BakeCake,
        RecipeStep::CoolCake,
    ];

    /// Display label used in progress reports.
    pub fn label(self) -> &'static str {
        match self {
            RecipeStep::PreheatOven => "Preheat oven",
            RecipeStep::PreparePans => "Prepare pans",
            RecipeStep::MixDryIngredients => "Mix dry ingredients",
            RecipeStep::Cream => "Cream",
            RecipeStep::MixWetIngredients => "Mix wet ingredients",
            RecipeStep::CombineAllIngredients => "Combine all ingredients",
            RecipeStep::PourBatter => "Pour batter",
            RecipeStep::BakeCake => "Bake cake",
            RecipeStep::CoolCake => "Cool cake",
        }
    }
}

/// What kind of mixing an action requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MixKind {
    Dry,
    Wet,
    Cream,
}

impl MixKind {
    pub fn parse(kind: &str) -> Option<Self> {
        match kind.to_ascii_lowercase().as_str() {
            "dry" => Some(MixKind::Dry),
            "wet" => Some(MixKind::Wet),
            "cream" => Some(MixKind::Cream),
            _ => None,
        }
    }

    fn required_tools(self) -> [&'static str; 2] {
        match self {
            MixKind::Dry => ["mixing_bowl", "whisk"],
            MixKind::Wet | MixKind::Cream => ["large_bowl", "mixer"],
        }
    }

    fn ingredients(self) -> &'static [&'static str] {
        match self {
            MixKind::Dry => &["flour", "baking_powder", "salt"],
            MixKind::Cream => &["butter", "sugar"],
            MixKind::Wet => &["eggs", "vanilla_extract", "milk"],
        }
    }

    fn goal(self) -> &'static str {
        match self {
            MixKind::Dry => "mix the dry ingredients",
            MixKind::Wet => "mix the wet ingredients",
            MixKind::Cream => "cream the butter and sugar",
        }
    }

    fn mixture(self) -> &'static str {
        match self {
            MixKind::Dry => "dry mixture",
            MixKind::Wet => "wet mixture",
            MixKind::Cream => "creaming",
        }
    }
}

/// Why an attempted action was rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StepError {
    #[error("You tried to add {amount} {ingredient}, but {ingredient} is not a valid ingredient")]
    UnknownIngredient { ingredient: String, amount: u32 },
    #[error("You tried to use {tool}, but {tool} is not a valid tool")]
    UnknownTool { tool: String },
    #[error("You tried to use the oven, but it's not preheated yet.")]
    OvenNotPreheated,
    #[error("You need to use {required} to {goal}, and are missing: {missing}")]
    MissingTools {
        required: String,
        goal: String,
        missing: String,
    },
    #[error("You are missing the following ingredients for {mixture}: {missing}")]
    MissingIngredients { mixture: String, missing: String },
    #[error("{message}")]
    CombineNotReady { message: String },
    #[error("You need to combine all ingredients and prepare cake pans first")]
    PourNotReady,
    #[error("Please pour the batter into the pans first")]
    BakeNeedsBatter,
    #[error("Please preheat the oven to 350°F first")]
    BakeNeedsPreheat,
    #[error("The oven temperature should be 350°F, but it's currently set to {actual}°F")]
    WrongTemperature { actual: u32 },
    #[error("Please bake the cake first")]
    CoolNeedsBake,
    #[error("Unknown action '{name}'")]
    UnknownAction { name: String },
    #[error("Action '{name}' is missing a valid argument")]
    BadArguments { name: String },
}

#[derive(Debug, Clone, Copy)]
struct IngredientAmount {
    current: u32,
    required: u32,
}

/// The mutable recipe state.
#[derive(Debug)]
pub struct BakingEnvironment {
    ingredients: BTreeMap<&'static str, IngredientAmount>,
    tools_used: BTreeMap<&'static str, bool>,
    steps_completed: BTreeSet<RecipeStep>,
    oven_temperature: Option<u32>,
    dry_mixed: bool,
    wet_mixed: bool,
    cream_done: bool,
    pans_prepared: bool,
    feedbacks: Vec<String>,
}

impl BakingEnvironment {
    pub fn new() -> Self {
        let ingredients = INGREDIENT_AMOUNTS
            .iter()
            .map(|&(name, required)| (name, IngredientAmount { current: 0, required }))
            .collect();
        let tools_used = TOOLS.iter().map(|&tool| (tool, false)).collect();
        Self {
            ingredients,
            tools_used,
            steps_completed: BTreeSet::new(),
            oven_temperature: None,
            dry_mixed: false,
            wet_mixed: false,
            cream_done: false,
            pans_prepared: false,
            feedbacks: Vec::new(),
        }
    }

    /// Returns the environment to its pre-recipe state.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Applies one action. On rejection, the error message is also
    /// appended to the feedback so the report reads in order.
    pub fn apply(&mut self, action: &Action) -> Result<(), StepError> {
        let result = self.dispatch(action);
        if let Err(e) = &result {
            self.feedbacks.push(e.to_string());
        }
        result
    }

    fn dispatch(&mut self, action: &Action) -> Result<(), StepError> {
        let bad_args = || StepError::BadArguments {
            name: action.name.clone(),
        };
        match action.name.as_str() {
            "add_ingredient" => {
                let ingredient = action.args.first().ok_or_else(bad_args)?.clone();
                let amount = action
                    .args
                    .get(1)
                    .and_then(|a| a.parse::<u32>().ok())
                    .ok_or_else(bad_args)?;
                self.add_ingredient(&ingredient, amount)
            }
            "use_tool" => {
                let tool = action.args.first().ok_or_else(bad_args)?.clone();
                self.use_tool(&tool)
            }
            "preheat_oven" => {
                let temperature = action
                    .args
                    .first()
                    .and_then(|a| a.parse::<u32>().ok())
                    .ok_or_else(bad_args)?;
                self.preheat_oven(temperature);
                Ok(())
            }
            "mix_ingredients" => {
                let kind = action
                    .args
                    .first()
                    .and_then(|k| MixKind::parse(k))
                    .ok_or_else(bad_args)?;
                self.mix_ingredients(kind)
            }
            "combine_all_ingredients" => self.combine_all_ingredients(),
            "pour_batter" => self.pour_batter(),
            "bake_cake" => self.bake_cake(),
            "cool_cake" => self.cool_cake(),
            other => Err(StepError::UnknownAction {
                name: other.to_string(),
            }),
        }
    }

    pub fn add_ingredient(&mut self, ingredient: &str, amount: u32) -> Result<(), StepError> {
        match self.ingredients.get_mut(ingredient) {
            Some(state) => {
                state.current += amount;
                self.feedbacks.push(format!("Added {} {}", amount, ingredient));
                Ok(())
            }
            None => Err(StepError::UnknownIngredient {
                ingredient: ingredient.to_string(),
                amount,
            }),
        }
    }

    pub fn use_tool(&mut self, tool: &str) -> Result<(), StepError> {
        let Some(key) = TOOLS.iter().copied().find(|&t| t == tool) else {
            return Err(StepError::UnknownTool {
                tool: tool.to_string(),
            });
        };
        match key {
            "pans" => {
                self.tools_used.insert(key, true);
                self.pans_prepared = true;
                self.steps_completed.insert(RecipeStep::PreparePans);
                self.feedbacks.push("You prepared the cake pans.".to_string());
            }
            "oven" => match self.oven_temperature {
                Some(temperature) => {
                    self.tools_used.insert(key, true);
                    self.steps_completed.insert(RecipeStep::PreheatOven);
                    self.feedbacks.push(format!(
                        "You used the oven, which is preheated to {}°F",
                        temperature
                    ));
                }
                None => return Err(StepError::OvenNotPreheated),
            },
            _ => {
                self.tools_used.insert(key, true);
                self.feedbacks.push(format!("Using {}", key));
            }
        }
        Ok(())
    }

    pub fn preheat_oven(&mut self, temperature: u32) {
        self.oven_temperature = Some(temperature);
        self.steps_completed.insert(RecipeStep::PreheatOven);
        self.feedbacks
            .push(format!("You preheated the oven to {}°F", temperature));
    }

    pub fn mix_ingredients(&mut self, kind: MixKind) -> Result<(), StepError> {
        let missing_ingredients: Vec<&str> = kind
            .ingredients()
            .iter()
            .filter(|&&name| self.ingredients[name].current == 0)
            .copied()
            .collect();
        if !missing_ingredients.is_empty() {
            return Err(StepError::MissingIngredients {
                mixture: kind.mixture().to_string(),
                missing: missing_ingredients.join(", "),
            });
        }

        let missing_tools: Vec<&str> = kind
            .required_tools()
            .iter()
            .filter(|&&tool| !self.tools_used[tool])
            .copied()
            .collect();
        if !missing_tools.is_empty() {
            return Err(StepError::MissingTools {
                required: kind.required_tools().join(", "),
                goal: kind.goal().to_string(),
                missing: missing_tools.join(", "),
            });
        }

        match kind {
            MixKind::Cream => {
                self.cream_done = true;
                self.steps_completed.insert(RecipeStep::Cream);
                self.feedbacks
                    .push("You creamed the butter and sugar until light and fluffy".to_string());
            }
            MixKind::Dry => {
                self.dry_mixed = true;
                self.steps_completed.insert(RecipeStep::MixDryIngredients);
                self.feedbacks.push(
                    "You mixed the dry ingredients in the mixing bowl with the whisk".to_string(),
                );
            }
            MixKind::Wet => {
                self.wet_mixed = true;
                self.steps_completed.insert(RecipeStep::MixWetIngredients);
                self.feedbacks.push(
                    "You mixed the wet ingredients in the large bowl with the mixer".to_string(),
                );
            }
        }
        Ok(())
    }

    pub fn combine_all_ingredients(&mut self) -> Result<(), StepError> {
        if self.dry_mixed && self.wet_mixed {
            self.steps_completed.insert(RecipeStep::CombineAllIngredients);
            self.feedbacks
                .push("You combined all the ingredients together".to_string());
            Ok(())
        } else {
            let mut lines = Vec::new();
            if !self.dry_mixed {
                lines.push("You need to mix the dry ingredients before combining all ingredients");
            }
            if !self.wet_mixed {
                lines.push("You need to mix the wet ingredients before combining all ingredients");
            }
            Err(StepError::CombineNotReady {
                message: lines.join("\n"),
            })
        }
    }

    pub fn pour_batter(&mut self) -> Result<(), StepError> {
        if self.steps_completed.contains(&RecipeStep::CombineAllIngredients) && self.pans_prepared {
            self.steps_completed.insert(RecipeStep::PourBatter);
            self.feedbacks
                .push("You poured the batter evenly into the prepared cake pans".to_string());
            Ok(())
        } else {
            Err(StepError::PourNotReady)
        }
    }

    pub fn bake_cake(&mut self) -> Result<(), StepError> {
        if !self.steps_completed.contains(&RecipeStep::PourBatter) {
            return Err(StepError::BakeNeedsBatter);
        }
        match self.oven_temperature {
            None => Err(StepError::BakeNeedsPreheat),
            Some(REQUIRED_OVEN_TEMPERATURE) => {
                self.steps_completed.insert(RecipeStep::BakeCake);
                self.feedbacks
                    .push("You baked the cake for 30-35 minutes".to_string());
                Ok(())
            }
            Some(actual) => Err(StepError::WrongTemperature { actual }),
        }
    }

    pub fn cool_cake(&mut self) -> Result<(), StepError> {
        if self.steps_completed.contains(&RecipeStep::BakeCake) {
            self.steps_completed.insert(RecipeStep::CoolCake);
            self.feedbacks.push(
                "You let the pans sit for 10 minutes, then cooled the cake on a wire rack"
                    .to_string(),
            );
            Ok(())
        } else {
            Err(StepError::CoolNeedsBake)
        }
    }

    /// True once every recipe step has been completed.
    pub fn all_steps_completed(&self) -> bool {
        self.steps_completed.len() == RecipeStep::ALL.len()
    }

    /// Final quality check: every ingredient must match its required
    /// amount exactly. Appends the verdict to the feedback.
    pub fn check_final_ingredients(&mut self) -> bool {
        let errors: Vec<String> = self
            .ingredients
            .iter()
            .filter(|(_, state)| state.current != state.required)
            .map(|(name, state)| {
                format!("{}: expected {}, got {}", name, state.required, state.current)
            })
            .collect();

        if errors.is_empty() {
            self.feedbacks
                .push("You successfully baked a delicious cake!".to_string());
            true
        } else {
            self.feedbacks.push(
                "Your cake didn't turn out quite right... Here are the issues with the ingredients:"
                    .to_string(),
            );
            self.feedbacks.extend(errors);
            false
        }
    }

    /// Builds the progress report in display order.
    pub fn progress(&self) -> Progress {
        let mut progress = Progress::default();

        for step in RecipeStep::ALL {
            let status = if self.steps_completed.contains(&step) {
                StepStatus::Completed
            } else {
                StepStatus::Incomplete
            };
            let tools = match step {
                RecipeStep::MixDryIngredients => vec![
                    ToolStatus::new("Mixing Bowl", self.tools_used["mixing_bowl"]),
                    ToolStatus::new("Whisk", self.tools_used["whisk"]),
                ],
                RecipeStep::Cream | RecipeStep::MixWetIngredients => vec![
                    ToolStatus::new("Large Bowl", self.tools_used["large_bowl"]),
                    ToolStatus::new("Mixer", self.tools_used["mixer"]),
                ],
                _ => Vec::new(),
            };
            progress
                .steps
                .push(StepProgress::new(step.label(), status).with_tools(tools));
        }

        for name in DRY_INGREDIENTS {
            let state = self.ingredients[name];
            progress.dry_ingredients.push(IngredientProgress::new(
                capitalize(name),
                state.current,
                state.required,
            ));
        }
        for name in WET_INGREDIENTS {
            let state = self.ingredients[name];
            progress.wet_ingredients.push(IngredientProgress::new(
                capitalize(name),
                state.current,
                state.required,
            ));
        }

        progress
    }

    /// Takes the feedback accumulated since the last drain.
    pub fn drain_feedback(&mut self) -> Vec<String> {
        std::mem::take(&mut self.feedbacks)
    }
}

impl Default for BakingEnvironment {
    fn default() -> Self {
        Self::new()
    }
}

fn capitalize(name: &str) -> String {
    let mut out = name.to_string();
    if let Some(first) = out.get_mut(0..1) {
        first.make_ascii_uppercase();
    }
    out
}
