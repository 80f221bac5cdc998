//! The scripted baker agent.
//!
//! Stands in for the original interactive agent: a fixed script of
//! narrated steps that completes the recipe in order. The mistake mode
//! perturbs the script with a seeded RNG so failed actions and spoiled
//! outcomes stay reachable and reproducible.

use bake_events::Action;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// One narrated step: what the baker says, and what they try to do.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptStep {
    pub message: String,
    pub actions: Vec<Action>,
}

impl ScriptStep {
    fn new(message: &str, actions: Vec<Action>) -> Self {
        Self {
            message: message.to_string(),
            actions,
        }
    }
}

/// A baker working through a script one step per turn.
#[derive(Debug, Clone)]
pub struct Baker {
    steps: Vec<ScriptStep>,
    cursor: usize,
}

impl Baker {
    /// The canonical baker: follows the recipe exactly.
    pub fn scripted() -> Self {
        Self {
            steps: canonical_script(),
            cursor: 0,
        }
    }

    /// A baker that makes seeded mistakes: one ingredient amount comes out
    /// wrong, and an impatient bake attempt is thrown in early.
    pub fn with_mistakes(seed: u64) -> Self {
        Self {
            steps: mistake_script(seed),
            cursor: 0,
        }
    }

    /// Builds a baker from an explicit script.
    pub fn from_script(steps: Vec<ScriptStep>) -> Self {
        Self { steps, cursor: 0 }
    }

    /// The next narrated step, or `None` once the script is exhausted.
    pub fn next_step(&mut self) -> Option<ScriptStep> {
        let step = self.steps.get(self.cursor).cloned()?;
        self.cursor += 1;
        Some(step)
    }

    /// Rewinds to the start of the script.
    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    pub fn remaining(&self) -> usize {
        self.steps.len() - self.cursor
    }
}

fn canonical_script() -> Vec<ScriptStep> {
    vec![
        ScriptStep::new(
            "First things first - let's get the oven preheating to 350 degrees.",
            vec![Action::new("preheat_oven", ["350"])],
        ),
        ScriptStep::new(
            "I'll grab the mixing bowl and whisk together the dry ingredients: \
             flour, baking powder, and a pinch of salt.",
            vec![
                Action::new("use_tool", ["mixing_bowl"]),
                Action::new("use_tool", ["whisk"]),
                Action::new("add_ingredient", ["flour", "250"]),
                Action::new("add_ingredient", ["baking_powder", "2"]),
                Action::new("add_ingredient", ["salt", "1"]),
                Action::new("mix_ingredients", ["dry"]),
            ],
        ),
        ScriptStep::new(
            "Now to cream the butter and sugar until light and fluffy.",
            vec![
                Action::new("use_tool", ["large_bowl"]),
                Action::new("use_tool", ["mixer"]),
                Action::new("add_ingredient", ["butter", "230"]),
                Action::new("add_ingredient", ["sugar", "300"]),
                Action::new("mix_ingredients", ["cream"]),
            ],
        ),
        ScriptStep::new(
            "Time for the rest of the wet ingredients - eggs, vanilla, and milk \
             from the fridge.",
            vec![
                Action::new("add_ingredient", ["eggs", "4"]),
                Action::new("add_ingredient", ["vanilla_extract", "2"]),
                Action::new("add_ingredient", ["milk", "240"]),
                Action::new("mix_ingredients", ["wet"]),
            ],
        ),
        ScriptStep::new(
            "Let's bring it all together into one smooth batter.",
            vec![Action::bare("combine_all_ingredients")],
        ),
        ScriptStep::new(
            "I'll prepare the pans and pour the batter in evenly.",
            vec![Action::new("use_tool", ["pans"]), Action::bare("pour_batter")],
        ),
        ScriptStep::new(
            "Into the oven it goes!",
            vec![Action::bare("bake_cake")],
        ),
        ScriptStep::new(
            "It smells wonderful - time to let the cake cool on the rack.",
            vec![Action::bare("cool_cake")],
        ),
    ]
}

fn mistake_script(seed: u64) -> Vec<ScriptStep> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut steps = canonical_script();

    // Get one ingredient amount wrong: a random add_ingredient action has
    // its amount multiplied.
    let add_positions: Vec<(usize, usize)> = steps
        .iter()
        .enumerate()
        .flat_map(|(s, step)| {
            step.actions
                .iter()
                .enumerate()
                .filter(|(_, a)| a.name == "add_ingredient")
                .map(move |(i, _)| (s, i))
        })
        .collect();
    let (step_index, action_index) = add_positions[rng.gen_range(0..add_positions.len())];
    let multiplier: u32 = rng.gen_range(2..=3);
    let action = &mut steps[step_index].actions[action_index];
    if let Some(amount) = action.args.get(1).and_then(|a| a.parse::<u32>().ok()) {
        action.args[1] = (amount * multiplier).to_string();
    }

    // Impatience: try to bake before the batter exists. The attempt fails
    // and shows up as a failed action in that step's report.
    let early_step = rng.gen_range(1..=2);
    steps[early_step].actions.push(Action::bare("bake_cake"));

    steps
}
