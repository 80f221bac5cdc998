//! A full baking session: baker plus environment, one snapshot per step.

use bake_events::{RunOutcome, StepSnapshot};
use tracing::info;

use crate::baker::Baker;
use crate::env::BakingEnvironment;

/// Opening line of every session.
pub const GREETING: &str =
    "Hi there! I absolutely love baking, and I'm so excited to bake a cake today!";

/// Closing line when the ingredients all came out right.
pub const SUCCESS_MESSAGE: &str =
    "Wonderful! We've successfully baked the cake. Let's enjoy it!";

/// Closing line when the recipe finished but the amounts were off.
pub const SPOILED_MESSAGE: &str = "Hmm... it seems we made some mistakes with the ingredients \
     and the cake tastes... not so good. Let's try again next time!";

/// Closing line when the step budget ran out.
pub const TIMEOUT_MESSAGE: &str =
    "Oh dear, it seems we've taken too long to bake the cake. Let's try again another time!";

/// Default number of steps before the session times out.
pub const DEFAULT_MAX_STEPS: u32 = 25;

/// One baking run from greeting to outcome.
#[derive(Debug)]
pub struct BakingSession {
    env: BakingEnvironment,
    baker: Baker,
    step: u32,
    max_steps: u32,
    done: bool,
}

impl BakingSession {
    pub fn new(baker: Baker) -> Self {
        Self {
            env: BakingEnvironment::new(),
            baker,
            step: 0,
            max_steps: DEFAULT_MAX_STEPS,
            done: false,
        }
    }

    pub fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// The number of steps taken so far.
    pub fn step(&self) -> u32 {
        self.step
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Resets everything and returns the greeting snapshot.
    pub fn start_baking(&mut self) -> StepSnapshot {
        self.env.reset();
        self.baker.reset();
        self.step = 0;
        self.done = false;
        info!("baking session started");
        StepSnapshot::initial(GREETING, self.env.progress())
    }

    /// Runs one baker step through the environment and reports it.
    pub fn next_step(&mut self) -> StepSnapshot {
        if self.done || self.step >= self.max_steps || self.env.all_steps_completed() {
            return self.timeout_snapshot();
        }

        let Some(script) = self.baker.next_step() else {
            return self.timeout_snapshot();
        };
        self.step += 1;

        let mut executed = Vec::new();
        for action in &script.actions {
            if self.env.apply(action).is_ok() {
                executed.push(action.clone());
            }
        }

        let completed = self.env.all_steps_completed();
        let outcome = if completed {
            // The final check appends its verdict to the feedback.
            if self.env.check_final_ingredients() {
                Some(RunOutcome::Success)
            } else {
                Some(RunOutcome::Spoiled)
            }
        } else {
            None
        };

        let feedback = self.env.drain_feedback().join("\n");
        let mut snapshot = StepSnapshot::step(script.message, self.env.progress());
        snapshot.attempted_actions = script.actions;
        snapshot.executed_actions = executed;
        snapshot.feedback = feedback;

        match outcome {
            Some(RunOutcome::Success) => {
                self.done = true;
                snapshot.finish(SUCCESS_MESSAGE, RunOutcome::Success)
            }
            Some(_) => {
                self.done = true;
                snapshot.finish(SPOILED_MESSAGE, RunOutcome::Spoiled)
            }
            None => snapshot,
        }
    }

    fn timeout_snapshot(&mut self) -> StepSnapshot {
        self.done = true;
        info!("baking session timed out after {} steps", self.step);
        StepSnapshot::step(TIMEOUT_MESSAGE, self.env.progress())
            .finish(TIMEOUT_MESSAGE, RunOutcome::Timeout)
    }
}
