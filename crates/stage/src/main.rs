//! Headless stage viewer.
//!
//! Runs a baking session (live and scripted, or replayed from a JSONL
//! recording) through the choreography engine, narrating movement through
//! tracing and printing each step's report to stdout.

use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use kitchen_sim::record::SessionWriter;
use kitchen_sim::{Baker, BakingSession};
use stage::config::StageConfig;
use stage::kitchen;
use stage::sink::ConsoleSink;
use stage::source::{RecordedSession, RecordingSource, SnapshotSource, SourceError};
use stage::{Choreographer, StageDriver, StepHistory};

use bake_events::StepSnapshot;

/// Command line arguments for the stage viewer
#[derive(Parser, Debug)]
#[command(name = "stage")]
#[command(about = "Animated replay of a baking simulation on a tile grid")]
struct Args {
    /// Random seed for the scripted baker
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Maximum number of simulation steps before timing out
    #[arg(long, default_value_t = 25)]
    max_steps: u32,

    /// Let the baker make seeded mistakes
    #[arg(long)]
    mistakes: bool,

    /// Record the live session to a JSONL file
    #[arg(long)]
    record: Option<PathBuf>,

    /// Replay a recorded session instead of running live
    #[arg(long)]
    replay: Option<PathBuf>,

    /// Path to a TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    if let Err(e) = run(args) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &args.config {
        Some(path) => StageConfig::from_file(path)?,
        None => StageConfig::default(),
    };

    println!("Bakery Stage");
    println!("============");

    let choreographer = kitchen::default_choreographer(
        config.geometry.geometry(),
        config.timing.step_duration(),
    );

    match &args.replay {
        Some(path) => {
            println!("Replaying {}", path.display());
            println!();
            let source = RecordedSession::from_path(path)?;
            run_session(source, choreographer, &config)
        }
        None => {
            println!("Seed: {}", args.seed);
            println!("Max steps: {}", args.max_steps);
            println!();
            let baker = if args.mistakes {
                Baker::with_mistakes(args.seed)
            } else {
                Baker::scripted()
            };
            let session = BakingSession::new(baker).with_max_steps(args.max_steps);
            match &args.record {
                Some(path) => {
                    let writer = SessionWriter::create(path)?;
                    run_session(RecordingSource::new(session, writer), choreographer, &config)
                }
                None => run_session(session, choreographer, &config),
            }
        }
    }
}

fn run_session<S: SnapshotSource>(
    source: S,
    choreographer: Choreographer,
    config: &StageConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut driver = StageDriver::new(source, choreographer, config.timing.auto_advance());
    let mut sink = ConsoleSink;

    let first = driver.start()?;
    println!("{}", first.display_message());
    driver.play();

    let dt = config.timing.tick();
    let mut seen = driver.history().len();
    loop {
        match driver.tick(dt, &mut sink) {
            Ok(()) => {}
            Err(SourceError::Exhausted) => {
                info!("recording exhausted before a terminal snapshot");
                break;
            }
            Err(e) => return Err(e.into()),
        }

        if driver.history().len() > seen {
            seen = driver.history().len();
            if let Some(snapshot) = driver.history().current() {
                report_step(seen - 1, snapshot);
            }
        }

        if driver.settled() {
            break;
        }
    }

    print_summary(driver.history());
    Ok(())
}

fn report_step(index: usize, snapshot: &StepSnapshot) {
    println!();
    println!("[Step {}] {}", index, snapshot.display_message());
    for action in &snapshot.attempted_actions {
        let failed = snapshot.failed_actions().iter().any(|f| f.name == action.name);
        println!("  - {}{}", action, if failed { " (Failed)" } else { "" });
    }
    if !snapshot.feedback.is_empty() {
        for line in snapshot.feedback.lines() {
            println!("    {}", line);
        }
    }
}

fn print_summary(history: &StepHistory) {
    let Some(last) = history.current() else {
        return;
    };

    println!();
    if let Some(final_message) = &last.final_message {
        println!("{}", final_message);
    }
    if let Some(outcome) = last.run_outcome() {
        println!("Outcome: {}", outcome);
    }

    let progress = &last.progress;
    if !progress.steps.is_empty() {
        println!();
        println!("Recipe steps:");
        for step in &progress.steps {
            let mark = match step.status {
                bake_events::StepStatus::Completed => "x",
                bake_events::StepStatus::Incomplete => " ",
            };
            println!("  [{}] {}", mark, step.name);
        }
    }
    for (title, list) in [
        ("Dry ingredients:", &progress.dry_ingredients),
        ("Wet ingredients:", &progress.wet_ingredients),
    ] {
        if !list.is_empty() {
            println!("{}", title);
            for ingredient in list {
                println!("  {}: {}/{}", ingredient.name, ingredient.current, ingredient.required);
            }
        }
    }
}
