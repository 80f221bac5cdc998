//! Headless baking simulation runner.
//!
//! Runs a full session and records every snapshot to a JSONL file that the
//! stage binary can replay.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use kitchen_sim::record::SessionWriter;
use kitchen_sim::{Baker, BakingSession};

/// Command line arguments for the simulation
#[derive(Parser, Debug)]
#[command(name = "kitchen_sim")]
#[command(about = "A turn-based cake baking simulation")]
struct Args {
    /// Random seed for the mistake-making baker
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Maximum number of steps before timing out
    #[arg(long, default_value_t = 25)]
    max_steps: u32,

    /// Let the baker make seeded mistakes
    #[arg(long)]
    mistakes: bool,

    /// Where to record the session
    #[arg(long, default_value = "output/session.jsonl")]
    output: PathBuf,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    println!("Kitchen Simulation");
    println!("==================");
    println!("Seed: {}", args.seed);
    println!("Max steps: {}", args.max_steps);
    println!("Mistakes: {}", args.mistakes);
    println!();

    let baker = if args.mistakes {
        Baker::with_mistakes(args.seed)
    } else {
        Baker::scripted()
    };
    let mut session = BakingSession::new(baker).with_max_steps(args.max_steps);

    let mut writer = match SessionWriter::create(&args.output) {
        Ok(writer) => writer,
        Err(e) => {
            eprintln!("Could not open {}: {}", args.output.display(), e);
            std::process::exit(1);
        }
    };

    let initial = session.start_baking();
    println!("{}", initial.display_message());
    if let Err(e) = writer.append(&initial) {
        eprintln!("Warning: could not record snapshot: {}", e);
    }

    loop {
        let snapshot = session.next_step();
        println!();
        println!("[Step {}] {}", session.step(), snapshot.display_message());
        for line in snapshot.feedback.lines() {
            println!("    {}", line);
        }
        for failed in snapshot.failed_actions() {
            println!("    (failed) {}", failed);
        }

        if let Err(e) = writer.append(&snapshot) {
            eprintln!("Warning: could not record snapshot: {}", e);
        }

        if snapshot.completed {
            println!();
            if let Some(outcome) = snapshot.run_outcome() {
                println!("Outcome: {}", outcome);
            }
            break;
        }
    }

    println!(
        "Recorded {} snapshots to {}.",
        writer.count(),
        args.output.display()
    );
}
