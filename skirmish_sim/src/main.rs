//! Skirmish Sim - Headless arena for ballistics_core
//!
//! Loads an arena (tanks, walls and a volley script), fires the volleys at
//! their scheduled times and prints every ballistics event as it happens.

mod arena;
mod error;
mod simulation;

use arena::ArenaConfig;
use ballistics_core::config::load_shell_configs;
use ballistics_core::ShellRegistry;
use clap::Parser;
use error::SimError;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use simulation::Skirmish;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "skirmish_sim", about = "Run a scripted tank skirmish")]
struct Args {
    /// Arena TOML; the built-in duel is used when omitted
    #[arg(short, long)]
    arena: Option<PathBuf>,

    /// Shell catalogue TOML replacing the built-in shells
    #[arg(short, long)]
    shells: Option<PathBuf>,

    /// Simulation steps per second
    #[arg(long, default_value_t = 60)]
    tick_rate: u32,

    /// Maximum match length in seconds
    #[arg(short, long, default_value_t = 20.0)]
    duration: f32,

    /// Seed for muzzle spread
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Print events as JSON lines
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn run(args: &Args) -> Result<(), SimError> {
    let config = match &args.arena {
        Some(path) => ArenaConfig::load(path)?,
        None => ArenaConfig::duel()?,
    };
    let shells = match &args.shells {
        Some(path) => load_shell_configs(path)?,
        None => ShellRegistry::with_defaults(),
    };
    info!(
        tanks = config.tanks.len(),
        walls = config.walls.len(),
        volleys = config.volleys.len(),
        shells = ?shells.ids(),
        "arena loaded"
    );

    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let report = Skirmish::new(&config).run(&shells, args.tick_rate, args.duration, &mut rng)?;

    for event in &report.events {
        if args.json {
            match event.to_json() {
                Ok(line) => println!("{line}"),
                Err(e) => error!(error = %e, "failed to encode event"),
            }
        } else {
            println!("[{:>6.2}s] {}", event.time(), event.summary());
        }
    }

    if !args.json {
        println!();
        println!("{}", report.summary());
        for (id, name) in &report.survivors {
            println!("  survivor: {name} ({id})");
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "skirmish failed");
            ExitCode::FAILURE
        }
    }
}
