//! # Servotwin CLI
//!
//! Drives the closed-loop actuator / digital-twin safety simulation in
//! phases:
//!
//! - `step` — step-response characterization of the real actuator.
//! - `fault` — full safety run with drift injection; logs the fault
//!   and safety-state timeline.
//! - `verify` — full run plus requirement verdicts and the FMEA
//!   report, with optional JSON export.
//!
//! Parameters default to the built-in reference scenario and can be
//! overridden with a TOML file via `--config`.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing::{Level, error, info};
use tracing_subscriber::EnvFilter;

use servotwin_common::config::SimConfig;

mod export;
mod phases;

/// Servotwin — actuator / digital-twin safety simulation
#[derive(Parser, Debug)]
#[command(name = "servotwin")]
#[command(version)]
#[command(about = "Closed-loop safety simulation with fault injection and verification")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Path to a simulation configuration TOML overriding the built-in
    /// reference scenario.
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging (DEBUG level).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format.
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Step-response run of the real actuator alone.
    Step,
    /// Closed-loop safety run with drift injection.
    Fault,
    /// Closed-loop run plus requirement verdicts and FMEA report.
    Verify {
        /// Directory for JSON artifacts (trace, report, FMEA).
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,
    },
}

fn main() {
    let args = Args::parse();
    setup_tracing(&args);

    info!("Servotwin v{} starting...", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(&args) {
        error!("FATAL: {e}");
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &args.config {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            SimConfig::load(path)?
        }
        None => SimConfig::default(),
    };
    config.validate()?;
    info!(
        "Config OK: dt={}s, duration={}s, reference={}deg",
        config.run.dt, config.run.duration, config.run.reference_deg
    );

    match &args.command {
        Command::Step => phases::run_step(&config),
        Command::Fault => phases::run_fault(&config),
        Command::Verify { out } => phases::run_verify(&config, out.as_deref()),
    }
}

fn setup_tracing(args: &Args) {
    let level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    if args.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .compact()
            .init();
    }
}
