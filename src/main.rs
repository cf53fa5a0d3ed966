//! `qteleport` command-line interface
//!
//! Builds the teleportation circuit, runs it on the built-in simulator,
//! writes the presentation artifacts and prints the success-rate report.

use anyhow::{Context, Result, bail};
use clap::Parser;
use qteleport::artifacts::{ensure_output_dir, write_all};
use qteleport::core::{DEFAULT_OUTPUT_DIR, DEFAULT_SHOTS, SECRET_ANGLE};
use qteleport::{Simulator, TeleportConfig, run_experiment};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Quantum teleportation on an ideal state-vector simulator
#[derive(Parser)]
#[command(name = "qteleport")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Preparation angle of the message qubit, in radians
    #[arg(long, default_value_t = SECRET_ANGLE, allow_hyphen_values = true)]
    angle: f64,

    /// Number of shots
    #[arg(short, long, default_value_t = DEFAULT_SHOTS)]
    shots: u32,

    /// Directory the circuit diagram and histogram are written to
    #[arg(short, long, env = "QTELEPORT_OUTPUT_DIR", default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Seed for reproducible runs
    #[arg(long, env = "QTELEPORT_SEED")]
    seed: Option<u64>,

    /// Skip writing artifacts
    #[arg(long)]
    no_artifacts: bool,

    /// Exit with an error when the run classifies as failed
    #[arg(long)]
    strict: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    let config = TeleportConfig::default()
        .with_angle(cli.angle)
        .with_shots(cli.shots)
        .with_output_dir(cli.output_dir)
        .with_seed(cli.seed);
    config.validate().context("Invalid configuration")?;

    if !cli.no_artifacts {
        ensure_output_dir(&config.output_dir)?;
    }

    let simulator = match config.seed {
        Some(seed) => Simulator::with_seed(seed),
        None => Simulator::new(),
    };
    let outcome = run_experiment(&config, &simulator).context("Teleportation experiment failed")?;

    if !cli.no_artifacts {
        let paths = write_all(&outcome.circuit, &outcome.histogram, &config.output_dir)?;
        for path in paths.iter() {
            println!("Saved {}", path.display());
        }
    }

    println!("{}", outcome.report);

    if cli.strict && !outcome.report.is_successful() {
        bail!(
            "Teleportation failed: success ratio {:.4} is not above the threshold",
            outcome.report.ratio
        );
    }
    Ok(())
}
