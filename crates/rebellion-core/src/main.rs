//! Rebellion Simulation Runner
//!
//! Loads the configuration, runs the model for the requested number of
//! ticks, and writes the per-tick census CSV plus a run summary sidecar.

use clap::Parser;
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use rebellion_core::config::{SimConfig, DEFAULT_CONFIG_PATH};
use rebellion_core::output::CsvReportWriter;
use rebellion_core::{RebellionManager, TickSink};

/// Command line arguments for the simulation
#[derive(Parser, Debug)]
#[command(name = "rebellion_sim")]
#[command(about = "An agent-based model of civil unrest")]
struct Args {
    /// Configuration file path
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Random seed, overriding the configured one
    #[arg(long)]
    seed: Option<u64>,

    /// Number of ticks to simulate, overriding the configured default
    #[arg(long)]
    ticks: Option<u64>,

    /// Output CSV report path
    #[arg(long, default_value = "report.csv")]
    report: PathBuf,

    /// Output run summary path
    #[arg(long, default_value = "summary.json")]
    summary: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut config = SimConfig::load_or_default(&args.config);
    if let Some(seed) = args.seed {
        config.run.seed = seed;
    }
    let ticks = args.ticks.unwrap_or(config.run.default_ticks);

    println!("Rebellion Simulation");
    println!("====================");
    println!("Seed: {}", config.run.seed);
    println!("Ticks: {}", ticks);
    println!(
        "Grid: {}x{}, {} citizens, {} cops",
        config.grid.width, config.grid.height, config.population.citizens, config.population.cops
    );
    println!();

    let mut manager = RebellionManager::new();
    manager.setup(config)?;

    let mut report = CsvReportWriter::new(&args.report)?;

    // Tick-0 baseline row so the report starts from the initial census.
    let baseline = manager.observe()?;
    report.record_tick(&baseline.counts)?;

    manager.run(ticks, &mut report)?;
    report.flush()?;

    let summary = manager.summary()?;
    fs::write(&args.summary, summary.to_json_pretty()?)?;

    let snapshot = manager.observe()?;
    println!(
        "Simulation complete. Ran {} ticks ({} active, {} quiescent, {} jailed).",
        ticks, snapshot.counts.active, snapshot.counts.quiescent, snapshot.counts.jailed
    );
    println!("Wrote {} rows to {}.", report.rows_written(), args.report.display());
    println!("Wrote summary to {}.", args.summary.display());

    Ok(())
}
