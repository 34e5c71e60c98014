//! Tandem queue simulator CLI
//!
//! Runs independent replications of a two-stage queueing network and writes
//! the report, optionally with a per-event debug trace and machine-readable
//! exports.
//!
//! # Example
//!
//! ```bash
//! # Classic parameter file: interarrival, service 1, service 2, run length
//! tandem-sim --config tandem.in
//!
//! # Travel time between the stages, uniform on [0, 2) minutes
//! tandem-sim --config tandem.in --transit-bound 2 --report tandem.out
//!
//! # Full JSON configuration with exports and a debug trace
//! tandem-sim --config tandem.json --json results.json --csv results.csv --debug-trace debug.out
//! ```

use clap::Parser;
use des_core::{init_simulation_logging_with_level, SeededVariates};
use des_metrics::{export_csv, export_json, RunResults};
use des_tandem::{DebugTrace, ReplicationDriver, TandemConfig, TandemError};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

/// Tandem queue simulator
///
/// Without `--config` the built-in defaults are used: interarrival 1.0,
/// both services 0.5 and a run length of 1000 minutes.
#[derive(Parser, Debug)]
#[command(name = "tandem-sim")]
#[command(version, about, long_about = None)]
struct Args {
    /// Parameter file: JSON (`.json`) or four whitespace-separated numbers
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of independent replications
    #[arg(short, long)]
    replications: Option<usize>,

    /// Seed of the random stream shared by all replications
    #[arg(long)]
    seed: Option<u64>,

    /// Largest number of customers either waiting line may hold
    #[arg(long)]
    queue_limit: Option<usize>,

    /// Model travel between the stages, uniform on [0, bound) minutes
    #[arg(long)]
    transit_bound: Option<f64>,

    /// Feed stage 2 directly even if the configuration has a transit link
    #[arg(long, conflicts_with = "transit_bound")]
    no_transit: bool,

    /// Simulated minutes per replication
    #[arg(long)]
    run_length: Option<f64>,

    /// Write the report here instead of standard output
    #[arg(long)]
    report: Option<PathBuf>,

    /// Write the per-event debug trace here
    #[arg(long)]
    debug_trace: Option<PathBuf>,

    /// Export reports and summary as JSON
    #[arg(long)]
    json: Option<PathBuf>,

    /// Export one CSV row per replication
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Log level: trace, debug, info, warn or error (RUST_LOG overrides)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_simulation_logging_with_level(&args.log_level);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "Simulation failed");
            eprintln!("tandem-sim: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), TandemError> {
    let config = resolve_config(args)?;
    config.validate()?;
    info!(
        mean_interarrival = config.mean_interarrival,
        mean_service_stage1 = config.mean_service_stage1,
        mean_service_stage2 = config.mean_service_stage2,
        run_length = config.run_length,
        transit_bound = ?config.transit_bound,
        replications = config.replications,
        seed = config.seed,
        "Starting tandem simulation"
    );

    let variates = SeededVariates::new(config.seed);
    let mut driver = ReplicationDriver::new(config, variates)?;

    let results = match &args.debug_trace {
        Some(path) => {
            let mut trace = DebugTrace::create(path).map_err(|source| TandemError::Output {
                path: path.clone(),
                source,
            })?;
            let results = driver.run_traced(&mut trace)?;
            trace.finish().map_err(TandemError::Trace)?;
            results
        }
        None => driver.run()?,
    };

    write_outputs(args, &results)
}

fn resolve_config(args: &Args) -> Result<TandemConfig, TandemError> {
    let mut config = match &args.config {
        Some(path) => TandemConfig::load(path)?,
        None => TandemConfig::default(),
    };
    if let Some(replications) = args.replications {
        config = config.with_replications(replications);
    }
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    if let Some(queue_limit) = args.queue_limit {
        config = config.with_queue_limit(queue_limit);
    }
    if let Some(bound) = args.transit_bound {
        config = config.with_transit_bound(bound);
    }
    if args.no_transit {
        config = config.without_transit();
    }
    if let Some(run_length) = args.run_length {
        config = config.with_run_length(run_length);
    }
    Ok(config)
}

fn write_outputs(args: &Args, results: &RunResults) -> Result<(), TandemError> {
    match &args.report {
        Some(path) => {
            std::fs::write(path, results.to_string()).map_err(|source| TandemError::Output {
                path: path.clone(),
                source,
            })?;
            info!(path = %path.display(), "Report written");
        }
        None => print!("{results}"),
    }
    if let Some(path) = &args.json {
        export_json(results, path, true)?;
    }
    if let Some(path) = &args.csv {
        export_csv(results, path)?;
    }
    Ok(())
}
