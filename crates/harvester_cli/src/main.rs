//! Command-line entry point: parse arguments, run one harvester, emit its report.
mod cli;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use engine_logging::{engine_error, engine_info, LogDestination};
use harvester_core::Mode;
use harvester_engine::{Engine, HarvestConfig, HarvestOutcome, LogEventSink};
use log::LevelFilter;

use crate::cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let root = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let config = HarvestConfig::default_with_root(root);
    engine_logging::initialize(LogDestination::Both, LevelFilter::Info, &config.logs_dir());

    match run(cli, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            engine_error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, config: HarvestConfig) -> anyhow::Result<()> {
    engine_info!("Harvester started");
    engine_info!("Command line arguments: {:?}", cli);

    let results_dir = config.results_dir();
    let engine = Engine::new(config).context("failed to set up the HTTP client")?;
    if cli.clear_cache {
        engine
            .clear_cache()
            .context("failed to clear the HTTP cache")?;
    }

    let mode = Mode::from(cli.mode);
    let outcome = engine
        .run_blocking(mode, &LogEventSink)
        .with_context(|| format!("{mode} harvest failed"))?;

    if let HarvestOutcome::Report(table) = outcome {
        output::control_output(&table, mode, cli.output, &results_dir)
            .context("failed to emit the report")?;
    }
    engine_info!("Harvester finished");
    Ok(())
}
