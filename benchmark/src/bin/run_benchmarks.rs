// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! CLI tool to run the reflection benchmark and print a JSON report.

use std::path::PathBuf;

use clap::Parser;
use reflectbench_benchmark::{run_reflection_suite, ConfigLoader, HarnessConfig, JsonReporter};
use tracing::info;

#[derive(Parser)]
#[command(name = "run_benchmarks")]
#[command(about = "Measure hot and cold path reflection latency and print a JSON report")]
struct Args {
    /// YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Calibration threshold in milliseconds
    #[arg(long)]
    min_time_ms: Option<u64>,

    /// Upper bound on any calibrated iteration count
    #[arg(long)]
    max_iters: Option<u64>,

    /// Run in quick mode (5ms calibration threshold)
    #[arg(long)]
    quick: bool,

    /// Also save the report into this directory
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Leave the host snapshot out of the report
    #[arg(long)]
    no_system_info: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn resolve_config(args: &Args) -> anyhow::Result<HarnessConfig> {
    let mut config = match &args.config {
        Some(path) => ConfigLoader::load_file(path)?,
        None => HarnessConfig::default(),
    };

    if args.quick {
        config = config.with_min_duration_ms(5)?;
    }
    if let Some(ms) = args.min_time_ms {
        config = config.with_min_duration_ms(ms)?;
    }
    if let Some(iterations) = args.max_iters {
        config = config.with_max_iterations(iterations)?;
    }
    if args.no_system_info {
        config.collect_system_info = false;
    }

    Ok(config)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Logs go to stderr; stdout carries only the report
    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr)
        .init();

    let config = resolve_config(&args)?;
    info!(
        min_duration_ms = config.min_duration_ms(),
        max_iterations = config.max_iterations,
        "starting reflection benchmark"
    );

    // A registration failure is reported once, by the returned error
    let report = run_reflection_suite(&config)?;

    JsonReporter::write_to(std::io::stdout().lock(), &report)?;

    if let Some(dir) = &args.output {
        let path = JsonReporter::new(dir)?.save(&report)?;
        info!(path = %path.display(), "benchmark report saved");
    }

    Ok(())
}
