// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Render a reflection benchmark report as comparison tables.

use std::path::PathBuf;

use clap::Parser;
use reflectbench_benchmark::render::ReportTable;
use reflectbench_benchmark::JsonReporter;

#[derive(Parser)]
#[command(name = "render_table")]
#[command(about = "Render a reflection benchmark JSON report as tables")]
struct Args {
    /// Report file (reads stdin when omitted)
    input: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter("warn")
        .with_writer(std::io::stderr)
        .init();

    let report = match &args.input {
        Some(path) => JsonReporter::load(path)?,
        None => JsonReporter::read_from(std::io::stdin().lock())?,
    };

    print!("{}", ReportTable(&report));
    Ok(())
}
