// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! JSON report emission.
//!
//! Reports go to stdout for piping into a renderer, and can also be saved to
//! timestamped files for later comparison. Label escaping follows JSON rules
//! as implemented by `serde_json`.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::metrics::BenchmarkReport;

/// Errors that can occur during report generation.
#[derive(Debug, Error)]
pub enum ReporterError {
    #[error("Report I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize report: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// JSON reporter for benchmark results.
pub struct JsonReporter {
    /// Output directory for saved reports
    output_dir: PathBuf,
}

impl JsonReporter {
    /// Create a new JSON reporter with the specified output directory.
    pub fn new(output_dir: impl AsRef<Path>) -> Result<Self, ReporterError> {
        let output_dir = output_dir.as_ref().to_path_buf();
        fs::create_dir_all(&output_dir)?;
        Ok(Self { output_dir })
    }

    /// Write a pretty-printed report followed by a newline.
    pub fn write_to<W: Write>(writer: W, report: &BenchmarkReport) -> Result<(), ReporterError> {
        let mut writer = BufWriter::new(writer);
        serde_json::to_writer_pretty(&mut writer, report)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }

    /// Render a report as a pretty-printed JSON string.
    pub fn to_json(report: &BenchmarkReport) -> Result<String, ReporterError> {
        Ok(serde_json::to_string_pretty(report)?)
    }

    /// Parse a report from any reader.
    pub fn read_from<R: Read>(reader: R) -> Result<BenchmarkReport, ReporterError> {
        Ok(serde_json::from_reader(BufReader::new(reader))?)
    }

    /// Save a report to `reflection_<timestamp>.json` in the output directory.
    ///
    /// Returns the path to the created file.
    pub fn save(&self, report: &BenchmarkReport) -> Result<PathBuf, ReporterError> {
        let timestamp = report.meta.timestamp.format("%Y-%m-%dT%H-%M-%SZ");
        let filename = format!("reflection_{}.json", timestamp);
        let filepath = self.output_dir.join(&filename);

        let file = File::create(&filepath)?;
        Self::write_to(file, report)?;

        tracing::debug!(path = %filepath.display(), "report saved");
        Ok(filepath)
    }

    /// Load an existing report from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<BenchmarkReport, ReporterError> {
        let file = File::open(path)?;
        Self::read_from(file)
    }
}
