// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Result types for the reflection benchmark and their JSON shape.
//!
//! Only `ns_per_op` of a [`BenchmarkResult`] is serialized. Iteration counts
//! and checksums exist to keep the measured work alive and are logged, not
//! reported.

use chrono::{DateTime, Utc};
use reflectbench_core::{AccessPath, Mechanism};
use serde::{Deserialize, Serialize};
use sysinfo::System;

/// Outcome of running one operation a fixed number of times.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkResult {
    /// Average wall-clock nanoseconds per operation
    pub ns_per_op: f64,
    /// Number of times the operation ran
    #[serde(skip)]
    pub iterations: u64,
    /// Sum of every value the operation returned
    #[serde(skip)]
    pub checksum: f64,
}

impl BenchmarkResult {
    pub fn new(ns_per_op: f64, iterations: u64, checksum: f64) -> Self {
        Self {
            ns_per_op,
            iterations,
            checksum,
        }
    }

    /// Total measured time reconstructed from the average.
    pub fn total_ns(&self) -> f64 {
        self.ns_per_op * self.iterations as f64
    }
}

/// One operation measured with both mechanisms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    /// Operation label, e.g. `get a`
    pub operation: String,
    pub reflect: BenchmarkResult,
    pub meta: BenchmarkResult,
}

impl ComparisonRow {
    pub fn new(
        operation: impl Into<String>,
        reflect: BenchmarkResult,
        meta: BenchmarkResult,
    ) -> Self {
        Self {
            operation: operation.into(),
            reflect,
            meta,
        }
    }

    /// Timings of `mechanism` for this row.
    pub fn result(&self, mechanism: Mechanism) -> &BenchmarkResult {
        match mechanism {
            Mechanism::Reflect => &self.reflect,
            Mechanism::Meta => &self.meta,
        }
    }

    /// Faster mechanism for this row. Ties go to meta.
    pub fn winner(&self) -> Mechanism {
        if self.reflect.ns_per_op < self.meta.ns_per_op {
            Mechanism::Reflect
        } else {
            Mechanism::Meta
        }
    }

    /// How many times faster the winner is (>= 1.0).
    pub fn speedup(&self) -> f64 {
        let (fast, slow) = match self.winner() {
            Mechanism::Reflect => (self.reflect.ns_per_op, self.meta.ns_per_op),
            Mechanism::Meta => (self.meta.ns_per_op, self.reflect.ns_per_op),
        };
        if fast > 0.0 {
            slow / fast
        } else if slow > 0.0 {
            f64::INFINITY
        } else {
            1.0
        }
    }
}

/// Rows measured under one access path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultGroup {
    pub name: AccessPath,
    pub description: String,
    pub rows: Vec<ComparisonRow>,
}

impl ResultGroup {
    pub fn new(path: AccessPath) -> Self {
        Self {
            name: path,
            description: path.description().to_string(),
            rows: Vec::new(),
        }
    }

    /// Number of rows won by `mechanism`.
    pub fn wins(&self, mechanism: Mechanism) -> usize {
        self.rows.iter().filter(|r| r.winner() == mechanism).count()
    }
}

/// Harness settings echoed into the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarnessSettings {
    pub min_duration_ms: u64,
    pub max_iterations: u64,
}

/// System information captured at benchmark time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemInfo {
    /// Operating system name
    pub os: String,
    /// OS version
    pub os_version: String,
    /// Kernel version (Linux)
    pub kernel_version: Option<String>,
    /// CPU model name
    pub cpu_model: String,
    /// Number of logical CPUs
    pub cpu_cores: usize,
    /// Hostname
    pub hostname: String,
}

impl SystemInfo {
    /// Collect current system information.
    pub fn collect() -> Self {
        let mut sys = System::new();
        sys.refresh_cpu();

        Self {
            os: System::name().unwrap_or_else(|| "Unknown".to_string()),
            os_version: System::os_version().unwrap_or_else(|| "Unknown".to_string()),
            kernel_version: System::kernel_version(),
            cpu_model: sys
                .cpus()
                .first()
                .map(|cpu| cpu.brand().to_string())
                .unwrap_or_else(|| "Unknown".to_string()),
            cpu_cores: sys.cpus().len(),
            hostname: System::host_name().unwrap_or_else(|| "Unknown".to_string()),
        }
    }
}

/// Report header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMeta {
    /// Suite identifier
    pub suite: String,
    /// Harness version
    pub version: String,
    /// When the run started
    pub timestamp: DateTime<Utc>,
    /// Unique id of this run
    pub run_id: String,
    /// Free-form note shown by renderers
    #[serde(default)]
    pub note: String,
    pub harness: HarnessSettings,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_info: Option<SystemInfo>,
}

/// Complete benchmark report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkReport {
    pub meta: ReportMeta,
    pub groups: Vec<ResultGroup>,
}

impl BenchmarkReport {
    /// Create an empty report stamped with the current time and a fresh run id.
    pub fn new(harness: HarnessSettings, system_info: Option<SystemInfo>) -> Self {
        Self {
            meta: ReportMeta {
                suite: "reflectbench".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                timestamp: Utc::now(),
                run_id: uuid::Uuid::new_v4().to_string(),
                note: "reflect = bevy_reflect; meta = hashed-id meta registry".to_string(),
                harness,
                system_info,
            },
            groups: Vec::new(),
        }
    }

    /// Add a group to the report.
    pub fn add_group(&mut self, group: ResultGroup) {
        self.groups.push(group);
    }

    pub fn group(&self, path: AccessPath) -> Option<&ResultGroup> {
        self.groups.iter().find(|g| g.name == path)
    }

    /// Group and row labels, in order. Timings excluded.
    pub fn shape(&self) -> Vec<(AccessPath, Vec<String>)> {
        self.groups
            .iter()
            .map(|g| {
                let rows = g.rows.iter().map(|r| r.operation.clone()).collect();
                (g.name, rows)
            })
            .collect()
    }
}
