// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! reflectbench Benchmarking Framework
//!
//! Measures the per-operation latency of two runtime reflection mechanisms
//! against the same sample type and reports the numbers side by side.
//!
//! # Access Paths
//!
//! - **Hot**: member handles are resolved once and reused on every call
//! - **Cold**: the member is looked up by its runtime name on every call
//!
//! # Operations
//!
//! Field get, field set, a value-returning method call and a mutating method
//! call, each measured with `bevy_reflect` and with the hashed-id meta
//! registry.
//!
//! # Data Output
//!
//! Results are emitted as JSON: a `meta` header plus `hot` and `cold` groups
//! of rows, each row carrying `ns_per_op` for both mechanisms.

pub mod config;
pub mod harness;
pub mod metrics;
pub mod render;
pub mod reporter;
pub mod suite;

pub use config::{ConfigLoader, HarnessConfig};
pub use harness::BenchmarkHarness;
pub use metrics::{
    BenchmarkReport, BenchmarkResult, ComparisonRow, HarnessSettings, ReportMeta, ResultGroup,
    SystemInfo,
};
pub use reporter::{JsonReporter, ReporterError};
pub use suite::{
    run_reflection_suite, run_with_registries, OperationPair, ReflectionSuite, OPERATION_LABELS,
};
