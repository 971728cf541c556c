// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! YAML configuration for the measurement harness.
//!
//! Every field is optional and falls back to the built-in defaults. Values are
//! validated before any measurement starts; an out-of-range value is a
//! HardValidationError.

use std::path::Path;
use std::time::Duration;

use reflectbench_core::{HardValidationError, ReflectBenchError, ReflectBenchResult};
use serde::Deserialize;

/// Lower bound on the calibration threshold.
pub const MIN_DURATION_MS: u64 = 1;
/// Upper bound on the calibration threshold (10 seconds).
pub const MAX_DURATION_MS: u64 = 10_000;

/// Raw harness configuration as parsed from YAML.
#[derive(Debug, Deserialize)]
struct RawHarnessConfig {
    #[serde(default = "default_min_duration_ms")]
    min_duration_ms: u64,
    #[serde(default = "default_max_iterations")]
    max_iterations: u64,
    #[serde(default = "default_collect_system_info")]
    collect_system_info: bool,
}

fn default_min_duration_ms() -> u64 {
    60
}

fn default_max_iterations() -> u64 {
    1 << 32
}

fn default_collect_system_info() -> bool {
    true
}

impl Default for RawHarnessConfig {
    fn default() -> Self {
        Self {
            min_duration_ms: default_min_duration_ms(),
            max_iterations: default_max_iterations(),
            collect_system_info: default_collect_system_info(),
        }
    }
}

/// Raw root configuration file.
#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    #[serde(default)]
    harness: RawHarnessConfig,
}

/// Validated harness configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct HarnessConfig {
    /// Calibration stops once a batch runs longer than this
    pub min_duration: Duration,
    /// Hard cap on any calibrated iteration count
    pub max_iterations: u64,
    /// Include a host snapshot in the report
    pub collect_system_info: bool,
}

impl HarnessConfig {
    /// Build a configuration from raw values, validating each one.
    pub fn validated(
        min_duration_ms: u64,
        max_iterations: u64,
        collect_system_info: bool,
    ) -> ReflectBenchResult<Self> {
        if !(MIN_DURATION_MS..=MAX_DURATION_MS).contains(&min_duration_ms) {
            return Err(HardValidationError::InvalidFieldValue {
                field: "min_duration_ms",
                value: min_duration_ms.to_string(),
                reason: format!(
                    "Must be between {} and {} ms",
                    MIN_DURATION_MS, MAX_DURATION_MS
                ),
            }
            .into());
        }

        if max_iterations == 0 {
            return Err(HardValidationError::InvalidFieldValue {
                field: "max_iterations",
                value: max_iterations.to_string(),
                reason: "Must be at least 1".to_string(),
            }
            .into());
        }

        Ok(Self {
            min_duration: Duration::from_millis(min_duration_ms),
            max_iterations,
            collect_system_info,
        })
    }

    /// Replace the calibration threshold, re-validating it.
    pub fn with_min_duration_ms(self, min_duration_ms: u64) -> ReflectBenchResult<Self> {
        Self::validated(min_duration_ms, self.max_iterations, self.collect_system_info)
    }

    /// Replace the iteration cap, re-validating it.
    pub fn with_max_iterations(self, max_iterations: u64) -> ReflectBenchResult<Self> {
        Self::validated(
            self.min_duration_ms(),
            max_iterations,
            self.collect_system_info,
        )
    }

    pub fn min_duration_ms(&self) -> u64 {
        self.min_duration.as_millis() as u64
    }
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            min_duration: Duration::from_millis(default_min_duration_ms()),
            max_iterations: default_max_iterations(),
            collect_system_info: default_collect_system_info(),
        }
    }
}

/// Configuration loader with strict validation.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and validate configuration from a YAML file.
    pub fn load_file(path: impl AsRef<Path>) -> ReflectBenchResult<HarnessConfig> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ReflectBenchError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| ReflectBenchError::Io {
            context: "reading config file",
            source: e,
        })?;

        Self::load_string(&content)
    }

    /// Load and validate configuration from a YAML string.
    pub fn load_string(content: &str) -> ReflectBenchResult<HarnessConfig> {
        // An empty document deserializes to unit, not to a map
        if content.trim().is_empty() {
            return Ok(HarnessConfig::default());
        }

        let raw: RawConfig =
            serde_yaml::from_str(content).map_err(|e| ReflectBenchError::ConfigParse {
                message: format!("YAML parse error: {}", e),
            })?;

        let harness = raw.harness;
        HarnessConfig::validated(
            harness.min_duration_ms,
            harness.max_iterations,
            harness.collect_system_info,
        )
    }
}
