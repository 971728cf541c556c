// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Calibrated timing harness.
//!
//! Operations are zero-argument closures returning an `f64`. Every returned
//! value is summed into a checksum that goes through `black_box`, so the
//! optimizer cannot drop the work being timed.

use std::hint::black_box;
use std::time::{Duration, Instant};

use crate::config::HarnessConfig;
use crate::metrics::{BenchmarkResult, HarnessSettings};

/// A benchmark harness that sizes and times loops of an operation.
#[derive(Debug, Clone)]
pub struct BenchmarkHarness {
    /// Calibration stops once a batch takes longer than this
    min_duration: Duration,
    /// Calibrated counts never exceed this
    max_iterations: u64,
}

impl BenchmarkHarness {
    /// Create a new benchmark harness with default settings.
    pub fn new() -> Self {
        Self::from_config(&HarnessConfig::default())
    }

    pub fn from_config(config: &HarnessConfig) -> Self {
        Self {
            min_duration: config.min_duration,
            max_iterations: config.max_iterations.max(1),
        }
    }

    /// Set the calibration threshold.
    pub fn min_duration(mut self, duration: Duration) -> Self {
        self.min_duration = duration;
        self
    }

    /// Set the iteration cap. Zero is raised to one.
    pub fn max_iterations(mut self, iterations: u64) -> Self {
        self.max_iterations = iterations.max(1);
        self
    }

    pub fn settings(&self) -> HarnessSettings {
        HarnessSettings {
            min_duration_ms: self.min_duration.as_millis() as u64,
            max_iterations: self.max_iterations,
        }
    }

    /// Find an iteration count for `operation`.
    ///
    /// Doubles from 1 until a batch takes longer than the threshold and
    /// returns that count, or the cap if the cap is reached first. The result
    /// is always in `1..=max_iterations`.
    pub fn calibrate<F>(&self, mut operation: F) -> u64
    where
        F: FnMut() -> f64,
    {
        let mut iterations: u64 = 1;
        loop {
            let timer = Timer::start();
            let mut sink = 0.0;
            for _ in 0..iterations {
                sink += black_box(operation());
            }
            let elapsed = timer.elapsed();
            black_box(sink);

            if elapsed > self.min_duration {
                return iterations;
            }
            if iterations >= self.max_iterations {
                return self.max_iterations;
            }
            iterations = iterations.saturating_mul(2).min(self.max_iterations);
        }
    }

    /// Run `operation` exactly `iterations` times and report the average.
    ///
    /// A count of zero is treated as one.
    pub fn run<F>(&self, mut operation: F, iterations: u64) -> BenchmarkResult
    where
        F: FnMut() -> f64,
    {
        let iterations = iterations.max(1);

        let timer = Timer::start();
        let mut sink = 0.0;
        for _ in 0..iterations {
            sink += black_box(operation());
        }
        let elapsed_ns = timer.stop();

        BenchmarkResult::new(
            elapsed_ns as f64 / iterations as f64,
            iterations,
            black_box(sink),
        )
    }
}

impl Default for BenchmarkHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// Timer for measuring a batch of operations.
pub struct Timer {
    start: Instant,
}

impl Timer {
    /// Start a new timer.
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Stop the timer and return elapsed nanoseconds.
    pub fn stop(self) -> u128 {
        self.start.elapsed().as_nanos()
    }

    /// Stop the timer and return elapsed duration.
    pub fn elapsed(self) -> Duration {
        self.start.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_calibrate_slow_operation_needs_one_iteration() {
        let harness = BenchmarkHarness::new().min_duration(Duration::from_millis(1));
        let iterations = harness.calibrate(|| {
            thread::sleep(Duration::from_millis(2));
            1.0
        });
        assert_eq!(iterations, 1);
    }

    #[test]
    fn test_calibrate_hits_cap() {
        let harness = BenchmarkHarness::new()
            .min_duration(Duration::from_secs(10))
            .max_iterations(1024);
        let iterations = harness.calibrate(|| 1.0);
        assert_eq!(iterations, 1024);
    }

    #[test]
    fn test_calibrate_cap_not_power_of_two() {
        let harness = BenchmarkHarness::new()
            .min_duration(Duration::from_secs(10))
            .max_iterations(1000);
        assert_eq!(harness.calibrate(|| 1.0), 1000);
    }

    #[test]
    fn test_calibrate_is_power_of_two_within_bounds() {
        let harness = BenchmarkHarness::new()
            .min_duration(Duration::from_millis(5))
            .max_iterations(1 << 20);
        let iterations = harness.calibrate(|| {
            thread::sleep(Duration::from_micros(200));
            1.0
        });
        assert!(iterations >= 1);
        assert!(iterations <= 1 << 20);
        assert!(iterations.is_power_of_two());
    }

    #[test]
    fn test_calibrate_never_zero() {
        let harness = BenchmarkHarness::new()
            .min_duration(Duration::from_secs(10))
            .max_iterations(0);
        assert_eq!(harness.calibrate(|| 0.0), 1);
    }

    #[test]
    fn test_run_counts_every_call() {
        let harness = BenchmarkHarness::new();
        let mut calls = 0u64;
        let result = harness.run(
            || {
                calls += 1;
                1.0
            },
            100,
        );
        assert_eq!(calls, 100);
        assert_eq!(result.iterations, 100);
        assert_eq!(result.checksum, 100.0);
    }

    #[test]
    fn test_run_zero_iterations_runs_once() {
        let harness = BenchmarkHarness::new();
        let result = harness.run(|| 2.0, 0);
        assert_eq!(result.iterations, 1);
        assert_eq!(result.checksum, 2.0);
    }

    #[test]
    fn test_run_average_matches_wall_clock() {
        let harness = BenchmarkHarness::new();
        let outer = Timer::start();
        let result = harness.run(
            || {
                thread::sleep(Duration::from_millis(1));
                1.0
            },
            20,
        );
        let outer_ns = outer.stop() as f64;

        // Each iteration sleeps at least 1ms
        assert!(result.ns_per_op >= 1_000_000.0);
        assert!(result.total_ns() >= 20_000_000.0);
        assert!(result.total_ns() <= outer_ns);
    }

    #[test]
    fn test_timer() {
        let timer = Timer::start();
        thread::sleep(Duration::from_millis(10));
        let elapsed = timer.stop();

        assert!(elapsed >= 10_000_000, "Elapsed {} < 10ms", elapsed);
    }

    #[test]
    fn test_settings_echo_config() {
        let config = HarnessConfig::validated(5, 4096, false).unwrap();
        let settings = BenchmarkHarness::from_config(&config).settings();
        assert_eq!(settings.min_duration_ms, 5);
        assert_eq!(settings.max_iterations, 4096);
    }
}
