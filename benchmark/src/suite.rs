// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! The measured operations and the order they run in.
//!
//! Each operation family (field get, field set, two method calls) exists in a
//! hot and a cold flavour for both mechanisms. All operations share one
//! [`Payload`], handed to them as `&mut Payload` one call at a time.

use std::hint::black_box;

use bevy_reflect::func::ArgList;
use bevy_reflect::Struct;
use reflectbench_core::reflect::{call, read_field, write_field};
use reflectbench_core::{
    hashed, members, AccessPath, MetaAny, MetaHandles, Payload, ReflectBenchResult,
    ReflectHandles, RegistrationError, Registries,
};
use tracing::{debug, info};

use crate::config::HarnessConfig;
use crate::harness::BenchmarkHarness;
use crate::metrics::{BenchmarkReport, ComparisonRow, ResultGroup, SystemInfo};

/// Row labels, in report order.
pub const OPERATION_LABELS: [&str; 4] = ["get a", "set b", "mul(3)", "add_to_b(0.5)"];

/// A single measured operation.
pub type Operation<'s> = Box<dyn FnMut(&mut Payload) -> f64 + 's>;

/// The same logical operation implemented by both mechanisms.
pub struct OperationPair<'s> {
    pub label: &'static str,
    pub reflect: Operation<'s>,
    pub meta: Operation<'s>,
}

/// Member names held as runtime strings so cold lookups cannot be folded.
struct RuntimeNames {
    a: String,
    b: String,
    mul: String,
    add_to_b: String,
}

impl RuntimeNames {
    fn new() -> Self {
        Self {
            a: black_box(members::A.to_string()),
            b: black_box(members::B.to_string()),
            mul: black_box(members::MUL.to_string()),
            add_to_b: black_box(members::ADD_TO_B.to_string()),
        }
    }
}

/// Hot and cold operations over resolved registries.
pub struct ReflectionSuite<'r> {
    registries: &'r Registries,
    reflect: ReflectHandles<'r>,
    meta: MetaHandles<'r>,
    names: RuntimeNames,
}

impl<'r> ReflectionSuite<'r> {
    /// Resolve every handle the suite needs. Fails if either mechanism is
    /// missing the payload type or any measured member.
    pub fn new(registries: &'r Registries) -> Result<Self, RegistrationError> {
        let reflect = registries.resolve_reflect()?;
        let meta = registries.resolve_meta()?;
        Ok(Self {
            registries,
            reflect,
            meta,
            names: RuntimeNames::new(),
        })
    }

    /// Operation pairs for one access path, in [`OPERATION_LABELS`] order.
    pub fn operations(&self, path: AccessPath) -> Vec<OperationPair<'_>> {
        match path {
            AccessPath::Hot => self.hot_operations(),
            AccessPath::Cold => self.cold_operations(),
        }
    }

    fn hot_operations(&self) -> Vec<OperationPair<'_>> {
        let r = self.reflect;
        let m = self.meta;

        vec![
            OperationPair {
                label: OPERATION_LABELS[0],
                reflect: Box::new(move |p: &mut Payload| {
                    read_field::<i32>(p.field_at(r.a)).map_or(0.0, f64::from)
                }),
                meta: Box::new(move |p: &mut Payload| {
                    m.a.get(&*p)
                        .and_then(|v| v.cast::<i32>())
                        .map_or(0.0, f64::from)
                }),
            },
            OperationPair {
                label: OPERATION_LABELS[1],
                reflect: Box::new(move |p: &mut Payload| {
                    write_field(p.field_at_mut(r.b), &1.0_f64);
                    p.b
                }),
                meta: Box::new(move |p: &mut Payload| {
                    m.b.set(p, MetaAny::new(1.0_f64));
                    p.b
                }),
            },
            OperationPair {
                label: OPERATION_LABELS[2],
                reflect: Box::new(move |p: &mut Payload| {
                    let args = ArgList::new().push_ref(&*p).push_owned(3_i32);
                    call::<i32>(r.mul, args).map_or(0.0, f64::from)
                }),
                meta: Box::new(move |p: &mut Payload| {
                    m.mul
                        .invoke(p, &[MetaAny::new(3_i32)])
                        .and_then(|v| v.cast::<i32>())
                        .map_or(0.0, f64::from)
                }),
            },
            OperationPair {
                label: OPERATION_LABELS[3],
                reflect: Box::new(move |p: &mut Payload| {
                    let args = ArgList::new().push_mut(&mut *p).push_owned(0.5_f64);
                    let applied = r.add_to_b.call(args).is_ok();
                    debug_assert!(applied, "add_to_b call rejected");
                    p.b
                }),
                meta: Box::new(move |p: &mut Payload| {
                    let applied = m.add_to_b.invoke(p, &[MetaAny::new(0.5_f64)]).is_some();
                    debug_assert!(applied, "add_to_b invoke rejected");
                    p.b
                }),
            },
        ]
    }

    fn cold_operations(&self) -> Vec<OperationPair<'_>> {
        let registry = &self.registries.reflect;
        let ty = self.meta.ty;
        let names = &self.names;

        vec![
            OperationPair {
                label: OPERATION_LABELS[0],
                reflect: Box::new(move |p: &mut Payload| {
                    read_field::<i32>(p.field(&names.a)).map_or(0.0, f64::from)
                }),
                meta: Box::new(move |p: &mut Payload| {
                    ty.data(hashed(&names.a))
                        .and_then(|data| data.get(&*p))
                        .and_then(|v| v.cast::<i32>())
                        .map_or(0.0, f64::from)
                }),
            },
            OperationPair {
                label: OPERATION_LABELS[1],
                reflect: Box::new(move |p: &mut Payload| {
                    write_field(p.field_mut(&names.b), &1.0_f64);
                    p.b
                }),
                meta: Box::new(move |p: &mut Payload| {
                    if let Some(data) = ty.data(hashed(&names.b)) {
                        data.set(p, MetaAny::new(1.0_f64));
                    }
                    p.b
                }),
            },
            OperationPair {
                label: OPERATION_LABELS[2],
                reflect: Box::new(move |p: &mut Payload| {
                    registry
                        .function(&names.mul)
                        .and_then(|function| {
                            let args = ArgList::new().push_ref(&*p).push_owned(3_i32);
                            call::<i32>(function, args)
                        })
                        .map_or(0.0, f64::from)
                }),
                meta: Box::new(move |p: &mut Payload| {
                    ty.func(hashed(&names.mul))
                        .and_then(|func| func.invoke(p, &[MetaAny::new(3_i32)]))
                        .and_then(|v| v.cast::<i32>())
                        .map_or(0.0, f64::from)
                }),
            },
            OperationPair {
                label: OPERATION_LABELS[3],
                reflect: Box::new(move |p: &mut Payload| {
                    if let Some(function) = registry.function(&names.add_to_b) {
                        let args = ArgList::new().push_mut(&mut *p).push_owned(0.5_f64);
                        let applied = function.call(args).is_ok();
                        debug_assert!(applied, "add_to_b call rejected");
                    }
                    p.b
                }),
                meta: Box::new(move |p: &mut Payload| {
                    if let Some(func) = ty.func(hashed(&names.add_to_b)) {
                        let applied = func.invoke(p, &[MetaAny::new(0.5_f64)]).is_some();
                        debug_assert!(applied, "add_to_b invoke rejected");
                    }
                    p.b
                }),
            },
        ]
    }

    /// Calibrate and measure every operation, hot group first.
    ///
    /// Each family is calibrated once with its reflect variant before anything
    /// is measured, and the count is reused for both mechanisms.
    pub fn run(&self, harness: &BenchmarkHarness, payload: &mut Payload) -> Vec<ResultGroup> {
        let mut hot = self.operations(AccessPath::Hot);
        let mut cold = self.operations(AccessPath::Cold);

        let hot_iterations = calibrate_all(harness, &mut hot, payload);
        let cold_iterations = calibrate_all(harness, &mut cold, payload);

        vec![
            measure_group(AccessPath::Hot, harness, &mut hot, &hot_iterations, payload),
            measure_group(AccessPath::Cold, harness, &mut cold, &cold_iterations, payload),
        ]
    }
}

fn calibrate_all(
    harness: &BenchmarkHarness,
    pairs: &mut [OperationPair<'_>],
    payload: &mut Payload,
) -> Vec<u64> {
    pairs
        .iter_mut()
        .map(|pair| {
            let iterations = harness.calibrate(|| (pair.reflect)(payload));
            debug!(operation = pair.label, iterations, "calibrated");
            iterations
        })
        .collect()
}

fn measure_group(
    path: AccessPath,
    harness: &BenchmarkHarness,
    pairs: &mut [OperationPair<'_>],
    iterations: &[u64],
    payload: &mut Payload,
) -> ResultGroup {
    let mut group = ResultGroup::new(path);

    for (pair, &count) in pairs.iter_mut().zip(iterations) {
        let reflect = harness.run(|| (pair.reflect)(payload), count);
        let meta = harness.run(|| (pair.meta)(payload), count);

        debug!(
            group = %path,
            operation = pair.label,
            iterations = count,
            reflect_checksum = reflect.checksum,
            meta_checksum = meta.checksum,
            "measured"
        );
        info!(
            group = %path,
            operation = pair.label,
            reflect_ns = reflect.ns_per_op,
            meta_ns = meta.ns_per_op,
            "row complete"
        );

        group.rows.push(ComparisonRow::new(pair.label, reflect, meta));
    }

    group
}

/// Register both mechanisms, run the full suite and assemble a report.
pub fn run_reflection_suite(config: &HarnessConfig) -> ReflectBenchResult<BenchmarkReport> {
    let registries = Registries::new()?;
    run_with_registries(&registries, config)
}

/// Run the full suite over already populated registries.
///
/// Every handle is resolved before the harness is built, so a registration
/// problem is returned without anything being timed.
pub fn run_with_registries(
    registries: &Registries,
    config: &HarnessConfig,
) -> ReflectBenchResult<BenchmarkReport> {
    let suite = ReflectionSuite::new(registries)?;
    info!("registration verified for both mechanisms");

    let harness = BenchmarkHarness::from_config(config);
    let system_info = config.collect_system_info.then(SystemInfo::collect);
    let mut report = BenchmarkReport::new(harness.settings(), system_info);

    let mut payload = Payload::default();
    for group in suite.run(&harness, &mut payload) {
        report.add_group(group);
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_labels_in_order() {
        let registries = Registries::new().unwrap();
        let suite = ReflectionSuite::new(&registries).unwrap();

        for path in [AccessPath::Hot, AccessPath::Cold] {
            let labels: Vec<_> = suite.operations(path).iter().map(|p| p.label).collect();
            assert_eq!(labels, OPERATION_LABELS);
        }
    }

    #[test]
    fn test_mechanisms_return_same_values() {
        let registries = Registries::new().unwrap();
        let suite = ReflectionSuite::new(&registries).unwrap();

        for path in [AccessPath::Hot, AccessPath::Cold] {
            for mut pair in suite.operations(path) {
                let mut left = Payload::default();
                let mut right = Payload::default();
                let a = (pair.reflect)(&mut left);
                let b = (pair.meta)(&mut right);
                assert_eq!(a, b, "{} {}", path, pair.label);
                assert_eq!(left, right, "{} {}", path, pair.label);
            }
        }
    }

    #[test]
    fn test_expected_operation_results() {
        let registries = Registries::new().unwrap();
        let suite = ReflectionSuite::new(&registries).unwrap();
        let mut ops = suite.operations(AccessPath::Hot);
        let mut payload = Payload::default();

        assert_eq!((ops[0].reflect)(&mut payload), 1.0);
        assert_eq!((ops[1].meta)(&mut payload), 1.0);
        assert_eq!((ops[2].reflect)(&mut payload), 3.0);
        assert_eq!((ops[3].meta)(&mut payload), 1.5);
    }

    #[test]
    fn test_add_to_b_reaches_payload() {
        let registries = Registries::new().unwrap();
        let suite = ReflectionSuite::new(&registries).unwrap();

        for path in [AccessPath::Hot, AccessPath::Cold] {
            let mut ops = suite.operations(path);
            let add_to_b = &mut ops[3];
            let mut payload = Payload::default();

            assert_eq!((add_to_b.reflect)(&mut payload), 2.5, "{}", path);
            assert_eq!((add_to_b.meta)(&mut payload), 3.0, "{}", path);
            assert_eq!(payload.b, 3.0);
        }
    }

    #[test]
    fn test_run_produces_both_groups() {
        let registries = Registries::new().unwrap();
        let suite = ReflectionSuite::new(&registries).unwrap();
        let harness = BenchmarkHarness::new()
            .min_duration(std::time::Duration::from_millis(1))
            .max_iterations(64);
        let mut payload = Payload::default();

        let groups = suite.run(&harness, &mut payload);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].name, AccessPath::Hot);
        assert_eq!(groups[1].name, AccessPath::Cold);
        for group in &groups {
            assert_eq!(group.rows.len(), OPERATION_LABELS.len());
            for row in &group.rows {
                assert!(row.reflect.iterations >= 1 && row.reflect.iterations <= 64);
                assert_eq!(row.reflect.iterations, row.meta.iterations);
                assert!(row.reflect.ns_per_op >= 0.0);
                assert!(row.meta.ns_per_op >= 0.0);
            }
        }
    }
}
