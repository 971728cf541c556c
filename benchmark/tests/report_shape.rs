// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! End-to-end runs of the suite with a tiny calibration budget.

use reflectbench_benchmark::{run_reflection_suite, HarnessConfig, JsonReporter, OPERATION_LABELS};
use reflectbench_core::AccessPath;

fn quick_config() -> HarnessConfig {
    HarnessConfig::validated(1, 256, false).expect("valid config")
}

#[test]
fn test_two_runs_share_shape() {
    let config = quick_config();
    let first = run_reflection_suite(&config).expect("first run");
    let second = run_reflection_suite(&config).expect("second run");

    assert_eq!(first.shape(), second.shape());
    assert_ne!(first.meta.run_id, second.meta.run_id);

    let expected: Vec<String> = OPERATION_LABELS.iter().map(|s| s.to_string()).collect();
    assert_eq!(
        first.shape(),
        vec![(AccessPath::Hot, expected.clone()), (AccessPath::Cold, expected)]
    );
}

#[test]
fn test_emitted_document_layout() {
    let report = run_reflection_suite(&quick_config()).expect("run");
    let json = JsonReporter::to_json(&report).expect("serialize");
    let value: serde_json::Value = serde_json::from_str(&json).expect("valid JSON");

    let groups = value["groups"].as_array().expect("groups array");
    let names: Vec<_> = groups.iter().map(|g| g["name"].as_str()).collect();
    assert_eq!(names, vec![Some("hot"), Some("cold")]);

    for group in groups {
        let rows = group["rows"].as_array().expect("rows array");
        assert_eq!(rows.len(), OPERATION_LABELS.len());
        for row in rows {
            for mechanism in ["reflect", "meta"] {
                let result = row[mechanism].as_object().expect("result object");
                assert_eq!(result.len(), 1, "only ns_per_op is emitted");
                assert!(result["ns_per_op"].as_f64().is_some_and(|ns| ns >= 0.0));
            }
        }
    }

    assert_eq!(value["meta"]["harness"]["max_iterations"], 256);
    assert!(value["meta"].get("system_info").is_none());
}

#[test]
fn test_iterations_respect_cap() {
    let report = run_reflection_suite(&quick_config()).expect("run");
    for group in &report.groups {
        for row in &group.rows {
            assert!((1..=256).contains(&row.reflect.iterations));
            assert_eq!(row.reflect.iterations, row.meta.iterations);
        }
    }
}
