// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Plain-text rendering of a report as comparison tables.

use std::fmt;

use reflectbench_core::Mechanism;

use crate::metrics::{BenchmarkReport, ComparisonRow, ResultGroup};

/// Width of the advantage meter, excluding the centre marker.
pub const METER_WIDTH: usize = 24;
/// Speedup at which the meter saturates.
const METER_MAX_SPEEDUP: f64 = 3.0;
const RULE_WIDTH: usize = 88;

/// Centred bar showing direction and size of the winner's advantage.
///
/// The left half fills when reflect wins, the right half when meta wins. A
/// 1x speedup fills nothing; 3x or more fills the whole half.
pub fn meter(winner: Mechanism, speedup: f64, width: usize) -> String {
    let half = width / 2;
    let clamped = speedup.clamp(1.0, METER_MAX_SPEEDUP);
    let filled = (((clamped - 1.0) / (METER_MAX_SPEEDUP - 1.0)) * half as f64 + 0.5) as usize;
    let filled = filled.min(half);

    let (left, right) = match winner {
        Mechanism::Reflect => (
            format!("{}{}", "#".repeat(filled), "-".repeat(half - filled)),
            "-".repeat(half),
        ),
        Mechanism::Meta => (
            "-".repeat(half),
            format!("{}{}", "-".repeat(half - filled), "#".repeat(filled)),
        ),
    };
    format!("{}|{}", left, right)
}

fn write_row(f: &mut fmt::Formatter<'_>, row: &ComparisonRow) -> fmt::Result {
    let winner = row.winner();
    let speedup = row.speedup();
    writeln!(
        f,
        "{:<20}{:>14.2}{:>14.2}  {:<7}  x{:>5.2}  {}",
        row.operation,
        row.result(Mechanism::Reflect).ns_per_op,
        row.result(Mechanism::Meta).ns_per_op,
        winner,
        speedup,
        meter(winner, speedup, METER_WIDTH)
    )
}

/// One group rendered as title, table and win summary.
pub struct GroupTable<'a>(pub &'a ResultGroup);

impl fmt::Display for GroupTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let group = self.0;
        let rule = "-".repeat(RULE_WIDTH);

        writeln!(f)?;
        writeln!(f, "{} ({})", group.name.as_str().to_uppercase(), group.description)?;
        writeln!(f, "{}", rule)?;
        writeln!(
            f,
            "{:<20}{:>14}{:>14}  {:<7}  {:>6}  {:<24}",
            "operation", "reflect ns/op", "meta ns/op", "winner", "speed", "advantage"
        )?;
        writeln!(f, "{}", rule)?;
        for row in &group.rows {
            write_row(f, row)?;
        }
        writeln!(f, "{}", rule)?;
        writeln!(
            f,
            "summary: reflect wins {}, meta wins {}",
            group.wins(Mechanism::Reflect),
            group.wins(Mechanism::Meta)
        )
    }
}

/// A whole report rendered as a legend followed by one table per group.
pub struct ReportTable<'a>(pub &'a BenchmarkReport);

impl fmt::Display for ReportTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        writeln!(f, "Reflection benchmark (rendered from JSON)")?;
        if !report.meta.note.is_empty() {
            writeln!(f, "{}", report.meta.note)?;
        }
        writeln!(
            f,
            "Legend: HOT handles cached; COLD per-iteration lookup by name. \
             speed: winner's speedup. advantage: left = reflect, right = meta (max ~3x)."
        )?;
        for group in &report.groups {
            write!(f, "{}", GroupTable(group))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{BenchmarkResult, HarnessSettings};
    use reflectbench_core::AccessPath;

    fn row(label: &str, reflect_ns: f64, meta_ns: f64) -> ComparisonRow {
        ComparisonRow::new(
            label,
            BenchmarkResult::new(reflect_ns, 1, 0.0),
            BenchmarkResult::new(meta_ns, 1, 0.0),
        )
    }

    #[test]
    fn test_meter_even_speed_is_empty() {
        assert_eq!(
            meter(Mechanism::Reflect, 1.0, METER_WIDTH),
            "------------|------------"
        );
    }

    #[test]
    fn test_meter_saturates_at_three_x() {
        assert_eq!(
            meter(Mechanism::Reflect, 10.0, METER_WIDTH),
            "############|------------"
        );
        assert_eq!(
            meter(Mechanism::Meta, f64::INFINITY, METER_WIDTH),
            "------------|############"
        );
    }

    #[test]
    fn test_meter_partial_fill() {
        // 2x is halfway to saturation: 6 of 12 cells
        assert_eq!(
            meter(Mechanism::Meta, 2.0, METER_WIDTH),
            "------------|------######"
        );
    }

    #[test]
    fn test_group_table_summary() {
        let mut group = ResultGroup::new(AccessPath::Hot);
        group.rows.push(row("get a", 2.0, 4.0));
        group.rows.push(row("set b", 4.0, 2.0));
        group.rows.push(row("mul(3)", 9.0, 3.0));

        let text = GroupTable(&group).to_string();
        assert!(text.contains("HOT (handles cached"));
        assert!(text.contains("summary: reflect wins 1, meta wins 2"));
        assert!(text.contains("x 2.00"));
        assert!(text.contains("x 3.00"));
        // Columns follow the mechanism, not the winner
        assert!(text.contains("set b                         4.00          2.00  meta"));
        assert_eq!(text.lines().filter(|l| l.starts_with("get a")).count(), 1);
    }

    #[test]
    fn test_report_table_lists_every_group() {
        let mut report = BenchmarkReport::new(
            HarnessSettings {
                min_duration_ms: 1,
                max_iterations: 1,
            },
            None,
        );
        report.add_group(ResultGroup::new(AccessPath::Hot));
        report.add_group(ResultGroup::new(AccessPath::Cold));

        let text = ReportTable(&report).to_string();
        assert!(text.starts_with("Reflection benchmark"));
        assert!(text.contains("\nHOT ("));
        assert!(text.contains("\nCOLD ("));
        assert_eq!(text.matches("summary:").count(), 2);
    }
}
