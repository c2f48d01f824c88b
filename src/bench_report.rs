//! Benchmark timing totals.
//!
//! Sums the estimate column of benchmark output per machine. Measurements
//! look like
//!
//! ```text
//! lambda/add_test         time:   [1.2001 µs 1.2034 µs 1.2071 µs]
//! ```
//!
//! and may have `time:` wrapped onto the following indented line when the
//! benchmark name is long. The part before `/` names the machine.
//!
//! This module is independent of template expansion.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

static WRAPPED_TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s+time:").expect("valid regex"));

static MEASUREMENT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(\w+)/\w+\s+time:\s+\[\d+(?:\.\d+)?\s(\w+)\s(\d+(?:\.\d+)?)\s(\w+)\s\d+(?:\.\d+)?\s(\w+)\]",
    )
    .expect("valid regex")
});

/// Machine the other totals are compared against
const SUBJECT: &str = "lambda";
/// Machines compared with [`SUBJECT`], in print order
const BASELINES: &[&str] = &["legacy", "fast"];

/// Errors that can occur while reading a benchmark report
#[derive(Error, Debug)]
pub enum ReportError {
    /// Time unit other than ns, µs, ms or s
    #[error("Unknown time unit: {unit}")]
    UnknownUnit { unit: String },

    /// Number that does not parse as f64
    #[error("Invalid time value: {value}")]
    InvalidValue { value: String },

    /// IO error reading the report
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convert a measurement to milliseconds
pub fn to_millis(value: f64, unit: &str) -> Result<f64, ReportError> {
    match unit {
        "ns" => Ok(value / 1_000_000.0),
        "µs" | "us" => Ok(value / 1000.0),
        "ms" => Ok(value),
        "s" => Ok(value * 1000.0),
        other => Err(ReportError::UnknownUnit {
            unit: other.to_string(),
        }),
    }
}

/// Per-machine totals in milliseconds, in first-seen order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MachineTotals {
    entries: Vec<(String, f64)>,
}

impl MachineTotals {
    fn add(&mut self, machine: &str, millis: f64) {
        match self.entries.iter_mut().find(|(name, _)| name == machine) {
            Some((_, total)) => *total += millis,
            None => self.entries.push((machine.to_string(), millis)),
        }
    }

    pub fn get(&self, machine: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(name, _)| name == machine)
            .map(|(_, total)| *total)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(name, total)| (name.as_str(), *total))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Text summary: one total per machine, then the ratios against
    /// `lambda` when that machine was measured.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (machine, total) in self.iter() {
            let _ = writeln!(out, "Total {machine} time: {total:.3} ms");
        }

        let Some(subject) = self.get(SUBJECT) else {
            return out;
        };
        out.push('\n');
        for baseline in BASELINES {
            if let Some(other) = self.get(baseline) {
                let ratio = subject / other;
                let _ = writeln!(
                    out,
                    "{SUBJECT}_vm took x{ratio:.1} more than {baseline}_vm"
                );
            }
        }
        out
    }
}

/// Parse benchmark output already in memory
pub fn parse_report(content: &str) -> Result<MachineTotals, ReportError> {
    let joined = WRAPPED_TIME_RE.replace_all(content, " time:");
    let mut totals = MachineTotals::default();

    for line in joined.lines() {
        let Some(caps) = MEASUREMENT_RE.captures(line) else {
            continue;
        };
        let (machine, mid, unit) = (&caps[1], &caps[3], &caps[4]);
        let value: f64 = mid.parse().map_err(|_| ReportError::InvalidValue {
            value: mid.to_string(),
        })?;
        totals.add(machine, to_millis(value, unit)?);
    }
    Ok(totals)
}

/// Read and parse a benchmark output file
pub fn parse_report_file<P: AsRef<Path>>(path: P) -> Result<MachineTotals, ReportError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_report(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
lambda/add_test         time:   [2.0000 ms 2.5000 ms 3.0000 ms]
legacy/add_test         time:   [900.00 µs 1.0000 ms 1.1000 ms]
lambda/a_really_long_benchmark_name_here
                        time:   [1.0000 s 1.5000 s 2.0000 s]
Found 3 outliers among 100 measurements (3.00%)
legacy/a_really_long_benchmark_name_here
                        time:   [400.00 ms 500.00 ms 600.00 ms]
";

    #[test]
    fn test_unit_conversion() {
        assert_eq!(to_millis(1500.0, "µs").unwrap(), 1.5);
        assert_eq!(to_millis(2.0, "s").unwrap(), 2000.0);
        assert_eq!(to_millis(3.0, "ms").unwrap(), 3.0);
        assert_eq!(to_millis(2_000_000.0, "ns").unwrap(), 2.0);
        assert_eq!(to_millis(1500.0, "us").unwrap(), 1.5);
        assert!(matches!(
            to_millis(1.0, "min"),
            Err(ReportError::UnknownUnit { .. })
        ));
    }

    #[test]
    fn test_totals_join_wrapped_lines() {
        let totals = parse_report(SAMPLE).unwrap();
        let names: Vec<&str> = totals.iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["lambda", "legacy"]);
        assert!((totals.get("lambda").unwrap() - 1502.5).abs() < 1e-9);
        assert!((totals.get("legacy").unwrap() - 501.0).abs() < 1e-9);
    }

    #[test]
    fn test_render_with_ratio() {
        let rendered = parse_report(SAMPLE).unwrap().render();
        assert_eq!(
            rendered,
            "Total lambda time: 1502.500 ms\n\
             Total legacy time: 501.000 ms\n\
             \n\
             lambda_vm took x3.0 more than legacy_vm\n"
        );
    }

    #[test]
    fn test_render_without_subject() {
        let totals = parse_report("fast/add  time: [1.0 ms 2.0 ms 3.0 ms]\n").unwrap();
        assert_eq!(totals.render(), "Total fast time: 2.000 ms\n");
    }

    #[test]
    fn test_ascii_and_nanosecond_units() {
        let totals = parse_report(
            "fast/add  time: [1400.0 us 1500.0 us 1600.0 us]\n\
             fast/sub  time: [400000.0 ns 500000.0 ns 600000.0 ns]\n",
        )
        .unwrap();
        assert!((totals.get("fast").unwrap() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_missing_file_keeps_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bench.txt");
        let err = parse_report_file(&path).unwrap_err();
        assert!(matches!(&err, ReportError::Io { path: p, .. } if *p == path));
        assert!(err.to_string().contains("bench.txt"));
    }

    #[test]
    fn test_unknown_unit_is_error() {
        let err = parse_report("fast/add  time: [1.0 ks 2.0 ks 3.0 ks]\n").unwrap_err();
        assert!(matches!(err, ReportError::UnknownUnit { unit } if unit == "ks"));
    }

    #[test]
    fn test_unmatched_input_is_empty() {
        assert!(parse_report("Benchmarking lambda/add\n").unwrap().is_empty());
    }
}
