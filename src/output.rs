use std::fmt::Write;

use serde::Serialize;

use esd_outliers::{EsdReport, RankOutcome};

/// JSON shape of one tested sample
#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    source: &'a str,
    sample_size: usize,
    alpha: f64,
    max_outliers: usize,
    outlier_count: usize,
    outlier_indices: Vec<usize>,
    ranks: Vec<RankOutcome>,
}

/// Render a report as a per-rank table
pub fn render_text(source: &str, report: &EsdReport) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{}: n={}, k={}, alpha={}",
        source,
        report.sample_size,
        report.candidates.len(),
        report.alpha
    );
    let _ = writeln!(
        out,
        "{:>5} {:>12} {:>6} {:>10} {:>10} {:>7}",
        "rank", "value", "index", "statistic", "critical", "reject"
    );

    for rank in report.ranks() {
        let _ = writeln!(
            out,
            "{:>5} {:>12.4} {:>6} {:>10.4} {:>10.4} {:>7}",
            rank.rank,
            rank.value,
            rank.index,
            rank.statistic,
            rank.critical_value,
            if rank.rejects { "yes" } else { "no" }
        );
    }

    let indices = report.outlier_indices();
    if indices.is_empty() {
        let _ = writeln!(out, "outliers: 0");
    } else {
        let listed: Vec<String> = indices.iter().map(ToString::to_string).collect();
        let _ = writeln!(
            out,
            "outliers: {} (indices {})",
            report.outlier_count,
            listed.join(", ")
        );
    }

    out
}

/// Render a report as pretty-printed JSON
pub fn render_json(source: &str, report: &EsdReport) -> Result<String, serde_json::Error> {
    let json = JsonReport {
        source,
        sample_size: report.sample_size,
        alpha: report.alpha,
        max_outliers: report.candidates.len(),
        outlier_count: report.outlier_count,
        outlier_indices: report.outlier_indices(),
        ranks: report.ranks().collect(),
    };

    serde_json::to_string_pretty(&json)
}
