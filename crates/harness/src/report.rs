//! Ranked benchmark results
//!
//! Entries are ordered by mean time, fastest first. Entries that did not
//! finish OK sort last and keep their manifest order. Each OK entry is also
//! shown relative to the fastest one.

use crate::error::HarnessError;
use crate::manifest::BenchmarkSettings;
use crate::runner::{LanguageResult, Status};
use serde::Serialize;
use std::cmp::Ordering;

/// Report output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Fixed-width table
    #[default]
    Human,
    /// Pretty-printed JSON
    Json,
}

/// One ranked entry
#[derive(Debug, Clone, Serialize)]
pub struct ReportRow {
    pub rank: usize,
    pub language: String,
    pub status: String,
    pub mean_secs: Option<f64>,
    /// Mean divided by the fastest mean; 1.0 for the fastest entry
    pub relative: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ReportRow {
    pub fn is_ok(&self) -> bool {
        self.status == Status::Ok.label()
    }

    fn relative_label(&self) -> String {
        match self.relative {
            Some(_) if self.rank == 1 => "fastest".to_string(),
            Some(relative) => format!("{:.2}x slower", relative),
            None => "N/A".to_string(),
        }
    }
}

/// Full benchmark report
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub benchmark: String,
    pub runs: u32,
    pub warmup: u32,
    pub results: Vec<ReportRow>,
}

impl Report {
    pub fn new(settings: &BenchmarkSettings, mut results: Vec<LanguageResult>) -> Self {
        // Stable sort keeps manifest order among failed entries
        results.sort_by(|a, b| match (a.mean(), b.mean()) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });

        let fastest = results.first().and_then(LanguageResult::mean);
        let rows = results
            .iter()
            .enumerate()
            .map(|(i, result)| {
                let mean = result.mean();
                let relative = mean.zip(fastest).map(|(mean, fastest)| {
                    if fastest.is_zero() {
                        1.0
                    } else {
                        mean.as_secs_f64() / fastest.as_secs_f64()
                    }
                });
                ReportRow {
                    rank: i + 1,
                    language: result.name.clone(),
                    status: result.status.label().to_string(),
                    mean_secs: mean.map(|m| m.as_secs_f64()),
                    relative,
                    message: result.status.detail().map(str::to_string),
                }
            })
            .collect();

        Report {
            benchmark: settings.name.clone(),
            runs: settings.runs,
            warmup: settings.warmup,
            results: rows,
        }
    }

    /// True when every entry finished OK
    pub fn all_ok(&self) -> bool {
        self.results.iter().all(ReportRow::is_ok)
    }

    pub fn render(&self, format: OutputFormat) -> Result<String, HarnessError> {
        match format {
            OutputFormat::Human => Ok(self.to_human()),
            OutputFormat::Json => self.to_json(),
        }
    }

    pub fn to_json(&self) -> Result<String, HarnessError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_human(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "=== {} | mean of {} runs ===\n",
            self.benchmark, self.runs
        ));

        if !self.results.iter().any(ReportRow::is_ok) {
            out.push_str("No benchmark finished successfully.\n");
        }

        out.push_str(&format!(
            "{:<4}  {:<10}  {:>10}  {:<14}  {}\n",
            "Rank", "Language", "Mean (s)", "Relative", "Status"
        ));
        out.push_str(&format!(
            "{}  {}  {}  {}  {}\n",
            "-".repeat(4),
            "-".repeat(10),
            "-".repeat(10),
            "-".repeat(14),
            "-".repeat(12)
        ));

        for row in &self.results {
            let mean = match row.mean_secs {
                Some(secs) => format!("{:.4}", secs),
                None => "-".repeat(10),
            };
            out.push_str(&format!(
                "{:<4}  {:<10}  {:>10}  {:<14}  {}\n",
                row.rank,
                row.language,
                mean,
                row.relative_label(),
                row.status
            ));
        }

        let failures: Vec<_> = self.results.iter().filter(|r| !r.is_ok()).collect();
        if !failures.is_empty() {
            out.push_str("\nFAILURES:\n");
            for row in failures {
                out.push_str(&format!("\n{} ({})\n", row.language, row.status));
                if let Some(ref message) = row.message {
                    for line in message.lines() {
                        out.push_str(&format!("  {}\n", line));
                    }
                }
            }
        }
        out
    }
}
