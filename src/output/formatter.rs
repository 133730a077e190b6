//! Output formatters for run results
//!
//! Provides table, JSON, CSV, and summary output formats.

use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;
use std::path::Path;

use crate::models::{RunSummary, ScenarioResult, TestStatus};

/// Output format options
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    JsonPretty,
    Csv,
    Summary,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "table" => Some(OutputFormat::Table),
            "json" => Some(OutputFormat::Json),
            "json-pretty" | "jsonpretty" => Some(OutputFormat::JsonPretty),
            "csv" => Some(OutputFormat::Csv),
            "summary" => Some(OutputFormat::Summary),
            _ => None,
        }
    }
}

/// One CSV line per scenario
#[derive(Serialize)]
struct CsvRow<'a> {
    id: &'a str,
    name: &'a str,
    kind: &'a str,
    category: &'a str,
    status: &'a str,
    duration_ms: u64,
    steps_run: usize,
    message: &'a str,
}

/// Result formatter
pub struct ResultFormatter {
    format: OutputFormat,
    colorize: bool,
}

impl ResultFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            colorize: true,
        }
    }

    pub fn no_color(mut self) -> Self {
        self.colorize = false;
        self
    }

    /// Format a single scenario result
    pub fn format_result(&self, result: &ScenarioResult) -> String {
        match self.format {
            OutputFormat::Table => self.format_result_table(result),
            OutputFormat::Json => serde_json::to_string(result).unwrap_or_default(),
            OutputFormat::JsonPretty => serde_json::to_string_pretty(result).unwrap_or_default(),
            OutputFormat::Csv => csv_lines(std::slice::from_ref(result), false).unwrap_or_default(),
            OutputFormat::Summary => self.format_result_summary(result),
        }
    }

    fn status_label(&self, status: TestStatus) -> &'static str {
        if self.colorize {
            match status {
                TestStatus::Pass => "\x1b[32m✓ PASS\x1b[0m",
                TestStatus::Fail => "\x1b[31m✗ FAIL\x1b[0m",
                TestStatus::Skip => "\x1b[33m○ SKIP\x1b[0m",
                TestStatus::Error => "\x1b[31m! ERROR\x1b[0m",
            }
        } else {
            match status {
                TestStatus::Pass => "✓ PASS",
                TestStatus::Fail => "✗ FAIL",
                TestStatus::Skip => "○ SKIP",
                TestStatus::Error => "! ERROR",
            }
        }
    }

    fn format_result_table(&self, result: &ScenarioResult) -> String {
        format!(
            "{:6} {:3} {:50} {} [{:>6}ms]",
            result.scenario_id,
            result.kind.name(),
            truncate(&result.name, 50),
            self.status_label(result.status),
            result.duration_ms
        )
    }

    fn format_result_summary(&self, result: &ScenarioResult) -> String {
        format!(
            "{} {} {} ({}ms)",
            result.status.symbol(),
            result.scenario_id,
            result.name,
            result.duration_ms
        )
    }

    /// Format a whole run
    pub fn format_summary(&self, summary: &RunSummary) -> String {
        match self.format {
            OutputFormat::Table => self.format_summary_table(summary),
            OutputFormat::Json => serde_json::to_string(summary).unwrap_or_default(),
            OutputFormat::JsonPretty => serde_json::to_string_pretty(summary).unwrap_or_default(),
            OutputFormat::Csv => csv_lines(&summary.results, true).unwrap_or_default(),
            OutputFormat::Summary => self.format_summary_brief(summary),
        }
    }

    fn format_summary_table(&self, summary: &RunSummary) -> String {
        let rule = "═".repeat(80);
        let mut output = String::new();

        output.push_str(&format!("\n{rule}\n"));
        output.push_str(&format!(
            " Run against {} at {}\n",
            summary.base_url,
            summary.started_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
        output.push_str(&format!("{rule}\n"));

        for result in &summary.results {
            output.push_str(&format!(" {}\n", self.format_result_table(result)));
            if result.status != TestStatus::Pass {
                if let Some(message) = &result.message {
                    output.push_str(&format!("        └─ {message}\n"));
                }
            }
        }

        output.push_str(&format!("{rule}\n"));

        let pass_str = if self.colorize {
            format!("\x1b[32m{}\x1b[0m", summary.passed)
        } else {
            summary.passed.to_string()
        };
        let fail_str = if self.colorize && summary.failed > 0 {
            format!("\x1b[31m{}\x1b[0m", summary.failed)
        } else {
            summary.failed.to_string()
        };

        output.push_str(&format!(
            " Total: {} | Pass: {} | Fail: {} | Skip: {} | Error: {}\n",
            summary.total, pass_str, fail_str, summary.skipped, summary.errors
        ));
        output.push_str(&format!(
            " Pass Rate: {:.1}% | Duration: {}ms\n",
            summary.pass_rate(),
            summary.total_duration_ms
        ));
        output.push_str(&format!("{rule}\n"));

        output
    }

    fn format_summary_brief(&self, summary: &RunSummary) -> String {
        format!(
            "{}: {}/{} passed ({:.1}%), {} failed, {} errors, {} skipped in {}ms",
            summary.base_url,
            summary.passed,
            summary.total,
            summary.pass_rate(),
            summary.failed,
            summary.errors,
            summary.skipped,
            summary.total_duration_ms
        )
    }
}

impl Default for ResultFormatter {
    fn default() -> Self {
        Self::new(OutputFormat::Table)
    }
}

fn status_name(status: TestStatus) -> &'static str {
    match status {
        TestStatus::Pass => "pass",
        TestStatus::Fail => "fail",
        TestStatus::Skip => "skip",
        TestStatus::Error => "error",
    }
}

fn csv_lines(results: &[ScenarioResult], with_header: bool) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(with_header)
        .from_writer(Vec::new());

    for result in results {
        writer.serialize(CsvRow {
            id: &result.scenario_id,
            name: &result.name,
            kind: result.kind.name(),
            category: result.category.name(),
            status: status_name(result.status),
            duration_ms: result.duration_ms,
            steps_run: result.steps_run,
            message: result.message.as_deref().unwrap_or(""),
        })?;
    }

    let bytes = writer.into_inner().context("Failed to flush CSV output")?;
    String::from_utf8(bytes).context("CSV output is not UTF-8")
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max - 1).collect();
        format!("{cut}…")
    }
}

/// Write a run report to a file
pub fn write_report_to_file(
    path: impl AsRef<Path>,
    summary: &RunSummary,
    format: OutputFormat,
) -> Result<()> {
    let path = path.as_ref();
    let formatter = ResultFormatter::new(format).no_color();
    let content = formatter.format_summary(summary);

    let mut file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create report file: {}", path.display()))?;
    file.write_all(content.as_bytes())?;

    Ok(())
}
