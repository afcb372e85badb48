//! Output formatters for batch reports
//!
//! Provides JSON, Table, and summary output formats.

use super::report::{BatchReport, RequestReport};

/// Output format options
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    JsonPretty,
    Summary,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "table" => Some(OutputFormat::Table),
            "json" => Some(OutputFormat::Json),
            "json-pretty" | "jsonpretty" => Some(OutputFormat::JsonPretty),
            "summary" => Some(OutputFormat::Summary),
            _ => None,
        }
    }
}

/// Report formatter
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

    /// Format a whole batch report
    pub fn format_report(&self, report: &BatchReport) -> String {
        match self.format {
            OutputFormat::Table => self.format_report_table(report),
            OutputFormat::Json => serde_json::to_string(report).unwrap_or_default(),
            OutputFormat::JsonPretty => serde_json::to_string_pretty(report).unwrap_or_default(),
            OutputFormat::Summary => self.format_report_brief(report),
        }
    }

    fn format_request(&self, request: &RequestReport) -> String {
        let status = match (request.status_code, &request.error) {
            (Some(code), _) => {
                let text = format!("{code:>5}");
                if !self.colorize {
                    text
                } else if (200..400).contains(&code) {
                    format!("\x1b[32m{text}\x1b[0m")
                } else {
                    format!("\x1b[33m{text}\x1b[0m")
                }
            }
            (None, _) if self.colorize => "\x1b[31mERROR\x1b[0m".to_string(),
            (None, _) => "ERROR".to_string(),
        };

        let detail = match (&request.error, request.duration_ms) {
            (Some(err), _) => err.clone(),
            (None, Some(ms)) => format!("{ms}ms"),
            (None, None) => String::new(),
        };

        format!(
            "{:<7} {:<20} {} {:<7} {}  {}",
            request.name, request.label, status, request.method, request.url, detail
        )
    }

    fn format_report_table(&self, report: &BatchReport) -> String {
        let mut output = String::new();

        output.push_str("\n════════════════════════════════════════════════════════════════\n");
        output.push_str(&format!(
            "  Batch started {}\n",
            report.started_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
        output.push_str("────────────────────────────────────────────────────────────────\n");

        for request in &report.requests {
            output.push_str(&format!("  {}\n", self.format_request(request)));
        }

        output.push_str("────────────────────────────────────────────────────────────────\n");
        output.push_str(&format!(
            "  Total: {} | Succeeded: {} | Failed: {} | {:.1}% in {}ms\n",
            report.total,
            report.succeeded,
            report.failed,
            report.success_rate(),
            report.elapsed_ms
        ));
        output.push_str("════════════════════════════════════════════════════════════════\n");

        output
    }

    fn format_report_brief(&self, report: &BatchReport) -> String {
        format!(
            "{}/{} requests succeeded ({:.1}%) in {}ms",
            report.succeeded,
            report.total,
            report.success_rate(),
            report.elapsed_ms
        )
    }
}
