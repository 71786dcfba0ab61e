//! Output formatters for run reports and the rule listing.

pub mod json;
pub mod plain;

use crate::analyzer::compliance::report::RunReport;
use crate::analyzer::compliance::rules::RuleSet;

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Plain text output.
    #[default]
    Plain,
    /// JSON output.
    Json,
    /// GitHub Actions annotations.
    GitHub,
}

/// Format a run report to a string.
pub fn format_report_to_string(report: &RunReport, format: OutputFormat) -> String {
    match format {
        OutputFormat::Plain => plain::format(report),
        OutputFormat::Json => json::format(report),
        OutputFormat::GitHub => plain::format_github(report),
    }
}

/// Format the rule listing. GitHub annotations have no listing form and
/// fall back to plain text.
pub fn format_rules_to_string(rules: &RuleSet, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => json::format_rules(rules),
        OutputFormat::Plain | OutputFormat::GitHub => plain::format_rules(rules),
    }
}
