//! Plain text and GitHub Actions formatters.

use crate::analyzer::compliance::report::RunReport;
use crate::analyzer::compliance::rules::RuleSet;
use crate::analyzer::compliance::types::{EnforcementLevel, Violation};

fn location(violation: &Violation) -> String {
    match violation.line {
        Some(line) => format!("{}:{}", violation.file_path.display(), line),
        None => violation.file_path.display().to_string(),
    }
}

/// Format a run report as plain text.
pub fn format(report: &RunReport) -> String {
    let mut output = String::new();

    for error in &report.parse_errors {
        output.push_str(&format!("Parse error: {}\n", error));
    }

    for violation in &report.violations {
        output.push_str(&format!(
            "{}: [{}] {} ({}/{}) - {}\n",
            location(violation),
            violation.level,
            violation.rule_name,
            violation.resource_kind,
            violation.resource_identifier(),
            violation.message,
        ));

        if let Some(ref remediation) = violation.remediation {
            output.push_str(&format!("  Remediation: {}\n", remediation));
        }
    }

    let summary = &report.summary;
    if report.violations.is_empty() {
        output.push_str(&format!(
            "No policy violations found in {} resource(s).\n",
            summary.resources_evaluated
        ));
    } else {
        output.push_str(&format!(
            "\nFound {} violation(s) ({} mandatory, {} advisory) in {} resource(s).\n",
            report.violations.len(),
            summary.mandatory,
            summary.advisory,
            summary.resources_evaluated,
        ));
    }
    output.push_str(if summary.passed {
        "Result: PASSED\n"
    } else {
        "Result: FAILED\n"
    });

    output
}

/// Format for GitHub Actions annotations.
pub fn format_github(report: &RunReport) -> String {
    let mut output = String::new();

    for error in &report.parse_errors {
        output.push_str(&format!("::error::{}\n", error));
    }

    for violation in &report.violations {
        let level = match violation.level {
            EnforcementLevel::Mandatory => "error",
            EnforcementLevel::Advisory => "warning",
        };

        let file = violation.file_path.display();
        let line = violation.line.unwrap_or(1);

        output.push_str(&format!(
            "::{} file={},line={}::[{}] {} - {}\n",
            level,
            file,
            line,
            violation.rule_name,
            violation.resource_identifier(),
            violation.message,
        ));
    }

    output
}

/// Format the rule listing as aligned plain text.
pub fn format_rules(rules: &RuleSet) -> String {
    let width = rules.iter().map(|r| r.name.as_str().len()).max().unwrap_or(0);
    let mut output = String::new();

    for rule in rules.iter() {
        output.push_str(&format!(
            "{:<width$}  {:<15}  {:<9}  {}\n",
            rule.name.as_str(),
            rule.kind.as_str(),
            rule.level.as_str(),
            rule.description,
            width = width,
        ));
    }
    output.push_str(&format!("\n{} rule(s).\n", rules.len()));

    output
}
