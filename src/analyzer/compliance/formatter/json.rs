//! JSON formatter.

use crate::analyzer::compliance::report::RunReport;
use crate::analyzer::compliance::rules::{Rule, RuleSet};
use crate::analyzer::compliance::types::Violation;
use serde::Serialize;

/// Format a run report as JSON.
pub fn format(report: &RunReport) -> String {
    let output = JsonOutput::from(report);
    serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string())
}

/// Format the rule listing as JSON.
pub fn format_rules(rules: &RuleSet) -> String {
    let output: Vec<JsonRule> = rules.iter().map(JsonRule::from).collect();
    serde_json::to_string_pretty(&output).unwrap_or_else(|_| "[]".to_string())
}

#[derive(Serialize)]
struct JsonOutput {
    violations: Vec<JsonViolation>,
    parse_errors: Vec<String>,
    summary: JsonSummary,
}

#[derive(Serialize)]
struct JsonViolation {
    rule: String,
    enforcement_level: String,
    message: String,
    file_path: String,
    resource_name: String,
    resource_kind: String,
    resource_namespace: Option<String>,
    line: Option<u32>,
    remediation: Option<String>,
}

#[derive(Serialize)]
struct JsonSummary {
    resources_evaluated: usize,
    rules_run: usize,
    total_violations: usize,
    mandatory: usize,
    advisory: usize,
    passed: bool,
}

#[derive(Serialize)]
struct JsonRule {
    name: String,
    kind: String,
    enforcement_level: String,
    description: String,
    remediation: String,
}

impl From<&RunReport> for JsonOutput {
    fn from(report: &RunReport) -> Self {
        Self {
            violations: report.violations.iter().map(JsonViolation::from).collect(),
            parse_errors: report.parse_errors.clone(),
            summary: JsonSummary {
                resources_evaluated: report.summary.resources_evaluated,
                rules_run: report.summary.rules_run,
                total_violations: report.violations.len(),
                mandatory: report.summary.mandatory,
                advisory: report.summary.advisory,
                passed: report.summary.passed,
            },
        }
    }
}

impl From<&Violation> for JsonViolation {
    fn from(v: &Violation) -> Self {
        Self {
            rule: v.rule_name.to_string(),
            enforcement_level: v.level.to_string(),
            message: v.message.clone(),
            file_path: v.file_path.display().to_string(),
            resource_name: v.resource_name.clone(),
            resource_kind: v.resource_kind.clone(),
            resource_namespace: v.resource_namespace.clone(),
            line: v.line,
            remediation: v.remediation.clone(),
        }
    }
}

impl From<&Rule> for JsonRule {
    fn from(rule: &Rule) -> Self {
        Self {
            name: rule.name.to_string(),
            kind: rule.kind.to_string(),
            enforcement_level: rule.level.to_string(),
            description: rule.description.clone(),
            remediation: rule.remediation.clone(),
        }
    }
}
