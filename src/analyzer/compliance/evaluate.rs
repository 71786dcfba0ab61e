//! Per-resource evaluation.

use crate::analyzer::compliance::context::Resource;
use crate::analyzer::compliance::extract::{Container, ContainerRole, extract_containers};
use crate::analyzer::compliance::rules::{Rule, RuleCheck, RuleSet};
use crate::analyzer::compliance::types::{Diagnostic, Violation};

/// Evaluate one resource against every applicable rule of a rule set.
pub fn evaluate(resource: &Resource, rules: &RuleSet) -> Vec<Violation> {
    evaluate_rules(resource, rules.for_kind(resource.kind()))
}

/// Evaluate one resource against the given rules.
///
/// Rules whose kind does not match are skipped. Violations are ordered by
/// rule order, then by container extraction order within a rule. The
/// container list is extracted at most once per resource.
pub fn evaluate_rules<'a>(
    resource: &Resource,
    rules: impl IntoIterator<Item = &'a Rule>,
) -> Vec<Violation> {
    let mut violations = Vec::new();
    let mut containers: Option<Vec<(ContainerRole, Container)>> = None;

    for rule in rules {
        if !rule.applies_to(resource.kind()) {
            continue;
        }

        let diagnostics = match &rule.check {
            RuleCheck::Resource(check) => check.check(resource),
            RuleCheck::Container(check) => containers
                .get_or_insert_with(|| extract_containers(resource))
                .iter()
                .flat_map(|(role, container)| check.check_container(*role, container))
                .collect(),
        };

        log::trace!(
            "rule {} on {}/{}: {} diagnostic(s)",
            rule.name,
            resource.kind(),
            resource.name(),
            diagnostics.len()
        );

        violations.extend(
            diagnostics
                .into_iter()
                .map(|diag| to_violation(rule, resource, diag)),
        );
    }

    violations
}

fn to_violation(rule: &Rule, resource: &Resource, diag: Diagnostic) -> Violation {
    let remediation = diag
        .remediation
        .unwrap_or_else(|| rule.remediation.clone());

    let mut violation = Violation::new(
        rule.name.clone(),
        rule.level,
        diag.message,
        resource.name(),
        resource.kind().as_str(),
    )
    .with_file(&resource.metadata.file_path)
    .with_remediation(remediation);

    if let Some(ns) = resource.namespace() {
        violation = violation.with_namespace(ns);
    }
    if let Some(line) = resource.metadata.line_number {
        violation = violation.with_line(line);
    }

    violation
}
