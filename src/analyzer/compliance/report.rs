//! Run-level aggregation.
//!
//! A run fails if and only if at least one mandatory violation was found.
//! Advisory violations never affect the outcome but are always reported.

use crate::analyzer::compliance::types::Violation;
use serde::{Deserialize, Serialize};

/// Result of evaluating every resource of a run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunReport {
    /// Violations in resource input order, then rule order.
    pub violations: Vec<Violation>,
    /// Sources that could not be loaded.
    pub parse_errors: Vec<String>,
    pub summary: RunSummary,
}

/// Summary of a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub resources_evaluated: usize,
    pub rules_run: usize,
    pub mandatory: usize,
    pub advisory: usize,
    /// No mandatory violation was found.
    pub passed: bool,
}

impl Default for RunSummary {
    fn default() -> Self {
        Self {
            resources_evaluated: 0,
            rules_run: 0,
            mandatory: 0,
            advisory: 0,
            passed: true,
        }
    }
}

impl RunReport {
    /// Create a new empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Aggregate violations into a report and settle the outcome.
    pub fn from_violations(violations: Vec<Violation>) -> Self {
        let mut report = Self::new();
        report.extend(violations);
        report
    }

    /// Add violations and recompute the counts.
    pub fn extend(&mut self, violations: impl IntoIterator<Item = Violation>) {
        self.violations.extend(violations);
        self.recount();
    }

    fn recount(&mut self) {
        let mandatory = self.mandatory_violations().count();
        self.summary.mandatory = mandatory;
        self.summary.advisory = self.violations.len() - mandatory;
        self.summary.passed = mandatory == 0;
    }

    pub fn has_parse_errors(&self) -> bool {
        !self.parse_errors.is_empty()
    }

    /// Check if the results should cause a non-zero exit.
    pub fn should_fail(&self, no_fail: bool) -> bool {
        !no_fail && !self.summary.passed
    }

    pub fn mandatory_violations(&self) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(|v| v.is_blocking())
    }
}
