//! Rules and the compiled-in rule set.
//!
//! A rule binds one applicable kind to one predicate and a fixed
//! enforcement level. The rule set is built once per process and shared
//! read-only between evaluation workers.

pub mod builtin;

use crate::analyzer::compliance::predicates::{CheckFunc, ContainerCheck};
use crate::analyzer::compliance::types::{EnforcementLevel, ResourceKind, RuleName};
use std::fmt;
use std::sync::OnceLock;

/// How a rule's predicate consumes a resource.
pub enum RuleCheck {
    /// Reads fields directly off the resource.
    Resource(Box<dyn CheckFunc>),
    /// Runs against every extracted container.
    Container(Box<dyn ContainerCheck>),
}

impl fmt::Debug for RuleCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resource(_) => f.write_str("RuleCheck::Resource"),
            Self::Container(_) => f.write_str("RuleCheck::Container"),
        }
    }
}

#[derive(Debug)]
pub struct Rule {
    pub name: RuleName,
    pub kind: ResourceKind,
    pub level: EnforcementLevel,
    pub description: String,
    pub remediation: String,
    pub check: RuleCheck,
}

impl Rule {
    /// Create a rule whose predicate reads the resource directly.
    pub fn resource(
        name: impl Into<RuleName>,
        kind: ResourceKind,
        level: EnforcementLevel,
        description: impl Into<String>,
        remediation: impl Into<String>,
        check: impl CheckFunc + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            level,
            description: description.into(),
            remediation: remediation.into(),
            check: RuleCheck::Resource(Box::new(check)),
        }
    }

    /// Create a rule whose predicate runs once per extracted container.
    pub fn container(
        name: impl Into<RuleName>,
        kind: ResourceKind,
        level: EnforcementLevel,
        description: impl Into<String>,
        remediation: impl Into<String>,
        check: impl ContainerCheck + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            level,
            description: description.into(),
            remediation: remediation.into(),
            check: RuleCheck::Container(Box::new(check)),
        }
    }

    pub fn applies_to(&self, kind: &ResourceKind) -> bool {
        &self.kind == kind
    }

    pub fn is_container_rule(&self) -> bool {
        matches!(self.check, RuleCheck::Container(_))
    }
}

/// An ordered collection of rules. Registration order is evaluation order.
#[derive(Debug, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.name.as_str() == name)
    }

    /// Rules applicable to a kind, in registration order.
    pub fn for_kind<'a>(&'a self, kind: &'a ResourceKind) -> impl Iterator<Item = &'a Rule> {
        self.rules.iter().filter(move |r| r.applies_to(kind))
    }

    /// Rules whose names are not in `exclude`, in registration order.
    pub fn select(&self, exclude: &[String]) -> Vec<&Rule> {
        self.rules
            .iter()
            .filter(|r| !exclude.iter().any(|e| e == r.name.as_str()))
            .collect()
    }
}

static BUILTIN: OnceLock<RuleSet> = OnceLock::new();

/// The process-wide compiled-in rule set, built on first access.
pub fn builtin_rule_set() -> &'static RuleSet {
    BUILTIN.get_or_init(|| RuleSet::new(builtin::builtin_rules()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_rule_set_is_shared() {
        let a = builtin_rule_set();
        let b = builtin_rule_set();
        assert!(std::ptr::eq(a, b));
        assert!(!a.is_empty());
    }

    #[test]
    fn test_for_kind_keeps_registration_order() {
        let set = builtin_rule_set();
        let names: Vec<&str> = set
            .for_kind(&ResourceKind::Pod)
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(names, vec!["pod-allowed-capabilities", "pod-image-tag"]);
    }

    #[test]
    fn test_unknown_kind_has_no_rules() {
        let set = builtin_rule_set();
        let kind = ResourceKind::Unknown("ConfigMap".to_string());
        assert_eq!(set.for_kind(&kind).count(), 0);
    }

    #[test]
    fn test_select_excludes_by_name() {
        let set = builtin_rule_set();
        let selected = set.select(&["pod-image-tag".to_string()]);
        assert_eq!(selected.len(), set.len() - 1);
        assert!(selected.iter().all(|r| r.name.as_str() != "pod-image-tag"));
    }

    #[test]
    fn test_get() {
        let set = builtin_rule_set();
        let rule = set.get("service-no-load-balancer").unwrap();
        assert_eq!(rule.kind, ResourceKind::Service);
        assert!(!rule.is_container_rule());
        assert!(set.get("nope").is_none());
    }
}
