//! Core types for the compliance engine.
//!
//! - `EnforcementLevel` - Whether a rule blocks the run or only reports
//! - `RuleName` - Rule identifiers (e.g., "pod-image-tag")
//! - `ResourceKind` - The resource shapes the policy pack understands
//! - `Diagnostic` - A raw message produced by a predicate
//! - `Violation` - A diagnostic enriched with rule and resource context

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Enforcement level attached to every rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnforcementLevel {
    /// Any violation fails the evaluation run.
    Mandatory,
    /// Violations are reported but never fail the run.
    #[default]
    Advisory,
}

impl EnforcementLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mandatory => "mandatory",
            Self::Advisory => "advisory",
        }
    }

    /// Whether a violation at this level fails the run.
    pub fn is_blocking(&self) -> bool {
        matches!(self, Self::Mandatory)
    }
}

impl fmt::Display for EnforcementLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A rule identifier (e.g., "service-no-load-balancer").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RuleName(pub String);

impl RuleName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RuleName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for RuleName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for RuleName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Resource kinds the policy pack knows how to evaluate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    // Workloads
    Pod,
    Deployment,
    StatefulSet,
    Job,

    // Networking
    Service,

    // Helm
    HelmReleaseV3,
    HelmChartV4,

    // Cloud compute
    ComputeInstance,

    /// Anything else; evaluated against no rules.
    Unknown(String),
}

impl ResourceKind {
    /// Get the canonical kind name.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pod => "Pod",
            Self::Deployment => "Deployment",
            Self::StatefulSet => "StatefulSet",
            Self::Job => "Job",
            Self::Service => "Service",
            Self::HelmReleaseV3 => "HelmReleaseV3",
            Self::HelmChartV4 => "HelmChartV4",
            Self::ComputeInstance => "ComputeInstance",
            Self::Unknown(kind) => kind,
        }
    }

    /// Parse a kind from either a Kubernetes `kind` or a typed resource token.
    ///
    /// Typed tokens look like `kubernetes:core/v1:Pod` or
    /// `aws:ec2/instance:Instance`; the canonical names are accepted as well.
    pub fn from_kind(kind: &str) -> Self {
        match kind {
            "Pod" | "kubernetes:core/v1:Pod" => Self::Pod,
            "Deployment" | "kubernetes:apps/v1:Deployment" => Self::Deployment,
            "StatefulSet" | "kubernetes:apps/v1:StatefulSet" => Self::StatefulSet,
            "Job" | "kubernetes:batch/v1:Job" => Self::Job,
            "Service" | "kubernetes:core/v1:Service" => Self::Service,
            "HelmReleaseV3" | "kubernetes:helm.sh/v3:Release" => Self::HelmReleaseV3,
            "HelmChartV4" | "kubernetes:helm.sh/v4:Chart" => Self::HelmChartV4,
            "ComputeInstance" | "aws:ec2/instance:Instance" => Self::ComputeInstance,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Lowercase slug used to derive per-kind rule names.
    pub fn slug(&self) -> String {
        self.as_str().to_lowercase()
    }

    /// Kinds whose pod spec lives under `spec.template.spec`.
    pub fn is_workload_controller(&self) -> bool {
        matches!(self, Self::Deployment | Self::StatefulSet | Self::Job)
    }

    /// Kinds that carry containers at all.
    pub fn has_containers(&self) -> bool {
        matches!(self, Self::Pod) || self.is_workload_controller()
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A diagnostic message produced by a predicate.
///
/// Predicates know nothing about rules or severities; the evaluator
/// enriches diagnostics into `Violation`s.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub message: String,
    pub remediation: Option<String>,
}

impl Diagnostic {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            remediation: None,
        }
    }

    pub fn with_remediation(message: impl Into<String>, remediation: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            remediation: Some(remediation.into()),
        }
    }
}

impl From<String> for Diagnostic {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&str> for Diagnostic {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

/// One reported failure of a rule against one resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub rule_name: RuleName,
    pub level: EnforcementLevel,
    pub message: String,
    pub resource_name: String,
    pub resource_kind: String,
    pub resource_namespace: Option<String>,
    pub file_path: PathBuf,
    /// Line where the resource's document starts (1-indexed).
    pub line: Option<u32>,
    pub remediation: Option<String>,
}

impl Violation {
    pub fn new(
        rule_name: impl Into<RuleName>,
        level: EnforcementLevel,
        message: impl Into<String>,
        resource_name: impl Into<String>,
        resource_kind: impl Into<String>,
    ) -> Self {
        Self {
            rule_name: rule_name.into(),
            level,
            message: message.into(),
            resource_name: resource_name.into(),
            resource_kind: resource_kind.into(),
            resource_namespace: None,
            file_path: PathBuf::new(),
            line: None,
            remediation: None,
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.resource_namespace = Some(namespace.into());
        self
    }

    pub fn with_file(mut self, file_path: impl Into<PathBuf>) -> Self {
        self.file_path = file_path.into();
        self
    }

    pub fn with_line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }

    pub fn with_remediation(mut self, remediation: impl Into<String>) -> Self {
        self.remediation = Some(remediation.into());
        self
    }

    /// Full identifier for the resource (namespace/name or just name).
    pub fn resource_identifier(&self) -> String {
        match &self.resource_namespace {
            Some(ns) => format!("{}/{}", ns, self.resource_name),
            None => self.resource_name.clone(),
        }
    }

    pub fn is_blocking(&self) -> bool {
        self.level.is_blocking()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enforcement_level_blocking() {
        assert!(EnforcementLevel::Mandatory.is_blocking());
        assert!(!EnforcementLevel::Advisory.is_blocking());
    }

    #[test]
    fn test_enforcement_level_serializes_lowercase() {
        let json = serde_json::to_string(&EnforcementLevel::Mandatory).unwrap();
        assert_eq!(json, "\"mandatory\"");
    }

    #[test]
    fn test_resource_kind_from_kind() {
        assert_eq!(ResourceKind::from_kind("Pod"), ResourceKind::Pod);
        assert_eq!(
            ResourceKind::from_kind("kubernetes:apps/v1:StatefulSet"),
            ResourceKind::StatefulSet
        );
        assert_eq!(
            ResourceKind::from_kind("kubernetes:helm.sh/v3:Release"),
            ResourceKind::HelmReleaseV3
        );
        assert_eq!(
            ResourceKind::from_kind("aws:ec2/instance:Instance"),
            ResourceKind::ComputeInstance
        );
        assert_eq!(
            ResourceKind::from_kind("ConfigMap"),
            ResourceKind::Unknown("ConfigMap".to_string())
        );
    }

    #[test]
    fn test_resource_kind_slug() {
        assert_eq!(ResourceKind::Pod.slug(), "pod");
        assert_eq!(ResourceKind::StatefulSet.slug(), "statefulset");
        assert_eq!(ResourceKind::Deployment.slug(), "deployment");
    }

    #[test]
    fn test_container_kinds() {
        assert!(ResourceKind::Pod.has_containers());
        assert!(!ResourceKind::Pod.is_workload_controller());
        assert!(ResourceKind::Job.is_workload_controller());
        assert!(!ResourceKind::Service.has_containers());
        assert!(!ResourceKind::HelmChartV4.has_containers());
    }

    #[test]
    fn test_violation_identifier() {
        let v = Violation::new(
            "pod-image-tag",
            EnforcementLevel::Advisory,
            "msg",
            "web",
            "Pod",
        );
        assert_eq!(v.resource_identifier(), "web");
        assert!(!v.is_blocking());

        let v = v.with_namespace("prod").with_line(4);
        assert_eq!(v.resource_identifier(), "prod/web");
        assert_eq!(v.line, Some(4));
    }

    #[test]
    fn test_diagnostic() {
        let d = Diagnostic::new("image is missing tag");
        assert!(d.remediation.is_none());

        let d = Diagnostic::with_remediation("issue", "fix it");
        assert_eq!(d.remediation, Some("fix it".to_string()));
    }
}
