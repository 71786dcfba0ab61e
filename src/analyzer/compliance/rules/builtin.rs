//! Built-in rules.
//!
//! Container rules come from one generator over the container-bearing
//! kinds, so every workload kind gets the same capability and image-tag
//! checks without repeating their definitions.

use crate::analyzer::compliance::predicates::capabilities::AllowedCapabilitiesCheck;
use crate::analyzer::compliance::predicates::chart::{ChartVariant, HelmChartCheck};
use crate::analyzer::compliance::predicates::image_tag::ImageTagCheck;
use crate::analyzer::compliance::predicates::instance::InstanceTypeCheck;
use crate::analyzer::compliance::predicates::service::ServiceTypeCheck;
use crate::analyzer::compliance::rules::Rule;
use crate::analyzer::compliance::types::{EnforcementLevel, ResourceKind};

/// Kinds that carry containers, in rule registration order.
pub const CONTAINER_KINDS: [ResourceKind; 4] = [
    ResourceKind::Pod,
    ResourceKind::Deployment,
    ResourceKind::StatefulSet,
    ResourceKind::Job,
];

/// Per-container checks stamped out for every container kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerRuleTemplate {
    AllowedCapabilities,
    ImageTag,
}

impl ContainerRuleTemplate {
    pub const ALL: [ContainerRuleTemplate; 2] = [Self::AllowedCapabilities, Self::ImageTag];

    pub fn key(&self) -> &'static str {
        match self {
            Self::AllowedCapabilities => "allowed-capabilities",
            Self::ImageTag => "image-tag",
        }
    }

    fn description(&self, kind: &ResourceKind) -> String {
        match self {
            Self::AllowedCapabilities => format!(
                "{} containers may only add capabilities from the default allow-list.",
                kind
            ),
            Self::ImageTag => format!(
                "{} containers must pin an explicit, immutable image tag.",
                kind
            ),
        }
    }

    fn remediation(&self) -> &'static str {
        match self {
            Self::AllowedCapabilities => {
                "Remove the capability from securityContext.capabilities.add or run the workload without it."
            }
            Self::ImageTag => "Use a specific image tag such as nginx:1.25.3 instead of :latest or no tag.",
        }
    }

    /// Instantiate this template for one kind.
    pub fn instantiate(&self, kind: ResourceKind) -> Rule {
        let name = format!("{}-{}", kind.slug(), self.key());
        let description = self.description(&kind);
        match self {
            Self::AllowedCapabilities => Rule::container(
                name,
                kind,
                EnforcementLevel::Advisory,
                description,
                self.remediation(),
                AllowedCapabilitiesCheck,
            ),
            Self::ImageTag => Rule::container(
                name,
                kind,
                EnforcementLevel::Advisory,
                description,
                self.remediation(),
                ImageTagCheck,
            ),
        }
    }
}

/// Container rules for every `CONTAINER_KINDS` × `ContainerRuleTemplate` pair.
pub fn container_rules() -> Vec<Rule> {
    CONTAINER_KINDS
        .into_iter()
        .flat_map(|kind| {
            ContainerRuleTemplate::ALL
                .into_iter()
                .map(move |template| template.instantiate(kind.clone()))
        })
        .collect()
}

/// Get all built-in rules in registration order.
pub fn builtin_rules() -> Vec<Rule> {
    let mut rules = vec![Rule::resource(
        "service-no-load-balancer",
        ResourceKind::Service,
        EnforcementLevel::Mandatory,
        "Services must not be exposed through a cloud load balancer.",
        "Use type ClusterIP behind an ingress controller instead of LoadBalancer.",
        ServiceTypeCheck::load_balancer(),
    )];

    rules.extend(container_rules());

    rules.push(Rule::resource(
        "helm-release-v3-oci-chart",
        ResourceKind::HelmReleaseV3,
        EnforcementLevel::Mandatory,
        "Helm v3 releases must install charts from OCI registries or local paths.",
        "Reference the chart as oci://<registry>/<chart> or a ./ local path.",
        HelmChartCheck::new(ChartVariant::V3),
    ));
    rules.push(Rule::resource(
        "helm-chart-v4-oci-chart",
        ResourceKind::HelmChartV4,
        EnforcementLevel::Mandatory,
        "Helm v4 charts must be OCI references or local paths, without a repositoryOpts repo.",
        "Reference the chart as oci://<registry>/<chart> or a ./ local path.",
        HelmChartCheck::new(ChartVariant::V4),
    ));
    rules.push(Rule::resource(
        "compute-instance-allowed-type",
        ResourceKind::ComputeInstance,
        EnforcementLevel::Mandatory,
        "Compute instances must not use disallowed (GPU/accelerator) instance families.",
        "Pick a general-purpose instance type such as t3, m5 or c6i.",
        InstanceTypeCheck::default(),
    ));

    rules
}
