//! Container extraction.
//!
//! Containers live directly under `spec` on a Pod, and under
//! `spec.template.spec` on workload controllers. Which of the two applies
//! is decided once per kind by an `ExtractionStrategy`.

use crate::analyzer::compliance::context::Resource;
use crate::analyzer::compliance::extract::fields::{get_string, get_string_array};
use crate::analyzer::compliance::types::ResourceKind;
use std::fmt;

/// Which container list a container came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerRole {
    Main,
    Init,
    Ephemeral,
}

impl ContainerRole {
    /// Roles in extraction order, paired with their pod spec field.
    pub const ALL: [(ContainerRole, &'static str); 3] = [
        (ContainerRole::Main, "containers"),
        (ContainerRole::Init, "initContainers"),
        (ContainerRole::Ephemeral, "ephemeralContainers"),
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::Init => "init",
            Self::Ephemeral => "ephemeral",
        }
    }
}

impl fmt::Display for ContainerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The parts of a container the policy pack looks at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Container {
    pub name: String,
    pub image: Option<String>,
    pub security_context: Option<SecurityContext>,
}

impl Container {
    /// Capabilities requested via `securityContext.capabilities.add`.
    ///
    /// `None` when any part of that path is absent.
    pub fn added_capabilities(&self) -> Option<&[String]> {
        self.security_context
            .as_ref()?
            .capabilities
            .as_ref()
            .map(|caps| caps.add.as_slice())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecurityContext {
    pub capabilities: Option<Capabilities>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Capabilities {
    pub add: Vec<String>,
}

/// How to reach the pod spec for a given kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionStrategy {
    /// Pod spec is the resource's own `spec`.
    Direct,
    /// Pod spec is nested under `spec.template.spec`.
    PodTemplate,
}

impl ExtractionStrategy {
    /// Strategy for a kind, or `None` for kinds that carry no containers.
    pub fn for_kind(kind: &ResourceKind) -> Option<Self> {
        match kind {
            ResourceKind::Pod => Some(Self::Direct),
            ResourceKind::Deployment | ResourceKind::StatefulSet | ResourceKind::Job => {
                Some(Self::PodTemplate)
            }
            _ => None,
        }
    }

    pub fn pod_spec_path(&self) -> &'static str {
        match self {
            Self::Direct => "spec",
            Self::PodTemplate => "spec.template.spec",
        }
    }

    /// Locate the pod spec. Absent structure yields `None`, never an error.
    pub fn pod_spec<'a>(&self, resource: &'a Resource) -> Option<&'a serde_yaml::Value> {
        resource.field(self.pod_spec_path())
    }
}

/// Extract every container of a resource, tagged with its role.
///
/// Order is main containers, then init, then ephemeral; each list keeps
/// document order. Kinds without containers yield an empty list.
pub fn extract_containers(resource: &Resource) -> Vec<(ContainerRole, Container)> {
    let Some(strategy) = ExtractionStrategy::for_kind(resource.kind()) else {
        return Vec::new();
    };
    let Some(pod_spec) = strategy.pod_spec(resource) else {
        log::trace!(
            "{}/{} has no pod spec at {}",
            resource.kind(),
            resource.name(),
            strategy.pod_spec_path()
        );
        return Vec::new();
    };

    let mut containers = Vec::new();
    for (role, field) in ContainerRole::ALL {
        containers.extend(
            parse_containers(pod_spec.get(field))
                .into_iter()
                .map(|c| (role, c)),
        );
    }
    containers
}

fn parse_containers(containers: Option<&serde_yaml::Value>) -> Vec<Container> {
    let Some(containers) = containers else {
        return Vec::new();
    };
    let Some(arr) = containers.as_sequence() else {
        return Vec::new();
    };

    arr.iter().map(parse_container).collect()
}

fn parse_container(c: &serde_yaml::Value) -> Container {
    Container {
        name: get_string(c, "name").unwrap_or_default(),
        image: get_string(c, "image"),
        security_context: parse_security_context(c.get("securityContext")),
    }
}

fn parse_security_context(sc: Option<&serde_yaml::Value>) -> Option<SecurityContext> {
    let sc = sc?;
    Some(SecurityContext {
        capabilities: parse_capabilities(sc.get("capabilities")),
    })
}

fn parse_capabilities(caps: Option<&serde_yaml::Value>) -> Option<Capabilities> {
    let caps = caps?;
    Some(Capabilities {
        add: get_string_array(caps.get("add")),
    })
}
