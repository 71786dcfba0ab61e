//! Predicate library.
//!
//! Predicates are pure, total functions over already-extracted values.
//! They return diagnostics and know nothing about rule names or
//! enforcement levels; absent structure simply yields no diagnostics.

pub mod capabilities;
pub mod chart;
pub mod image_tag;
pub mod instance;
pub mod service;

use crate::analyzer::compliance::context::Resource;
use crate::analyzer::compliance::extract::{Container, ContainerRole};
use crate::analyzer::compliance::types::Diagnostic;

/// A check that reads its fields straight off a resource.
pub trait CheckFunc: Send + Sync {
    fn check(&self, resource: &Resource) -> Vec<Diagnostic>;
}

/// A check applied to every extracted container of a resource.
///
/// The evaluator runs the field extractor once per resource and feeds each
/// `(role, container)` pair to every container check, regardless of role.
pub trait ContainerCheck: Send + Sync {
    fn check_container(&self, role: ContainerRole, container: &Container) -> Vec<Diagnostic>;
}

/// Human-readable container label used in messages, e.g. `Init container 'migrate'`.
pub fn describe_container(role: ContainerRole, container: &Container) -> String {
    let label = match role {
        ContainerRole::Main => "Container",
        ContainerRole::Init => "Init container",
        ContainerRole::Ephemeral => "Ephemeral container",
    };
    format!("{} '{}'", label, container.name)
}
