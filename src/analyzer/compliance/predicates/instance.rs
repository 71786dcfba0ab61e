//! Compute instance family check.
//!
//! A plain lexical prefix match on the instance type string; there is no
//! knowledge of the provider's instance family taxonomy.

use crate::analyzer::compliance::context::Resource;
use crate::analyzer::compliance::predicates::CheckFunc;
use crate::analyzer::compliance::types::Diagnostic;

/// Instance type prefixes that are not allowed (GPU/accelerator families).
/// Checked in order; edit at build time only.
pub const DISALLOWED_INSTANCE_PREFIXES: [&str; 2] = ["g", "p"];

/// First disallowed prefix the instance type starts with, if any.
pub fn disallowed_prefix<'a>(instance_type: &str, prefixes: &[&'a str]) -> Option<&'a str> {
    prefixes
        .iter()
        .find(|prefix| instance_type.starts_with(*prefix))
        .copied()
}

pub struct InstanceTypeCheck {
    prefixes: Vec<&'static str>,
}

impl InstanceTypeCheck {
    pub fn new(prefixes: &[&'static str]) -> Self {
        Self {
            prefixes: prefixes.to_vec(),
        }
    }
}

impl Default for InstanceTypeCheck {
    fn default() -> Self {
        Self::new(&DISALLOWED_INSTANCE_PREFIXES)
    }
}

/// One diagnostic when `instanceType` starts with a disallowed prefix.
pub fn check_instance_type(resource: &Resource, prefixes: &[&str]) -> Vec<Diagnostic> {
    let Some(instance_type) = resource.string_field("instanceType") else {
        return Vec::new();
    };

    match disallowed_prefix(instance_type, prefixes) {
        Some(prefix) => vec![Diagnostic::new(format!(
            "Instance '{}' uses instance type '{}' from disallowed family prefix '{}'",
            resource.name(),
            instance_type,
            prefix
        ))],
        None => Vec::new(),
    }
}

impl CheckFunc for InstanceTypeCheck {
    fn check(&self, resource: &Resource) -> Vec<Diagnostic> {
        check_instance_type(resource, &self.prefixes)
    }
}
