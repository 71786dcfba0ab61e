//! Service exposure check.

use crate::analyzer::compliance::context::Resource;
use crate::analyzer::compliance::predicates::CheckFunc;
use crate::analyzer::compliance::types::Diagnostic;

/// Rejects Services of a given `spec.type`.
pub struct ServiceTypeCheck {
    disallowed: String,
}

impl ServiceTypeCheck {
    pub fn new(disallowed: impl Into<String>) -> Self {
        Self {
            disallowed: disallowed.into(),
        }
    }

    pub fn load_balancer() -> Self {
        Self::new("LoadBalancer")
    }
}

/// One diagnostic when `spec.type` equals `disallowed`; absent type is fine.
pub fn check_service_type(resource: &Resource, disallowed: &str) -> Vec<Diagnostic> {
    match resource.string_field("spec.type") {
        Some(svc_type) if svc_type == disallowed => {
            vec![Diagnostic::new(format!(
                "Service '{}' uses disallowed type '{}'",
                resource.name(),
                svc_type
            ))]
        }
        _ => Vec::new(),
    }
}

impl CheckFunc for ServiceTypeCheck {
    fn check(&self, resource: &Resource) -> Vec<Diagnostic> {
        check_service_type(resource, &self.disallowed)
    }
}
