//! Linux capability allow-listing.

use crate::analyzer::compliance::extract::{Container, ContainerRole};
use crate::analyzer::compliance::predicates::{ContainerCheck, describe_container};
use crate::analyzer::compliance::types::Diagnostic;

/// Capabilities a container may request via `securityContext.capabilities.add`.
///
/// This is the container runtime's default capability set; anything beyond it
/// widens the container's privileges. Edit at build time only.
pub const ALLOWED_CAPABILITIES: [&str; 13] = [
    "AUDIT_WRITE",
    "CHOWN",
    "DAC_OVERRIDE",
    "FOWNER",
    "FSETID",
    "KILL",
    "MKNOD",
    "NET_BIND_SERVICE",
    "SETFCAP",
    "SETGID",
    "SETPCAP",
    "SETUID",
    "SYS_CHROOT",
];

pub fn is_allowed_capability(capability: &str) -> bool {
    ALLOWED_CAPABILITIES.contains(&capability)
}

/// Report every requested capability outside the allow-list.
///
/// One diagnostic per offending entry, in request order. Duplicates are
/// reported each time they appear.
pub fn check_capabilities(role: ContainerRole, container: &Container) -> Vec<Diagnostic> {
    let Some(requested) = container.added_capabilities() else {
        return Vec::new();
    };

    requested
        .iter()
        .filter(|cap| !is_allowed_capability(cap))
        .map(|cap| {
            Diagnostic::new(format!(
                "{} requests capability '{}' which is not in the allowed set [{}]",
                describe_container(role, container),
                cap,
                ALLOWED_CAPABILITIES.join(", ")
            ))
        })
        .collect()
}

pub struct AllowedCapabilitiesCheck;

impl ContainerCheck for AllowedCapabilitiesCheck {
    fn check_container(&self, role: ContainerRole, container: &Container) -> Vec<Diagnostic> {
        check_capabilities(role, container)
    }
}
