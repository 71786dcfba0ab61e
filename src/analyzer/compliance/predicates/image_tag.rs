//! Image tag mutability detection.

use crate::analyzer::compliance::extract::{Container, ContainerRole};
use crate::analyzer::compliance::predicates::{ContainerCheck, describe_container};
use crate::analyzer::compliance::types::Diagnostic;

/// Why an image reference's tag is not acceptable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageTagFinding {
    /// No `:` at all; the runtime falls back to an implicit tag.
    MissingTag,
    /// Explicit `:latest`.
    MutableTag,
}

/// Classify an image reference.
///
/// The two findings are mutually exclusive: a reference without a colon
/// cannot end in `:latest`.
pub fn classify_image_tag(image: &str) -> Option<ImageTagFinding> {
    if !image.contains(':') {
        Some(ImageTagFinding::MissingTag)
    } else if image.ends_with(":latest") {
        Some(ImageTagFinding::MutableTag)
    } else {
        None
    }
}

pub fn check_image_tag(role: ContainerRole, container: &Container) -> Vec<Diagnostic> {
    let Some(image) = container.image.as_deref() else {
        return Vec::new();
    };

    let message = match classify_image_tag(image) {
        Some(ImageTagFinding::MissingTag) => format!(
            "{} uses image '{}' with a missing tag; it resolves to an implicit, mutable tag",
            describe_container(role, container),
            image
        ),
        Some(ImageTagFinding::MutableTag) => format!(
            "{} uses image '{}' with the mutable tag ':latest'",
            describe_container(role, container),
            image
        ),
        None => return Vec::new(),
    };

    vec![Diagnostic::new(message)]
}

pub struct ImageTagCheck;

impl ContainerCheck for ImageTagCheck {
    fn check_container(&self, role: ContainerRole, container: &Container) -> Vec<Diagnostic> {
        check_image_tag(role, container)
    }
}
