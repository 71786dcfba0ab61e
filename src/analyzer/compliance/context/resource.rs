//! Resource wrappers for evaluation.

use crate::analyzer::compliance::types::ResourceKind;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where a resource came from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourceMetadata {
    /// The file path where this resource was defined.
    pub file_path: PathBuf,
    /// Line where the resource's document starts (1-indexed).
    pub line_number: Option<u32>,
}

impl ResourceMetadata {
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: path.into(),
            line_number: None,
        }
    }

    pub fn with_line(mut self, line: u32) -> Self {
        self.line_number = Some(line);
        self
    }
}

/// A kind-tagged resource ready for evaluation.
///
/// The body is kept as an opaque YAML value; rules reach into it through
/// the field extractors and never mutate it.
#[derive(Debug, Clone)]
pub struct Resource {
    pub kind: ResourceKind,
    pub name: String,
    pub namespace: Option<String>,
    pub body: serde_yaml::Value,
    pub metadata: ResourceMetadata,
}

impl Resource {
    pub fn new(kind: ResourceKind, name: impl Into<String>, body: serde_yaml::Value) -> Self {
        Self {
            kind,
            name: name.into(),
            namespace: None,
            body,
            metadata: ResourceMetadata::default(),
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn with_metadata(mut self, metadata: ResourceMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn kind(&self) -> &ResourceKind {
        &self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Look up a value by a dotted field path (e.g. `spec.template.spec`).
    ///
    /// Returns `None` as soon as any segment is absent.
    pub fn field(&self, path: &str) -> Option<&serde_yaml::Value> {
        path.split('.')
            .try_fold(&self.body, |value, segment| value.get(segment))
    }

    /// Look up a string field by dotted path.
    pub fn string_field(&self, path: &str) -> Option<&str> {
        self.field(path)?.as_str()
    }
}
