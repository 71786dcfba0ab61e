//! YAML parsing for policy resources.
//!
//! Two document shapes are understood:
//!
//! - Kubernetes manifests (`apiVersion`, `kind`, `metadata`, `spec`), whose
//!   whole document becomes the resource body.
//! - Resource envelopes (`type`, `name`, `props`/`properties`), as emitted by
//!   infrastructure-as-code previews, whose arguments become the body.
//!
//! JSON is accepted as a YAML subset; a top-level sequence is read as a list
//! of documents.

use crate::analyzer::compliance::context::{Resource, ResourceMetadata};
use crate::analyzer::compliance::extract::fields::get_string;
use crate::analyzer::compliance::types::ResourceKind;
use serde_yaml::Value;
use std::path::{Path, PathBuf};

/// File extensions picked up when walking a directory.
pub const MANIFEST_EXTENSIONS: [&str; 3] = ["yaml", "yml", "json"];

/// YAML parsing errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum YamlParseError {
    /// I/O error reading file.
    #[error("I/O error: {0}")]
    IoError(String),
    /// YAML syntax error.
    #[error("YAML syntax error: {0}")]
    SyntaxError(String),
}

/// Parse a YAML string containing one or more resources.
pub fn parse_yaml(content: &str) -> Result<Vec<Resource>, YamlParseError> {
    parse_yaml_with_path(content, Path::new("<stdin>"))
}

/// Parse YAML content with a source file path.
///
/// Documents without a kind are skipped. The first syntactically invalid
/// document aborts the file.
pub fn parse_yaml_with_path(content: &str, path: &Path) -> Result<Vec<Resource>, YamlParseError> {
    let mut resources = Vec::new();

    // A leading separator opens the first document rather than closing an
    // empty one.
    let content = content.strip_prefix("---").unwrap_or(content);
    let mut chunk_line = 1u32;

    for chunk in content.split("\n---") {
        let doc = chunk.trim_start();
        let leading = chunk[..chunk.len() - doc.len()].matches('\n').count() as u32;
        let line = chunk_line + leading;
        chunk_line += chunk.matches('\n').count() as u32 + 1;

        let doc = doc.trim_end();
        if doc.lines().all(|l| {
            let l = l.trim();
            l.is_empty() || l.starts_with('#')
        }) {
            continue;
        }

        let value = serde_yaml::from_str::<Value>(doc)
            .map_err(|e| YamlParseError::SyntaxError(format!("at line {}: {}", line, e)))?;

        match &value {
            Value::Sequence(items) => resources.extend(
                items
                    .iter()
                    .filter_map(|item| parse_resource(item, path, line)),
            ),
            _ => resources.extend(parse_resource(&value, path, line)),
        }
    }

    log::debug!("parsed {} resource(s) from {}", resources.len(), path.display());
    Ok(resources)
}

/// Parse a YAML or JSON file.
pub fn parse_yaml_file(path: &Path) -> Result<Vec<Resource>, YamlParseError> {
    let content =
        std::fs::read_to_string(path).map_err(|e| YamlParseError::IoError(e.to_string()))?;

    parse_yaml_with_path(&content, path)
}

/// Whether a path looks like a manifest file by extension.
pub fn is_manifest_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| MANIFEST_EXTENSIONS.contains(&ext))
}

/// All manifest files under a directory (recursively), in sorted walk order.
pub fn manifest_files(dir: &Path) -> Vec<PathBuf> {
    walkdir::WalkDir::new(dir)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && is_manifest_file(e.path()))
        .map(|e| e.into_path())
        .collect()
}

/// Parse a single resource from a YAML value.
fn parse_resource(value: &Value, path: &Path, line: u32) -> Option<Resource> {
    if !value.is_mapping() {
        return None;
    }
    let kind = resolve_kind(value)?;

    let metadata = value.get("metadata");
    let name = metadata
        .and_then(|m| get_string(m, "name"))
        .or_else(|| get_string(value, "name"))
        .unwrap_or_default();
    let namespace = metadata.and_then(|m| get_string(m, "namespace"));

    let body = ["props", "properties"]
        .iter()
        .find_map(|key| value.get(*key))
        .filter(|props| props.is_mapping())
        .cloned()
        .unwrap_or_else(|| value.clone());

    let mut resource = Resource::new(kind, name, body)
        .with_metadata(ResourceMetadata::from_file(path).with_line(line));
    if let Some(ns) = namespace {
        resource = resource.with_namespace(ns);
    }
    Some(resource)
}

/// Resolve the kind from `kind` (qualified by `apiVersion` when that names a
/// known type) or from an envelope `type` token.
fn resolve_kind(value: &Value) -> Option<ResourceKind> {
    if let Some(kind) = value.get("kind").and_then(Value::as_str) {
        let resolved = ResourceKind::from_kind(kind);
        if let ResourceKind::Unknown(_) = resolved
            && let Some(api_version) = value.get("apiVersion").and_then(Value::as_str)
        {
            let qualified = ResourceKind::from_kind(&type_token(api_version, kind));
            if !matches!(qualified, ResourceKind::Unknown(_)) {
                return Some(qualified);
            }
        }
        return Some(resolved);
    }

    value
        .get("type")
        .and_then(Value::as_str)
        .map(ResourceKind::from_kind)
}

/// `apps/v1` + `Deployment` → `kubernetes:apps/v1:Deployment`; the core group
/// (`v1`) is spelled `core/v1`.
fn type_token(api_version: &str, kind: &str) -> String {
    if api_version.contains('/') {
        format!("kubernetes:{}:{}", api_version, kind)
    } else {
        format!("kubernetes:core/{}:{}", api_version, kind)
    }
}
