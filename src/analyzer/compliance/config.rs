//! Run configuration.
//!
//! Only run-level knobs live here: which rules to skip, which paths to
//! ignore, and how to treat the outcome. The capability allow-list and the
//! disallowed instance prefixes are compiled in and cannot be configured.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default configuration file names, checked in order.
pub const DEFAULT_CONFIG_FILES: [&str; 2] = [".infra-policy.yaml", ".infra-policy.yml"];

/// Configuration for a policy run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyConfig {
    /// Rule names removed from the run.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Glob patterns for paths to ignore.
    #[serde(default)]
    pub ignore_paths: Vec<String>,

    /// If true, never return a non-zero exit code for violations.
    #[serde(default)]
    pub no_fail: bool,

    /// Evaluation worker threads; 0 means one per available CPU.
    #[serde(default)]
    pub threads: usize,
}

impl PolicyConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rule to the exclude list.
    pub fn exclude(mut self, rule: impl Into<String>) -> Self {
        self.exclude.push(rule.into());
        self
    }

    /// Add a path pattern to ignore.
    pub fn ignore_path(mut self, pattern: impl Into<String>) -> Self {
        self.ignore_paths.push(pattern.into());
        self
    }

    pub fn with_no_fail(mut self, no_fail: bool) -> Self {
        self.no_fail = no_fail;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Number of evaluation workers to run.
    pub fn effective_threads(&self) -> usize {
        if self.threads == 0 {
            num_cpus::get()
        } else {
            self.threads
        }
    }

    /// Check if a path matches one of the ignore globs.
    ///
    /// Patterns are matched against the whole path as given; there is no
    /// substring matching. Invalid patterns never match.
    pub fn should_ignore_path(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();

        self.ignore_paths.iter().any(|pattern| match glob::Pattern::new(pattern) {
            Ok(glob) => glob.matches(&path_str),
            Err(err) => {
                log::debug!("invalid ignore pattern '{}': {}", pattern, err);
                false
            }
        })
    }

    /// Load configuration from a YAML file.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;

        Self::load_from_str(&content)
    }

    /// Load configuration from a YAML string. An empty document is the
    /// default configuration.
    pub fn load_from_str(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Load config from the first default file present in `dir`.
    ///
    /// A default file that exists but fails to parse is an error rather
    /// than silently ignored.
    pub fn load_from_default(dir: &Path) -> Result<Option<Self>, ConfigError> {
        for filename in DEFAULT_CONFIG_FILES {
            let path = dir.join(filename);
            if path.is_file() {
                log::debug!("loading config from {}", path.display());
                return Self::load_from_file(&path).map(Some);
            }
        }
        Ok(None)
    }
}

/// Configuration errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    /// I/O error reading config file.
    #[error("I/O error: {0}")]
    IoError(String),
    /// Parse error in config file.
    #[error("Parse error: {0}")]
    ParseError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PolicyConfig::default();
        assert!(config.exclude.is_empty());
        assert!(config.ignore_paths.is_empty());
        assert!(!config.no_fail);
        assert_eq!(config.threads, 0);
        assert!(config.effective_threads() >= 1);
    }

    #[test]
    fn test_config_builder() {
        let config = PolicyConfig::new()
            .exclude("pod-image-tag")
            .with_no_fail(true)
            .with_threads(3);

        assert_eq!(config.exclude, vec!["pod-image-tag"]);
        assert!(config.no_fail);
        assert_eq!(config.effective_threads(), 3);
    }

    #[test]
    fn test_path_ignoring() {
        let config = PolicyConfig::new()
            .ignore_path("**/generated/**")
            .ignore_path("vendor/**");

        assert!(config.should_ignore_path(Path::new("vendor/k8s/deployment.yaml")));
        assert!(config.should_ignore_path(Path::new("deploy/generated/svc.yaml")));
        assert!(!config.should_ignore_path(Path::new("deploy/svc.yaml")));
    }

    #[test]
    fn test_path_ignoring_is_glob_only() {
        let config = PolicyConfig::new().ignore_path("p").ignore_path("svc");
        assert!(!config.should_ignore_path(Path::new("deploy/app.yaml")));
        assert!(!config.should_ignore_path(Path::new("deploy/svc.yaml")));

        let config = PolicyConfig::new().ignore_path("*.json");
        assert!(config.should_ignore_path(Path::new("deploy/compute.json")));
        assert!(!config.should_ignore_path(Path::new("deploy/compute.yaml")));

        let invalid = PolicyConfig::new().ignore_path("[unclosed");
        assert!(!invalid.should_ignore_path(Path::new("[unclosed")));
    }

    #[test]
    fn test_load_from_str() {
        let yaml = r#"
exclude:
  - pod-image-tag
  - job-image-tag
ignorePaths:
  - "**/tmp/**"
noFail: true
threads: 2
"#;
        let config = PolicyConfig::load_from_str(yaml).unwrap();
        assert_eq!(config.exclude, vec!["pod-image-tag", "job-image-tag"]);
        assert_eq!(config.ignore_paths, vec!["**/tmp/**"]);
        assert!(config.no_fail);
        assert_eq!(config.threads, 2);
    }

    #[test]
    fn test_load_from_empty_str() {
        assert_eq!(PolicyConfig::load_from_str("  \n").unwrap(), PolicyConfig::default());
    }

    #[test]
    fn test_load_from_str_invalid() {
        let err = PolicyConfig::load_from_str("exclude: {not: [a list").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_load_from_default() {
        let dir = tempfile::tempdir().unwrap();
        assert!(PolicyConfig::load_from_default(dir.path()).unwrap().is_none());

        std::fs::write(dir.path().join(".infra-policy.yml"), "noFail: true\n").unwrap();
        let config = PolicyConfig::load_from_default(dir.path()).unwrap().unwrap();
        assert!(config.no_fail);
    }
}
