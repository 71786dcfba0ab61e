//! Error types for the policy CLI.
//!
//! The engine itself never fails; errors only arise while loading
//! configuration and input from the host side.

use crate::analyzer::compliance::config::ConfigError;
use crate::analyzer::compliance::parser::YamlParseError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PolicyError {
    /// Reading input or writing the report failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Input given directly (e.g. on stdin) is not valid YAML.
    #[error("Parse error: {0}")]
    Parse(#[from] YamlParseError),

    /// The configuration file could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A path named on the command line does not exist.
    #[error("Path not found: {}", .0.display())]
    PathNotFound(PathBuf),
}

pub type Result<T> = std::result::Result<T, PolicyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = PolicyError::PathNotFound(PathBuf::from("deploy/missing.yaml"));
        assert_eq!(err.to_string(), "Path not found: deploy/missing.yaml");

        let err: PolicyError = ConfigError::ParseError("bad indent".to_string()).into();
        assert_eq!(err.to_string(), "Configuration error: Parse error: bad indent");
    }
}
