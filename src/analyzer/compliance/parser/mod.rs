//! Manifest parsing.

pub mod yaml;

pub use yaml::{YamlParseError, parse_yaml, parse_yaml_file, parse_yaml_with_path};
