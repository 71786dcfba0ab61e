//! # infra-policy
//!
//! A compliance engine that evaluates infrastructure resources against a
//! compiled-in policy pack, and the `policy-ctl` command line around it.
//!
//! ## Features
//!
//! - **Kubernetes**: Service exposure, container capabilities and image tags
//! - **Helm**: OCI-only chart sources for v3 releases and v4 charts
//! - **Compute**: Disallowed instance families
//! - **Two enforcement levels**: mandatory rules fail a run, advisory rules only report
//! - **Multiple formats**: Plain text, JSON and GitHub Actions annotations
//!
//! ## Example
//!
//! ```rust,no_run
//! use infra_policy::analyzer::compliance::{PolicyConfig, check_path};
//! use std::path::Path;
//!
//! let report = check_path(Path::new("./deploy"), &PolicyConfig::default());
//! println!("passed: {}", report.summary.passed);
//! ```

pub mod analyzer;
pub mod cli;
pub mod error;
pub mod handlers;

// Re-export commonly used types and functions
pub use analyzer::compliance::{PolicyConfig, RunReport, Violation, check_path, check_paths};
pub use error::{PolicyError, Result};
