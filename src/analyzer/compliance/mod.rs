//! Compliance engine: a compiled-in policy pack evaluated against
//! infrastructure resources.
//!
//! Each resource is matched against the rules for its kind. Rules wrap pure
//! predicates and carry a fixed enforcement level; a run fails only when a
//! mandatory rule is violated, while advisory violations are reported
//! alongside.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_policy::analyzer::compliance::{PolicyConfig, check_path};
//! use std::path::Path;
//!
//! let report = check_path(Path::new("./deploy"), &PolicyConfig::default());
//!
//! for violation in &report.violations {
//!     println!("{} [{}] {}", violation.rule_name, violation.level, violation.message);
//! }
//! assert!(report.summary.passed);
//! ```
//!
//! # Rules
//!
//! ## Kubernetes
//! - Services must not use `LoadBalancer`
//! - Containers of Pods, Deployments, StatefulSets and Jobs may only add
//!   allow-listed capabilities and must pin an immutable image tag (advisory)
//!
//! ## Helm
//! - v3 releases and v4 charts must come from OCI registries or local paths
//!
//! ## Compute
//! - Instances must not use disallowed (GPU/accelerator) families

pub mod check;
pub mod config;
pub mod context;
pub mod evaluate;
pub mod extract;
pub mod formatter;
pub mod parser;
pub mod predicates;
pub mod report;
pub mod rules;
pub mod types;

// Re-export main types and functions
pub use check::{check_content, check_path, check_paths, load_context, run, run_with_rules};
pub use config::{ConfigError, PolicyConfig};
pub use evaluate::{evaluate, evaluate_rules};
pub use formatter::{OutputFormat, format_report_to_string, format_rules_to_string};
pub use report::{RunReport, RunSummary};
pub use rules::{Rule, RuleSet, builtin_rule_set};
pub use types::{Diagnostic, EnforcementLevel, ResourceKind, RuleName, Violation};
