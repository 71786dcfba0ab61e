use crate::analyzer::compliance::context::EvalContextImpl;
use crate::analyzer::compliance::parser::parse_yaml_with_path;
use crate::analyzer::compliance::{
    OutputFormat, PolicyConfig, RunReport, format_report_to_string, load_context, run,
};
use crate::error::PolicyError;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Options for the `check` command, as given on the command line.
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    pub paths: Vec<PathBuf>,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub exclude: Vec<String>,
    pub no_fail: bool,
    pub threads: Option<usize>,
}

/// How a `check` run ended, mapped to the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    Passed,
    /// At least one mandatory violation.
    Failed,
    /// Some input could not be loaded.
    LoadErrors,
}

impl CheckOutcome {
    pub fn from_report(report: &RunReport, no_fail: bool) -> Self {
        if report.has_parse_errors() {
            Self::LoadErrors
        } else if report.should_fail(no_fail) {
            Self::Failed
        } else {
            Self::Passed
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Passed => 0,
            Self::Failed => 1,
            Self::LoadErrors => 2,
        }
    }
}

/// Resolve the run configuration: an explicit file, else a default file in
/// the working directory, else defaults.
pub fn resolve_config(explicit: Option<&Path>) -> crate::Result<PolicyConfig> {
    match explicit {
        Some(path) => Ok(PolicyConfig::load_from_file(path)?),
        None => Ok(PolicyConfig::load_from_default(Path::new("."))?.unwrap_or_default()),
    }
}

/// Layer command-line options over file configuration. Exclusions add up;
/// scalar flags replace the file value when given.
pub fn apply_options(mut config: PolicyConfig, options: &CheckOptions) -> PolicyConfig {
    config.exclude.extend(options.exclude.iter().cloned());
    if options.no_fail {
        config.no_fail = true;
    }
    if let Some(threads) = options.threads {
        config.threads = threads;
    }
    config
}

pub fn handle_check(options: CheckOptions, config_path: Option<&Path>) -> crate::Result<CheckOutcome> {
    let config = apply_options(resolve_config(config_path)?, &options);
    log::debug!("effective config: {:?}", config);

    let mut stdin_content = None;
    let mut paths = Vec::new();
    for path in &options.paths {
        if path.as_os_str() == "-" {
            // Stdin is read once; repeated `-` arguments add nothing.
            if stdin_content.is_none() {
                let mut content = String::new();
                std::io::stdin().read_to_string(&mut content)?;
                stdin_content = Some(content);
            }
        } else if !path.exists() {
            return Err(PolicyError::PathNotFound(path.clone()));
        } else {
            paths.push(path.clone());
        }
    }

    let mut ctx: EvalContextImpl = load_context(&paths, &config);
    if let Some(content) = stdin_content {
        ctx.add_resources(parse_yaml_with_path(&content, Path::new("<stdin>"))?);
    }

    let report = run(&ctx, &config);
    let rendered = format_report_to_string(&report, options.format);

    match &options.output {
        Some(output_path) => {
            std::fs::write(output_path, &rendered)?;
            log::info!("report written to {}", output_path.display());
        }
        None => print!("{}", rendered),
    }

    Ok(CheckOutcome::from_report(&report, config.no_fail))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::compliance::types::{EnforcementLevel, Violation};

    #[test]
    fn test_outcome_exit_codes() {
        let advisory = RunReport::from_violations(vec![Violation::new(
            "pod-image-tag",
            EnforcementLevel::Advisory,
            "m",
            "p",
            "Pod",
        )]);
        assert_eq!(CheckOutcome::from_report(&advisory, false).exit_code(), 0);

        let mandatory = RunReport::from_violations(vec![Violation::new(
            "service-no-load-balancer",
            EnforcementLevel::Mandatory,
            "m",
            "s",
            "Service",
        )]);
        assert_eq!(CheckOutcome::from_report(&mandatory, false), CheckOutcome::Failed);
        assert_eq!(CheckOutcome::from_report(&mandatory, true), CheckOutcome::Passed);

        let mut broken = mandatory.clone();
        broken.parse_errors.push("bad.yaml: YAML syntax error".to_string());
        assert_eq!(CheckOutcome::from_report(&broken, true).exit_code(), 2);
    }

    #[test]
    fn test_apply_options_layers_over_file() {
        let file = PolicyConfig::new().exclude("pod-image-tag").with_threads(2);
        let options = CheckOptions {
            exclude: vec!["job-image-tag".to_string()],
            threads: Some(8),
            no_fail: true,
            ..Default::default()
        };
        let config = apply_options(file, &options);
        assert_eq!(config.exclude, vec!["pod-image-tag", "job-image-tag"]);
        assert_eq!(config.threads, 8);
        assert!(config.no_fail);
    }

    #[test]
    fn test_apply_options_keeps_file_values() {
        let file = PolicyConfig::new().with_no_fail(true).with_threads(3);
        let config = apply_options(file, &CheckOptions::default());
        assert!(config.no_fail);
        assert_eq!(config.threads, 3);
    }

    #[test]
    fn test_handle_check_missing_path() {
        let options = CheckOptions {
            paths: vec![PathBuf::from("/no/such/manifest.yaml")],
            ..Default::default()
        };
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("policy.yaml");
        std::fs::write(&config, "").unwrap();
        let err = handle_check(options, Some(config.as_path())).unwrap_err();
        assert!(matches!(err, PolicyError::PathNotFound(_)));
    }

    #[test]
    fn test_handle_check_writes_output() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = dir.path().join("svc.yaml");
        std::fs::write(
            &manifest,
            "apiVersion: v1\nkind: Service\nmetadata:\n  name: lb\nspec:\n  type: LoadBalancer\n",
        )
        .unwrap();
        let config = dir.path().join("policy.yaml");
        std::fs::write(&config, "threads: 1\n").unwrap();
        let report = dir.path().join("report.json");

        let options = CheckOptions {
            paths: vec![manifest],
            format: OutputFormat::Json,
            output: Some(report.clone()),
            ..Default::default()
        };
        let outcome = handle_check(options, Some(config.as_path())).unwrap();
        assert_eq!(outcome, CheckOutcome::Failed);

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&report).unwrap()).unwrap();
        assert_eq!(written["summary"]["mandatory"], 1);
    }
}
