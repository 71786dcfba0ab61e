//! Run orchestration: load resources, evaluate them on a bounded worker
//! pool, and aggregate the outcome.

use crate::analyzer::compliance::config::PolicyConfig;
use crate::analyzer::compliance::context::{EvalContext, EvalContextImpl, Resource};
use crate::analyzer::compliance::evaluate::evaluate_rules;
use crate::analyzer::compliance::parser::yaml;
use crate::analyzer::compliance::report::RunReport;
use crate::analyzer::compliance::rules::{Rule, RuleSet, builtin_rule_set};
use crate::analyzer::compliance::types::Violation;

use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// Check resources from a file or directory with the built-in rules.
pub fn check_path(path: &Path, config: &PolicyConfig) -> RunReport {
    check_paths(&[path.to_path_buf()], config)
}

/// Check resources from several files or directories as one run.
pub fn check_paths(paths: &[PathBuf], config: &PolicyConfig) -> RunReport {
    let ctx = load_context(paths, config);
    run(&ctx, config)
}

/// Check YAML content directly.
pub fn check_content(content: &str, config: &PolicyConfig) -> RunReport {
    let mut ctx = EvalContextImpl::new();
    match yaml::parse_yaml(content) {
        Ok(resources) => ctx.add_resources(resources),
        Err(err) => ctx.add_load_error(err.to_string()),
    }
    run(&ctx, config)
}

/// Load every resource reachable from `paths`.
///
/// Directories are walked recursively for manifest files. Files that cannot
/// be read or parsed are recorded as load errors and loading continues.
pub fn load_context(paths: &[PathBuf], config: &PolicyConfig) -> EvalContextImpl {
    let mut ctx = EvalContextImpl::new();

    for path in paths {
        if config.should_ignore_path(path) {
            log::debug!("ignoring {}", path.display());
            continue;
        }

        if path.is_dir() {
            for file in yaml::manifest_files(path) {
                if config.should_ignore_path(&file) {
                    log::debug!("ignoring {}", file.display());
                    continue;
                }
                load_file(&mut ctx, &file);
            }
        } else {
            load_file(&mut ctx, path);
        }
    }

    ctx
}

fn load_file(ctx: &mut EvalContextImpl, path: &Path) {
    match yaml::parse_yaml_file(path) {
        Ok(resources) => ctx.add_resources(resources),
        Err(err) => {
            log::warn!("failed to parse {}: {}", path.display(), err);
            ctx.add_load_error(format!("{}: {}", path.display(), err));
        }
    }
}

/// Evaluate a loaded context with the built-in rules.
pub fn run(ctx: &dyn EvalContext, config: &PolicyConfig) -> RunReport {
    run_with_rules(ctx, builtin_rule_set(), config)
}

/// Evaluate a loaded context with a given rule set.
pub fn run_with_rules(ctx: &dyn EvalContext, rules: &RuleSet, config: &PolicyConfig) -> RunReport {
    for name in &config.exclude {
        if rules.get(name).is_none() {
            log::warn!("excluded rule '{}' does not exist", name);
        }
    }

    let selected = rules.select(&config.exclude);
    let resources = ctx.resources();
    let threads = config.effective_threads();

    log::info!(
        "evaluating {} resource(s) against {} rule(s) on {} thread(s)",
        resources.len(),
        selected.len(),
        threads
    );

    let violations: Vec<Violation> = evaluate_in_pool(resources, &selected, threads)
        .into_iter()
        .flatten()
        .collect();

    let mut report = RunReport::from_violations(violations);
    report.parse_errors = ctx.load_errors().to_vec();
    report.summary.resources_evaluated = resources.len();
    report.summary.rules_run = selected.len();

    log::info!(
        "run {}: {} mandatory, {} advisory violation(s)",
        if report.summary.passed { "passed" } else { "failed" },
        report.summary.mandatory,
        report.summary.advisory
    );

    report
}

/// Evaluate resources in parallel, keeping input order.
fn evaluate_in_pool(resources: &[Resource], rules: &[&Rule], threads: usize) -> Vec<Vec<Violation>> {
    let work = || {
        resources
            .par_iter()
            .map(|resource| {
                log::debug!("evaluating {} '{}'", resource.kind(), resource.name());
                evaluate_rules(resource, rules.iter().copied())
            })
            .collect::<Vec<_>>()
    };

    match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
        Ok(pool) => pool.install(work),
        Err(err) => {
            log::warn!("could not build a {}-thread pool ({}), using the global pool", threads, err);
            work()
        }
    }
}
