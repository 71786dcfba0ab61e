//! Helm chart source classification.
//!
//! Only OCI registries (`oci://`) and local chart paths (`./`, `../`) are
//! acceptable chart sources. Two variants exist because the v3 release shape
//! can lean on implicitly configured repositories while the v4 chart shape
//! cannot:
//!
//! - v3 checks `repositoryOpts.repo` for plain HTTP(S) repositories and only
//!   questions bare or slash-qualified chart names when repository options
//!   are given without an OCI registry.
//! - v4 rejects any `repositoryOpts.repo` outright and requires an OCI or local chart
//!   reference everywhere.
//!
//! The asymmetry is intentional; both variants are pinned by tests.

use crate::analyzer::compliance::context::Resource;
use crate::analyzer::compliance::extract::fields::get_string;
use crate::analyzer::compliance::predicates::CheckFunc;
use crate::analyzer::compliance::types::Diagnostic;

const OCI_PREFIX: &str = "oci://";
const LOCAL_PREFIXES: [&str; 2] = ["./", "../"];
const HTTP_PREFIXES: [&str; 2] = ["http://", "https://"];

/// Which Helm resource shape the chart reference belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartVariant {
    V3,
    V4,
}

/// Where a chart reference points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartSource {
    Oci,
    Url,
    LocalPath,
    /// `repo/chart`; needs a traditional chart repository.
    RepositoryQualified,
    /// A plain chart name.
    Bare,
}

impl ChartSource {
    pub fn classify(chart: &str) -> Self {
        if chart.starts_with(OCI_PREFIX) {
            Self::Oci
        } else if is_http_url(chart) {
            Self::Url
        } else if LOCAL_PREFIXES.iter().any(|p| chart.starts_with(p)) {
            Self::LocalPath
        } else if chart.contains('/') {
            Self::RepositoryQualified
        } else {
            Self::Bare
        }
    }
}

/// The `repositoryOpts` value of a Helm resource.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepositoryOpts {
    pub repo: Option<String>,
}

impl RepositoryOpts {
    pub fn from_value(value: &serde_yaml::Value) -> Self {
        Self {
            repo: get_string(value, "repo"),
        }
    }

    fn repo_is_oci(&self) -> bool {
        self.repo.as_deref().is_some_and(|r| r.starts_with(OCI_PREFIX))
    }
}

/// Why a chart reference is not acceptable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartFinding {
    DirectUrl,
    NonOciRepository,
    RepositoryOptsNotAllowed,
    TraditionalRepoReference,
    MissingOciProtocol,
}

impl ChartFinding {
    pub fn message(&self, chart: &str, opts: Option<&RepositoryOpts>) -> String {
        let repo = opts.and_then(|o| o.repo.as_deref()).unwrap_or("");
        match self {
            Self::DirectUrl => format!(
                "Chart '{}' is a direct URL; direct URL not allowed, publish the chart to an OCI registry",
                chart
            ),
            Self::NonOciRepository => format!(
                "Chart '{}' is pulled from non-OCI repository '{}'",
                chart, repo
            ),
            Self::RepositoryOptsNotAllowed => format!(
                "Chart '{}' sets repositoryOpts; repositoryOpts not allowed, reference the chart with an oci:// URL instead",
                chart
            ),
            Self::TraditionalRepoReference => format!(
                "Chart '{}' is a repository reference; it requires a traditional repo, which is not permitted",
                chart
            ),
            Self::MissingOciProtocol => format!(
                "Chart '{}' is missing OCI protocol; use an oci:// reference or a local path",
                chart
            ),
        }
    }

    pub fn remediation(&self) -> &'static str {
        match self {
            Self::DirectUrl | Self::NonOciRepository | Self::TraditionalRepoReference => {
                "Push the chart to an OCI registry and reference it as oci://<registry>/<chart>."
            }
            Self::RepositoryOptsNotAllowed => {
                "Remove repositoryOpts and put the full oci:// reference in chart."
            }
            Self::MissingOciProtocol => {
                "Prefix the chart with oci:// or point at a local chart with ./ or ../."
            }
        }
    }
}

fn is_http_url(s: &str) -> bool {
    HTTP_PREFIXES.iter().any(|p| s.starts_with(p))
}

/// Classify a chart reference; first matching step wins.
///
/// 1. chart is an HTTP(S) URL
/// 2. (v3) repository is a non-OCI HTTP(S) URL
/// 3. (v4) a repository is set in the options at all
/// 4. chart is repository-qualified (`repo/chart`)
/// 5. chart is neither OCI nor a local path
///
/// Under v3, steps 4 and 5 only apply when the options name a repository
/// that is not an OCI registry. Options carrying only credentials count as
/// no repository.
pub fn classify_chart(
    variant: ChartVariant,
    chart: &str,
    opts: Option<&RepositoryOpts>,
) -> Option<ChartFinding> {
    let source = ChartSource::classify(chart);

    if source == ChartSource::Url {
        return Some(ChartFinding::DirectUrl);
    }

    match variant {
        ChartVariant::V3 => {
            if let Some(repo) = opts.and_then(|o| o.repo.as_deref())
                && !repo.starts_with(OCI_PREFIX)
                && is_http_url(repo)
            {
                return Some(ChartFinding::NonOciRepository);
            }
            // Without an explicit repo the release defers to implicit repository config.
            match opts {
                Some(o) if o.repo.is_some() && !o.repo_is_oci() => {}
                _ => return None,
            }
        }
        ChartVariant::V4 => {
            if opts.and_then(|o| o.repo.as_deref()).is_some() {
                return Some(ChartFinding::RepositoryOptsNotAllowed);
            }
        }
    }

    match source {
        ChartSource::RepositoryQualified => Some(ChartFinding::TraditionalRepoReference),
        ChartSource::Bare => Some(ChartFinding::MissingOciProtocol),
        _ => None,
    }
}

/// Chart source check for a Helm resource.
pub struct HelmChartCheck {
    pub variant: ChartVariant,
}

impl HelmChartCheck {
    pub fn new(variant: ChartVariant) -> Self {
        Self { variant }
    }
}

impl CheckFunc for HelmChartCheck {
    fn check(&self, resource: &Resource) -> Vec<Diagnostic> {
        let Some(chart) = resource.string_field("chart") else {
            return Vec::new();
        };
        let opts = resource
            .field("repositoryOpts")
            .filter(|v| !v.is_null())
            .map(RepositoryOpts::from_value);

        match classify_chart(self.variant, chart, opts.as_ref()) {
            Some(finding) => vec![Diagnostic::with_remediation(
                finding.message(chart, opts.as_ref()),
                finding.remediation(),
            )],
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::compliance::parser::yaml::parse_yaml;

    fn opts(repo: &str) -> RepositoryOpts {
        RepositoryOpts {
            repo: Some(repo.to_string()),
        }
    }

    #[test]
    fn test_chart_source_classification() {
        assert_eq!(ChartSource::classify("oci://ghcr.io/org/chart"), ChartSource::Oci);
        assert_eq!(ChartSource::classify("https://x/y.tgz"), ChartSource::Url);
        assert_eq!(ChartSource::classify("http://x/y.tgz"), ChartSource::Url);
        assert_eq!(ChartSource::classify("./charts/nginx"), ChartSource::LocalPath);
        assert_eq!(ChartSource::classify("../nginx"), ChartSource::LocalPath);
        assert_eq!(
            ChartSource::classify("bitnami/nginx"),
            ChartSource::RepositoryQualified
        );
        assert_eq!(ChartSource::classify("nginx"), ChartSource::Bare);
    }

    #[test]
    fn test_oci_chart_passes_both_variants() {
        for variant in [ChartVariant::V3, ChartVariant::V4] {
            assert_eq!(classify_chart(variant, "oci://ghcr.io/org/chart", None), None);
        }
    }

    #[test]
    fn test_local_chart_passes_both_variants() {
        for variant in [ChartVariant::V3, ChartVariant::V4] {
            assert_eq!(classify_chart(variant, "./charts/nginx", None), None);
        }
    }

    #[test]
    fn test_direct_url_rejected_both_variants() {
        let chart = "https://charts.bitnami.com/bitnami/nginx-1.2.3.tgz";
        for variant in [ChartVariant::V3, ChartVariant::V4] {
            assert_eq!(
                classify_chart(variant, chart, None),
                Some(ChartFinding::DirectUrl)
            );
        }
        // URL wins over any repository condition.
        assert_eq!(
            classify_chart(
                ChartVariant::V4,
                chart,
                Some(&opts("https://charts.bitnami.com/bitnami"))
            ),
            Some(ChartFinding::DirectUrl)
        );
    }

    #[test]
    fn test_v3_http_repository_rejected() {
        assert_eq!(
            classify_chart(
                ChartVariant::V3,
                "nginx",
                Some(&opts("https://charts.bitnami.com/bitnami"))
            ),
            Some(ChartFinding::NonOciRepository)
        );
    }

    #[test]
    fn test_v4_repository_opts_rejected_with_distinct_finding() {
        assert_eq!(
            classify_chart(
                ChartVariant::V4,
                "postgresql",
                Some(&opts("https://charts.bitnami.com/bitnami"))
            ),
            Some(ChartFinding::RepositoryOptsNotAllowed)
        );
        // Even an OCI repository option is not allowed on v4.
        assert_eq!(
            classify_chart(ChartVariant::V4, "postgresql", Some(&opts("oci://ghcr.io/org"))),
            Some(ChartFinding::RepositoryOptsNotAllowed)
        );
    }

    #[test]
    fn test_v4_repository_qualified_name_rejected() {
        assert_eq!(
            classify_chart(ChartVariant::V4, "bitnami/nginx", None),
            Some(ChartFinding::TraditionalRepoReference)
        );
    }

    #[test]
    fn test_v4_bare_name_rejected() {
        assert_eq!(
            classify_chart(ChartVariant::V4, "nginx", None),
            Some(ChartFinding::MissingOciProtocol)
        );
    }

    #[test]
    fn test_v3_v4_divergence_on_names_without_options() {
        // v3 defers to implicit repository configuration; v4 has none.
        assert_eq!(classify_chart(ChartVariant::V3, "nginx", None), None);
        assert_eq!(classify_chart(ChartVariant::V3, "bitnami/nginx", None), None);
        assert!(classify_chart(ChartVariant::V4, "nginx", None).is_some());
        assert!(classify_chart(ChartVariant::V4, "bitnami/nginx", None).is_some());
    }

    #[test]
    fn test_v3_with_oci_repository_accepts_bare_name() {
        assert_eq!(
            classify_chart(ChartVariant::V3, "nginx", Some(&opts("oci://ghcr.io/org"))),
            None
        );
    }

    #[test]
    fn test_v3_with_non_http_repository_checks_name() {
        assert_eq!(
            classify_chart(ChartVariant::V3, "nginx", Some(&opts("bitnami"))),
            Some(ChartFinding::MissingOciProtocol)
        );
        assert_eq!(
            classify_chart(ChartVariant::V3, "bitnami/nginx", Some(&opts("bitnami"))),
            Some(ChartFinding::TraditionalRepoReference)
        );
    }

    #[test]
    fn test_options_without_repo_count_as_no_repository() {
        let credentials = RepositoryOpts::default();
        assert_eq!(
            classify_chart(ChartVariant::V4, "oci://ghcr.io/org/app", Some(&credentials)),
            None
        );
        assert_eq!(
            classify_chart(ChartVariant::V4, "./charts/app", Some(&credentials)),
            None
        );
        assert_eq!(classify_chart(ChartVariant::V3, "nginx", Some(&credentials)), None);
        assert_eq!(
            classify_chart(ChartVariant::V3, "bitnami/nginx", Some(&credentials)),
            None
        );
        // v4 still requires an OCI or local chart reference.
        assert_eq!(
            classify_chart(ChartVariant::V4, "nginx", Some(&credentials)),
            Some(ChartFinding::MissingOciProtocol)
        );
    }

    #[test]
    fn test_credential_only_repository_opts_pass() {
        let resources = parse_yaml(
            r#"
kind: HelmChartV4
name: app
chart: oci://ghcr.io/org/app
repositoryOpts:
  username: bot
  password: secret
---
kind: HelmReleaseV3
name: web
chart: nginx
repositoryOpts:
  username: bot
"#,
        )
        .unwrap();

        assert!(HelmChartCheck::new(ChartVariant::V4).check(&resources[0]).is_empty());
        assert!(HelmChartCheck::new(ChartVariant::V3).check(&resources[1]).is_empty());
    }

    #[test]
    fn test_messages_are_distinct() {
        let v3 = ChartFinding::NonOciRepository.message("nginx", Some(&opts("https://r")));
        let v4 = ChartFinding::RepositoryOptsNotAllowed.message("nginx", Some(&opts("https://r")));
        assert!(v3.contains("non-OCI repository 'https://r'"));
        assert!(v4.contains("repositoryOpts not allowed"));
        assert_ne!(v3, v4);
        assert!(ChartFinding::DirectUrl.message("u", None).contains("direct URL not allowed"));
        assert!(
            ChartFinding::TraditionalRepoReference
                .message("bitnami/nginx", None)
                .contains("requires a traditional repo")
        );
        assert!(
            ChartFinding::MissingOciProtocol
                .message("nginx", None)
                .contains("missing OCI protocol")
        );
    }

    #[test]
    fn test_check_reads_resource_fields() {
        let resources = parse_yaml(
            r#"
kind: HelmChartV4
name: db
chart: postgresql
repositoryOpts:
  repo: https://charts.bitnami.com/bitnami
---
kind: HelmReleaseV3
name: ingress
chart: oci://ghcr.io/org/ingress-nginx
---
kind: HelmReleaseV3
name: no-chart
"#,
        )
        .unwrap();

        let v4 = HelmChartCheck::new(ChartVariant::V4);
        let diags = v4.check(&resources[0]);
        assert_eq!(diags.len(), 1);
        assert!(diags[0].message.contains("repositoryOpts not allowed"));
        assert!(diags[0].remediation.is_some());

        let v3 = HelmChartCheck::new(ChartVariant::V3);
        assert!(v3.check(&resources[1]).is_empty());
        assert!(v3.check(&resources[2]).is_empty());
    }

    #[test]
    fn test_null_repository_opts_treated_as_absent() {
        let resources = parse_yaml(
            r#"
kind: HelmChartV4
name: local
chart: ./charts/app
repositoryOpts: null
"#,
        )
        .unwrap();
        let check = HelmChartCheck::new(ChartVariant::V4);
        assert!(check.check(&resources[0]).is_empty());
    }
}
