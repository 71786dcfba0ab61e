use crate::analyzer::compliance::OutputFormat;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "policy-ctl")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Check infrastructure resources against a compiled-in policy pack")]
#[command(long_about = "Evaluates Kubernetes manifests, Helm releases and charts, and compute instances against a built-in set of compliance rules. Mandatory violations fail the run; advisory violations are reported only.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file (defaults to .infra-policy.yaml when present)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Evaluate resources from files or directories
    Check {
        /// Files or directories to check ("-" reads stdin)
        #[arg(value_name = "PATH", required = true)]
        paths: Vec<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "plain")]
        format: ReportFormat,

        /// Write the report to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Skip a rule by name (repeatable)
        #[arg(long, value_name = "RULE")]
        exclude: Vec<String>,

        /// Exit with 0 even when mandatory rules are violated
        #[arg(long)]
        no_fail: bool,

        /// Evaluation worker threads (0 = one per CPU)
        #[arg(long, value_name = "N")]
        threads: Option<usize>,
    },

    /// List the built-in rules
    Rules {
        /// Output format
        #[arg(long, value_enum, default_value = "plain")]
        format: ListFormat,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Plain,
    Json,
    Github,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    Plain,
    Json,
}

impl From<ReportFormat> for OutputFormat {
    fn from(format: ReportFormat) -> Self {
        match format {
            ReportFormat::Plain => OutputFormat::Plain,
            ReportFormat::Json => OutputFormat::Json,
            ReportFormat::Github => OutputFormat::GitHub,
        }
    }
}

impl From<ListFormat> for OutputFormat {
    fn from(format: ListFormat) -> Self {
        match format {
            ListFormat::Plain => OutputFormat::Plain,
            ListFormat::Json => OutputFormat::Json,
        }
    }
}

impl Cli {
    /// Initialize logging based on verbosity level
    pub fn init_logging(&self) {
        if self.quiet {
            return;
        }

        let level = match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        };

        env_logger::Builder::from_default_env()
            .filter_level(level)
            .init();
    }
}
