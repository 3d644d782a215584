use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::application::dto::OutputFormat;
use crate::dependency_analysis::domain::Severity;
use crate::dependency_analysis::policies::MatchStrategy;

/// Visualize npm dependency trees and flag known-vulnerable packages
#[derive(Parser, Debug)]
#[command(name = "depviz")]
#[command(version)]
#[command(
    about = "Visualize npm dependency trees and flag known-vulnerable packages",
    long_about = None
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Enable debug logging on stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Analyze a package.json file or a directory containing one
    Analyze(AnalyzeArgs),
    /// Print the bundled example package.json
    Example,
}

#[derive(clap::Args, Debug)]
pub struct AnalyzeArgs {
    /// Path to package.json or its directory (defaults to current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Output format: json, markdown or graph
    #[arg(short, long, default_value = "json")]
    pub format: OutputFormat,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Skip devDependencies when building the tree
    #[arg(long)]
    pub no_dev: bool,

    /// Depth ceiling for the dependency tree
    #[arg(long, value_name = "DEPTH")]
    pub max_depth: Option<u32>,

    /// Exit with code 1 when a vulnerability at or above this severity is found
    #[arg(long, value_name = "SEVERITY")]
    pub fail_on: Option<Severity>,

    /// How vulnerabilities are attached to nodes: exact or containment
    #[arg(long, value_name = "STRATEGY")]
    pub match_strategy: Option<MatchStrategy>,

    /// npm registry base URL
    #[arg(long, value_name = "URL")]
    pub registry_url: Option<String>,

    /// Number of concurrent registry lookups
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u16).range(1..))]
    pub concurrency: Option<u16>,

    /// Config file path (defaults to ./depviz.config.yml when present)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyze_args(argv: &[&str]) -> AnalyzeArgs {
        let args = Args::try_parse_from(argv).unwrap();
        match args.command {
            Command::Analyze(analyze) => analyze,
            Command::Example => panic!("expected analyze"),
        }
    }

    #[test]
    fn test_analyze_defaults() {
        let args = analyze_args(&["depviz", "analyze"]);
        assert_eq!(args.path, PathBuf::from("."));
        assert_eq!(args.format, OutputFormat::Json);
        assert!(args.output.is_none());
        assert!(!args.no_dev);
        assert!(args.max_depth.is_none());
        assert!(args.fail_on.is_none());
        assert!(args.config.is_none());
    }

    #[test]
    fn test_analyze_all_flags() {
        let args = analyze_args(&[
            "depviz",
            "analyze",
            "web/package.json",
            "--format",
            "md",
            "-o",
            "report.md",
            "--no-dev",
            "--max-depth",
            "1",
            "--fail-on",
            "HIGH",
            "--match-strategy",
            "containment",
            "--registry-url",
            "http://localhost:4873",
            "--concurrency",
            "2",
        ]);
        assert_eq!(args.path, PathBuf::from("web/package.json"));
        assert_eq!(args.format, OutputFormat::Markdown);
        assert_eq!(args.output, Some(PathBuf::from("report.md")));
        assert!(args.no_dev);
        assert_eq!(args.max_depth, Some(1));
        assert_eq!(args.fail_on, Some(Severity::High));
        assert_eq!(args.match_strategy, Some(MatchStrategy::Containment));
        assert_eq!(args.registry_url.as_deref(), Some("http://localhost:4873"));
        assert_eq!(args.concurrency, Some(2));
    }

    #[test]
    fn test_invalid_format_rejected() {
        assert!(Args::try_parse_from(["depviz", "analyze", "--format", "xml"]).is_err());
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        assert!(Args::try_parse_from(["depviz", "analyze", "--concurrency", "0"]).is_err());
    }

    #[test]
    fn test_verbose_is_global() {
        let args = Args::try_parse_from(["depviz", "example", "--verbose"]).unwrap();
        assert!(args.verbose);
        assert!(matches!(args.command, Command::Example));
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Args::try_parse_from(["depviz"]).is_err());
    }
}
