use depviz::adapters::outbound::console::{print_summary, StderrProgressReporter};
use depviz::adapters::outbound::filesystem::{FileSystemReader, StdoutPresenter};
use depviz::adapters::outbound::network::{
    CachingRegistryClient, NpmRegistryClient, RegistryCache, RegistrySettings,
    DEFAULT_REGISTRY_URL,
};
use depviz::application::dto::{
    handle_analyze_request, AnalysisOptions, AnalyzeRequest, AnalyzeResponse,
};
use depviz::application::factories::{FormatterFactory, PresenterFactory, PresenterType};
use depviz::application::sample_manifest::sample_manifest;
use depviz::application::use_cases::{AnalyzeManifestUseCase, DEFAULT_CONCURRENCY};
use depviz::cli::{AnalyzeArgs, Args, Command};
use depviz::config::{discover_config, load_config_from_path, ConfigFile};
use depviz::dependency_analysis::domain::AnalysisResult;
use depviz::dependency_analysis::policies::KnownVulnerabilityTable;
use depviz::dependency_analysis::services::{Aggregator, VulnerabilityMatcher};
use depviz::ports::outbound::{ManifestReader, OutputPresenter};
use depviz::shared::error::ExitCode;
use depviz::shared::Result;
use std::path::Path;
use std::process;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // clap exits with code 2 on invalid arguments
    let args = Args::parse_args();
    init_tracing(args.verbose);

    let exit_code = match run(args).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("\n❌ An error occurred:\n");
            eprintln!("{}", e);

            // Display error chain
            for cause in e.chain().skip(1) {
                eprintln!("\nCaused by: {}", cause);
            }

            eprintln!();
            ExitCode::ApplicationError
        }
    };

    process::exit(exit_code.as_i32());
}

/// Logs go to stderr; RUST_LOG wins over `--verbose`
fn init_tracing(verbose: bool) {
    let default_directive = if verbose { "depviz=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(args: Args) -> Result<ExitCode> {
    match args.command {
        Command::Example => {
            StdoutPresenter::new().present(sample_manifest())?;
            Ok(ExitCode::Success)
        }
        Command::Analyze(analyze_args) => analyze(analyze_args).await,
    }
}

async fn analyze(args: AnalyzeArgs) -> Result<ExitCode> {
    let config = load_config(args.config.as_deref())?;

    // Create adapters (Dependency Injection)
    let settings = RegistrySettings {
        base_url: args
            .registry_url
            .clone()
            .or_else(|| config.registry_url.clone())
            .unwrap_or_else(|| DEFAULT_REGISTRY_URL.to_string()),
        timeout: config.request_timeout(),
        max_retries: config.max_retries(),
    };
    let cache = Arc::new(RegistryCache::new(
        Some(config.cache_capacity()),
        config.cache_ttl(),
    ));
    let registry = CachingRegistryClient::new(NpmRegistryClient::with_settings(settings)?, cache);

    let concurrency = args
        .concurrency
        .map(usize::from)
        .or(config.concurrency)
        .unwrap_or(DEFAULT_CONCURRENCY);
    let strategy = args.match_strategy.unwrap_or(config.match_strategy());

    // Create use case with injected dependencies
    let use_case = AnalyzeManifestUseCase::new(registry, StderrProgressReporter::new())
        .with_vulnerability_matcher(VulnerabilityMatcher::new(
            KnownVulnerabilityTable::with_additional(config.advisories()),
        ))
        .with_aggregator(Aggregator::new(strategy))
        .with_concurrency(concurrency);

    // Read and analyze
    let manifest_text = FileSystemReader::new().read_manifest(&args.path)?;
    let options = AnalysisOptions::new(args.no_dev.then_some(false), args.max_depth).or(
        AnalysisOptions::new(config.include_dev_dependencies, config.max_depth),
    );
    let response =
        handle_analyze_request(&use_case, AnalyzeRequest::new(manifest_text, Some(options)))
            .await?;
    let result = into_result(response)?;

    // Format and present
    eprintln!("{}", FormatterFactory::progress_message(args.format));
    let formatted_output = FormatterFactory::create(args.format).format(&result)?;
    PresenterFactory::create(PresenterType::from_output(args.output)).present(&formatted_output)?;

    print_summary(&result);

    if let Some(threshold) = args.fail_on {
        let found = result.stats.vulnerability_count.at_or_above(threshold);
        if found > 0 {
            eprintln!(
                "❌ {} vulnerabilit{} at or above '{}' severity",
                found,
                if found == 1 { "y" } else { "ies" },
                threshold
            );
            return Ok(ExitCode::VulnerabilitiesDetected);
        }
    }

    Ok(ExitCode::Success)
}

fn load_config(explicit: Option<&Path>) -> Result<ConfigFile> {
    match explicit {
        Some(path) => load_config_from_path(path),
        None => Ok(discover_config(&std::env::current_dir()?)?.unwrap_or_default()),
    }
}

fn into_result(response: AnalyzeResponse) -> Result<AnalysisResult> {
    match response.data {
        Some(result) if response.success => Ok(result),
        _ => anyhow::bail!(
            "{}",
            response
                .error
                .unwrap_or_else(|| "Failed to analyze package.json".to_string())
        ),
    }
}
