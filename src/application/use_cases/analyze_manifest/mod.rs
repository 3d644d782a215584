use crate::application::dto::AnalysisOptions;
use crate::application::use_cases::BuildDependencyTreeUseCase;
use crate::dependency_analysis::domain::{
    AnalysisResult, DependencyNode, Manifest, ResolutionStatus,
};
use crate::dependency_analysis::services::{
    Aggregator, AuditReport, ProjectIdGenerator, VulnerabilityMatcher,
};
use crate::ports::inbound::ManifestAnalysisPort;
use crate::ports::outbound::{PackageRegistry, ProgressReporter};
use crate::shared::error::AnalysisError;
use async_trait::async_trait;
use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;

/// AnalyzeManifestUseCase - Core use case for manifest analysis
///
/// This use case orchestrates the analysis workflow: parse the manifest,
/// build the dependency tree, audit the raw manifest, attach vulnerabilities
/// to nodes and compute summary statistics.
///
/// # Type Parameters
/// * `R` - PackageRegistry implementation
/// * `PR` - ProgressReporter implementation
pub struct AnalyzeManifestUseCase<R, PR> {
    tree_builder: BuildDependencyTreeUseCase<R>,
    vulnerability_matcher: VulnerabilityMatcher,
    aggregator: Aggregator,
    progress_reporter: PR,
}

impl<R, PR> AnalyzeManifestUseCase<R, PR>
where
    R: PackageRegistry,
    PR: ProgressReporter,
{
    /// Creates a use case with the built-in vulnerability table and exact matching
    pub fn new(registry: R, progress_reporter: PR) -> Self {
        Self {
            tree_builder: BuildDependencyTreeUseCase::new(registry),
            vulnerability_matcher: VulnerabilityMatcher::default(),
            aggregator: Aggregator::default(),
            progress_reporter,
        }
    }

    pub fn with_vulnerability_matcher(mut self, matcher: VulnerabilityMatcher) -> Self {
        self.vulnerability_matcher = matcher;
        self
    }

    pub fn with_aggregator(mut self, aggregator: Aggregator) -> Self {
        self.aggregator = aggregator;
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.tree_builder = self.tree_builder.with_concurrency(concurrency);
        self
    }

    pub fn registry(&self) -> &R {
        self.tree_builder.registry()
    }

    /// Executes the analysis use case
    ///
    /// # Arguments
    /// * `manifest_text` - Raw package.json contents
    /// * `options` - Tree-building options; unset fields take defaults
    ///
    /// # Errors
    /// - `InvalidManifestSyntax` when the text cannot be parsed as a manifest
    /// - `AnalysisFailed` when a collaborator faults mid-analysis; the cause
    ///   is logged, not returned
    pub async fn execute(
        &self,
        manifest_text: &str,
        options: AnalysisOptions,
    ) -> std::result::Result<AnalysisResult, AnalysisError> {
        // Step 1: Parse the manifest; syntax errors reach the caller as-is
        self.progress_reporter.report("📖 Parsing package.json...");
        let manifest = Manifest::parse(manifest_text)?;

        // Steps 2-5 run as one unit; a fault in any adapter stops here
        AssertUnwindSafe(self.run_pipeline(&manifest, options))
            .catch_unwind()
            .await
            .map_err(|cause| {
                tracing::error!(error = %panic_message(&*cause), "analysis failed");
                self.progress_reporter
                    .report_error("⚠️  Analysis aborted by an internal fault");
                AnalysisError::AnalysisFailed
            })
    }

    async fn run_pipeline(&self, manifest: &Manifest, options: AnalysisOptions) -> AnalysisResult {
        let project_info = manifest.project_info();
        tracing::info!(project = %project_info.name, ?options, "starting analysis");

        // Step 2: Build the dependency tree
        let mut dependency_tree = self.build_tree(manifest, options).await;

        // Step 3: Audit the raw manifest, independent of the tree options
        let audit = self.run_audit(manifest);

        // Step 4: Join tree and audit results
        self.aggregator
            .attach_vulnerabilities(&mut dependency_tree, &audit.vulnerabilities);
        let stats = Aggregator::compute_stats(&dependency_tree, &audit.vulnerabilities);

        // Step 5: Compose the result
        let result = AnalysisResult {
            project_id: ProjectIdGenerator::generate(),
            project_info,
            dependency_tree,
            vulnerabilities: audit.vulnerabilities,
            stats,
        };

        self.progress_reporter.report_completion(&format!(
            "✅ Analyzed {} dependencies, {} known vulnerabilities",
            result.stats.total_dependencies,
            result.stats.vulnerability_count.total()
        ));
        tracing::info!(project_id = %result.project_id, "analysis complete");

        result
    }

    async fn build_tree(
        &self,
        manifest: &Manifest,
        options: AnalysisOptions,
    ) -> Vec<DependencyNode> {
        let include_dev = options.include_dev_dependencies();
        let max_depth = options.max_depth();

        self.progress_reporter.report(&format!(
            "🌳 Building dependency tree (max depth {}{})...",
            max_depth,
            if include_dev { "" } else { ", production and peer only" }
        ));

        let tree = self
            .tree_builder
            .build_with_progress(manifest, include_dev, max_depth, 0, &self.progress_reporter)
            .await;

        let flat = Aggregator::flatten(&tree);
        let degraded = flat
            .iter()
            .filter(|node| node.resolution == ResolutionStatus::Degraded)
            .count();
        if degraded > 0 {
            self.progress_reporter.report_error(&format!(
                "⚠️  Warning: registry lookup failed for {} of {} package(s); their versions are unknown",
                degraded,
                flat.len()
            ));
        }

        tree
    }

    fn run_audit(&self, manifest: &Manifest) -> AuditReport {
        let audit = self.vulnerability_matcher.run_audit(manifest);
        self.progress_reporter.report(&format!(
            "🔍 Checked {} dependencies against known vulnerabilities, {} found",
            audit.metadata.total_dependencies, audit.metadata.vulnerabilities
        ));
        audit
    }
}

fn panic_message(cause: &(dyn Any + Send)) -> &str {
    if let Some(message) = cause.downcast_ref::<&str>() {
        *message
    } else if let Some(message) = cause.downcast_ref::<String>() {
        message.as_str()
    } else {
        "unknown fault"
    }
}

#[async_trait]
impl<R, PR> ManifestAnalysisPort for AnalyzeManifestUseCase<R, PR>
where
    R: PackageRegistry,
    PR: ProgressReporter,
{
    async fn analyze(
        &self,
        manifest_text: &str,
        options: AnalysisOptions,
    ) -> std::result::Result<AnalysisResult, AnalysisError> {
        self.execute(manifest_text, options).await
    }
}
