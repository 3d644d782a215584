use crate::application::dto::AnalysisOptions;
use crate::dependency_analysis::domain::AnalysisResult;
use crate::shared::error::AnalysisError;
use async_trait::async_trait;

/// ManifestAnalysisPort - Inbound port for the manifest analysis use case
///
/// This port defines the interface that external adapters (CLI, HTTP handler,
/// etc.) use to trigger an analysis. It represents the application's public API.
#[async_trait]
pub trait ManifestAnalysisPort: Send + Sync {
    /// Analyzes raw manifest text
    ///
    /// # Arguments
    /// * `manifest_text` - The package.json contents
    /// * `options` - Tree-building options; unset fields take defaults
    ///
    /// # Errors
    /// - `InvalidManifestSyntax` if the text cannot be parsed
    /// - `AnalysisFailed` for any other internal fault (details are logged)
    async fn analyze(
        &self,
        manifest_text: &str,
        options: AnalysisOptions,
    ) -> Result<AnalysisResult, AnalysisError>;
}
