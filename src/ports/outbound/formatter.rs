use crate::dependency_analysis::domain::AnalysisResult;
use crate::shared::Result;

/// AnalysisFormatter port for rendering an analysis result
///
/// This port abstracts the output representation (JSON envelope,
/// Markdown report, graph view, etc.).
pub trait AnalysisFormatter {
    /// Renders `result` as text
    ///
    /// # Errors
    /// Returns an error if serialization fails
    fn format(&self, result: &AnalysisResult) -> Result<String>;
}
