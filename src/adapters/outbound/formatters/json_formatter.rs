use crate::dependency_analysis::domain::AnalysisResult;
use crate::ports::outbound::AnalysisFormatter;
use crate::shared::Result;
use serde::Serialize;

/// Success envelope borrowing the result, same shape as `AnalyzeResponse`
#[derive(Serialize)]
struct Envelope<'a> {
    success: bool,
    data: &'a AnalysisResult,
}

/// JsonFormatter adapter producing the `{ success, data }` response envelope
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisFormatter for JsonFormatter {
    fn format(&self, result: &AnalysisResult) -> Result<String> {
        let envelope = Envelope {
            success: true,
            data: result,
        };
        Ok(serde_json::to_string_pretty(&envelope)?)
    }
}
