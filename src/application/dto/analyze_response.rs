use super::AnalyzeRequest;
use crate::dependency_analysis::domain::AnalysisResult;
use crate::ports::inbound::ManifestAnalysisPort;
use crate::shared::error::AnalysisError;
use serde::{Deserialize, Serialize};

/// AnalyzeResponse - Outbound result envelope
///
/// Exactly one of `data` and `error` is set. A failed analysis never
/// carries partial data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<AnalysisResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AnalyzeResponse {
    pub fn success(data: AnalysisResult) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }
}

/// Validates `request` and runs the analysis through `port`
///
/// # Returns
/// - `Err` when the request is rejected before the core runs (empty or
///   syntactically invalid manifest text); the caller answers with a
///   client error
/// - `Ok` with a failure envelope when the core reports an error
/// - `Ok` with a success envelope otherwise
pub async fn handle_analyze_request<P>(
    port: &P,
    request: AnalyzeRequest,
) -> Result<AnalyzeResponse, AnalysisError>
where
    P: ManifestAnalysisPort + ?Sized,
{
    request.validate()?;

    let options = request.options.unwrap_or_default();
    match port.analyze(&request.package_json, options).await {
        Ok(result) => Ok(AnalyzeResponse::success(result)),
        Err(e) => Ok(AnalyzeResponse::failure(e.to_string())),
    }
}
