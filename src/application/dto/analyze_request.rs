use super::AnalysisOptions;
use crate::shared::error::AnalysisError;
use serde::{Deserialize, Serialize};

/// AnalyzeRequest - Inbound request envelope for one analysis
///
/// `package_json` carries the raw manifest text, not a parsed object, so
/// syntax errors can be reported back to the caller verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub package_json: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<AnalysisOptions>,
}

impl AnalyzeRequest {
    pub fn new(package_json: impl Into<String>, options: Option<AnalysisOptions>) -> Self {
        Self {
            package_json: package_json.into(),
            options,
        }
    }

    /// Checks the request before the analysis core is invoked
    ///
    /// # Errors
    /// - `EmptyManifest` when the manifest text is missing or blank
    /// - `InvalidManifestSyntax` when the text is not valid JSON
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.package_json.trim().is_empty() {
            return Err(AnalysisError::EmptyManifest);
        }

        serde_json::from_str::<serde_json::Value>(&self.package_json).map_err(|e| {
            AnalysisError::InvalidManifestSyntax {
                details: e.to_string(),
            }
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_json() {
        let request = AnalyzeRequest::new(r#"{"name": "demo"}"#, None);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_blank() {
        let request = AnalyzeRequest::new("   \n", None);
        assert!(matches!(request.validate(), Err(AnalysisError::EmptyManifest)));
    }

    #[test]
    fn test_validate_rejects_truncated_json() {
        let request = AnalyzeRequest::new(r#"{"name": "demo", "dependencies": {"#, None);
        let err = request.validate().unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidManifestSyntax { .. }));
        assert!(err.is_client_error());
    }

    #[test]
    fn test_deserialize_wire_format() {
        let request: AnalyzeRequest = serde_json::from_str(
            r#"{"packageJson": "{}", "options": {"includeDevDependencies": false}}"#,
        )
        .unwrap();
        assert_eq!(request.package_json, "{}");
        assert_eq!(
            request.options,
            Some(AnalysisOptions::new(Some(false), None))
        );
    }

    #[test]
    fn test_deserialize_missing_manifest_is_empty() {
        let request: AnalyzeRequest = serde_json::from_str("{}").unwrap();
        assert!(matches!(request.validate(), Err(AnalysisError::EmptyManifest)));
    }
}
