use serde::{Deserialize, Serialize};

/// Development dependencies are walked unless the caller opts out
pub const DEFAULT_INCLUDE_DEV_DEPENDENCIES: bool = true;

/// Number of manifest levels walked when no depth ceiling is given
pub const DEFAULT_MAX_DEPTH: u32 = 3;

/// Tree-building options supplied with an analysis request
///
/// Every field is optional on the wire; the accessor methods resolve unset
/// fields to their defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_dev_dependencies: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<u32>,
}

impl AnalysisOptions {
    pub fn new(include_dev_dependencies: Option<bool>, max_depth: Option<u32>) -> Self {
        Self {
            include_dev_dependencies,
            max_depth,
        }
    }

    pub fn include_dev_dependencies(&self) -> bool {
        self.include_dev_dependencies
            .unwrap_or(DEFAULT_INCLUDE_DEV_DEPENDENCIES)
    }

    pub fn max_depth(&self) -> u32 {
        self.max_depth.unwrap_or(DEFAULT_MAX_DEPTH)
    }

    /// Fills fields left unset here from `fallback`
    pub fn or(self, fallback: AnalysisOptions) -> Self {
        Self {
            include_dev_dependencies: self
                .include_dev_dependencies
                .or(fallback.include_dev_dependencies),
            max_depth: self.max_depth.or(fallback.max_depth),
        }
    }
}
