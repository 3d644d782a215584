pub mod analysis_result;
pub mod dependency_node;
pub mod manifest;
pub mod package_info;
pub mod vulnerability;

pub use analysis_result::{AnalysisResult, AnalysisStats, DependencyTypeCount, VulnerabilityCount};
pub use dependency_node::{DependencyNode, ResolutionStatus, UNKNOWN_VERSION};
pub use manifest::{DependencyMap, DependencyType, Manifest, ProjectInfo};
pub use package_info::{Maintainer, PackageInfo, Repository};
pub use vulnerability::{Severity, Vulnerability};
