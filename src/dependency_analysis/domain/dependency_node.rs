use super::manifest::DependencyType;
use super::package_info::PackageInfo;
use super::vulnerability::{Severity, Vulnerability};
use serde::{Deserialize, Serialize};

/// Version placeholder for packages without registry metadata
pub const UNKNOWN_VERSION: &str = "unknown";

/// How a node's metadata was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionStatus {
    /// Registry metadata was fetched
    Resolved,
    /// The depth is past the metadata fan-out bound, no lookup was made
    Skipped,
    /// The lookup failed; the node carries no metadata
    Degraded,
}

/// One dependency encountered while walking a manifest.
///
/// `children` is always empty until transitive resolution exists; consumers
/// must not assume any linkage below depth 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyNode {
    pub id: String,
    pub name: String,
    pub resolved_version: String,
    pub requested_range: String,
    #[serde(rename = "type")]
    pub dependency_type: DependencyType,
    pub depth: u32,
    pub resolution: ResolutionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    pub vulnerabilities: Vec<Vulnerability>,
    pub children: Vec<DependencyNode>,
}

impl DependencyNode {
    /// Node backed by registry metadata
    pub fn resolved(
        name: &str,
        requested_range: &str,
        dependency_type: DependencyType,
        depth: u32,
        info: PackageInfo,
    ) -> Self {
        Self {
            id: Self::node_id(name, &info.version, depth),
            name: name.to_string(),
            resolved_version: info.version,
            requested_range: requested_range.to_string(),
            dependency_type,
            depth,
            resolution: ResolutionStatus::Resolved,
            description: info.description,
            homepage: info.homepage,
            license: info.license,
            vulnerabilities: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Node without metadata; `resolution` must be `Skipped` or `Degraded`
    pub fn unresolved(
        name: &str,
        requested_range: &str,
        dependency_type: DependencyType,
        depth: u32,
        resolution: ResolutionStatus,
    ) -> Self {
        debug_assert!(resolution != ResolutionStatus::Resolved);
        Self {
            id: Self::node_id(name, UNKNOWN_VERSION, depth),
            name: name.to_string(),
            resolved_version: UNKNOWN_VERSION.to_string(),
            requested_range: requested_range.to_string(),
            dependency_type,
            depth,
            resolution,
            description: None,
            homepage: None,
            license: None,
            vulnerabilities: Vec::new(),
            children: Vec::new(),
        }
    }

    /// `{name}@{version}-{depth}`. Not stable across runs: the version part
    /// changes whenever the registry publishes a new release.
    pub fn node_id(name: &str, version: &str, depth: u32) -> String {
        format!("{}@{}-{}", name, version, depth)
    }

    /// Identity derived only from what the manifest declared
    pub fn stable_key(&self) -> String {
        format!(
            "{}|{}|{}",
            self.name, self.requested_range, self.dependency_type
        )
    }

    /// Worst recognised severity among attached vulnerabilities
    pub fn highest_severity(&self) -> Option<Severity> {
        self.vulnerabilities
            .iter()
            .map(|v| v.severity)
            .filter(|s| *s != Severity::Unknown)
            .max()
    }

    pub fn is_vulnerable(&self) -> bool {
        !self.vulnerabilities.is_empty()
    }
}
