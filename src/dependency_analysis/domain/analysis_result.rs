use super::dependency_node::DependencyNode;
use super::manifest::ProjectInfo;
use super::vulnerability::{Severity, Vulnerability};
use serde::{Deserialize, Serialize};

/// Vulnerability counts per severity bucket
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VulnerabilityCount {
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl VulnerabilityCount {
    /// Adds one to the bucket for `severity`; `Unknown` is not counted.
    pub fn record(&mut self, severity: Severity) {
        match severity {
            Severity::Critical => self.critical += 1,
            Severity::High => self.high += 1,
            Severity::Medium => self.medium += 1,
            Severity::Low => self.low += 1,
            Severity::Unknown => {}
        }
    }

    /// Count in the bucket for `severity`; always 0 for `Unknown`
    pub fn get(&self, severity: Severity) -> usize {
        match severity {
            Severity::Critical => self.critical,
            Severity::High => self.high,
            Severity::Medium => self.medium,
            Severity::Low => self.low,
            Severity::Unknown => 0,
        }
    }

    pub fn total(&self) -> usize {
        self.critical + self.high + self.medium + self.low
    }

    /// Number of counted vulnerabilities at or above `threshold`
    pub fn at_or_above(&self, threshold: Severity) -> usize {
        [Severity::Critical, Severity::High, Severity::Medium, Severity::Low]
            .into_iter()
            .filter(|severity| *severity >= threshold)
            .map(|severity| self.get(severity))
            .sum()
    }
}

/// Node counts per dependency type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyTypeCount {
    pub production: usize,
    pub development: usize,
    pub peer: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisStats {
    pub total_dependencies: usize,
    pub vulnerability_count: VulnerabilityCount,
    pub dependency_types: DependencyTypeCount,
}

/// Aggregate root produced by one analysis run. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub project_id: String,
    pub project_info: ProjectInfo,
    pub dependency_tree: Vec<DependencyNode>,
    pub vulnerabilities: Vec<Vulnerability>,
    pub stats: AnalysisStats,
}
