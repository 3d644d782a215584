use crate::dependency_analysis::domain::{Manifest, Vulnerability};
use crate::dependency_analysis::policies::{KnownVulnerabilityTable, AUDIT_SOURCE};
use serde::Serialize;

/// Summary figures of one audit run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditMetadata {
    /// Size of the merged dependency map
    pub total_dependencies: usize,
    pub vulnerabilities: usize,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuditReport {
    pub vulnerabilities: Vec<Vulnerability>,
    pub metadata: AuditMetadata,
}

/// VulnerabilityMatcher checks a manifest against the known-vulnerability table.
///
/// It operates on the raw manifest, not on the built tree, so every declared
/// dependency is audited regardless of tree-building options.
pub struct VulnerabilityMatcher {
    table: KnownVulnerabilityTable,
}

impl VulnerabilityMatcher {
    pub fn new(table: KnownVulnerabilityTable) -> Self {
        Self { table }
    }

    /// Produces one vulnerability per merged dependency whose name is in the table.
    ///
    /// The three dependency maps are merged production, development, peer; a
    /// name declared twice is audited once. Output follows merged-map order.
    pub fn run_audit(&self, manifest: &Manifest) -> AuditReport {
        let merged = manifest.merged_dependencies();

        let vulnerabilities: Vec<Vulnerability> = merged
            .iter()
            .filter_map(|(name, _range)| {
                self.table.find(name).map(|known| Vulnerability {
                    id: format!("vuln-{}", name),
                    package_name: name.to_string(),
                    title: known.title.clone(),
                    severity: known.severity,
                    vulnerable_versions: known.vulnerable_versions.join(", "),
                    description: known.description.clone().unwrap_or_else(|| {
                        format!("{} has a known vulnerability: {}", name, known.title)
                    }),
                    source: AUDIT_SOURCE.to_string(),
                    cve_id: None,
                    cvss_score: None,
                    patched_versions: None,
                    url: None,
                })
            })
            .collect();

        AuditReport {
            metadata: AuditMetadata {
                total_dependencies: merged.len(),
                vulnerabilities: vulnerabilities.len(),
            },
            vulnerabilities,
        }
    }
}

impl Default for VulnerabilityMatcher {
    fn default() -> Self {
        Self::new(KnownVulnerabilityTable::builtin())
    }
}
