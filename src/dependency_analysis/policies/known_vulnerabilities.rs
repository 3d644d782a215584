use crate::dependency_analysis::domain::Severity;
use serde::Deserialize;

/// Source label carried by every vulnerability produced from the table
pub const AUDIT_SOURCE: &str = "npm_audit";

/// One entry of the known-vulnerable-package table.
///
/// `vulnerable_versions` is informational: matching is by package name only,
/// the range is never evaluated against the manifest's requested range.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct KnownVulnerability {
    pub package: String,
    pub title: String,
    pub severity: Severity,
    pub vulnerable_versions: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl KnownVulnerability {
    fn builtin(package: &str, vulnerable_versions: &str, severity: Severity, title: &str) -> Self {
        Self {
            package: package.to_string(),
            title: title.to_string(),
            severity,
            vulnerable_versions: vec![vulnerable_versions.to_string()],
            description: None,
        }
    }
}

/// Static lookup table of package names with known vulnerabilities.
///
/// This is not an advisory database: the built-in set is small and fixed,
/// and extra entries can only come from the configuration file.
#[derive(Debug, Clone)]
pub struct KnownVulnerabilityTable {
    entries: Vec<KnownVulnerability>,
}

impl KnownVulnerabilityTable {
    pub fn new(entries: Vec<KnownVulnerability>) -> Self {
        Self { entries }
    }

    /// The built-in table
    pub fn builtin() -> Self {
        Self::new(vec![
            KnownVulnerability::builtin(
                "lodash",
                "<4.17.12",
                Severity::High,
                "Prototype Pollution",
            ),
            KnownVulnerability::builtin("axios", "<0.21.1", Severity::Medium, "SSRF vulnerability"),
            KnownVulnerability::builtin(
                "node-forge",
                "<1.0.0",
                Severity::Critical,
                "RSA PKCS#1 signature verification",
            ),
            KnownVulnerability::builtin(
                "moment",
                "<2.30.0",
                Severity::Medium,
                "Path traversal vulnerability",
            ),
        ])
    }

    /// Built-in table followed by `extra` entries
    pub fn with_additional(extra: Vec<KnownVulnerability>) -> Self {
        let mut table = Self::builtin();
        table.entries.extend(extra);
        table
    }

    /// First entry registered for exactly `package_name`
    pub fn find(&self, package_name: &str) -> Option<&KnownVulnerability> {
        self.entries.iter().find(|entry| entry.package == package_name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for KnownVulnerabilityTable {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table_entries() {
        let table = KnownVulnerabilityTable::builtin();
        assert_eq!(table.len(), 4);

        let lodash = table.find("lodash").unwrap();
        assert_eq!(lodash.severity, Severity::High);
        assert_eq!(lodash.title, "Prototype Pollution");
        assert_eq!(lodash.vulnerable_versions, vec!["<4.17.12".to_string()]);

        assert_eq!(table.find("node-forge").unwrap().severity, Severity::Critical);
        assert_eq!(table.find("axios").unwrap().severity, Severity::Medium);
        assert_eq!(table.find("moment").unwrap().severity, Severity::Medium);
    }

    #[test]
    fn test_find_is_exact_name_match() {
        let table = KnownVulnerabilityTable::builtin();
        assert!(table.find("moment-timezone").is_none());
        assert!(table.find("Lodash").is_none());
        assert!(table.find("react").is_none());
    }

    #[test]
    fn test_with_additional_appends_after_builtin() {
        let extra = KnownVulnerability {
            package: "left-pad".to_string(),
            title: "Unpublished package".to_string(),
            severity: Severity::Low,
            vulnerable_versions: vec!["*".to_string()],
            description: Some("Removed from the registry".to_string()),
        };
        let table = KnownVulnerabilityTable::with_additional(vec![extra]);
        assert_eq!(table.len(), 5);
        assert_eq!(table.find("left-pad").unwrap().severity, Severity::Low);
    }

    #[test]
    fn test_builtin_entry_wins_over_additional_duplicate() {
        let extra = KnownVulnerability {
            package: "lodash".to_string(),
            title: "Duplicate".to_string(),
            severity: Severity::Low,
            vulnerable_versions: vec![],
            description: None,
        };
        let table = KnownVulnerabilityTable::with_additional(vec![extra]);
        assert_eq!(table.find("lodash").unwrap().title, "Prototype Pollution");
    }
}
