use crate::dependency_analysis::domain::Vulnerability;
use serde::Deserialize;

/// Rule deciding which vulnerabilities belong to a dependency node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStrategy {
    /// `package_name` equals the node name
    #[default]
    Exact,
    /// The vulnerability id contains `vuln-{name}` or the bare name.
    /// Loose: `moment` also picks up anything whose id mentions `moment`,
    /// and a node named `a` matches almost everything.
    Containment,
}

impl MatchStrategy {
    pub fn matches(&self, package_name: &str, vulnerability: &Vulnerability) -> bool {
        match self {
            MatchStrategy::Exact => vulnerability.package_name == package_name,
            MatchStrategy::Containment => {
                vulnerability.id.contains(&format!("vuln-{}", package_name))
                    || vulnerability.id.contains(package_name)
            }
        }
    }
}

impl std::str::FromStr for MatchStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "exact" => Ok(MatchStrategy::Exact),
            "containment" => Ok(MatchStrategy::Containment),
            _ => Err(format!(
                "Invalid match strategy: {}. Please specify 'exact' or 'containment'",
                s
            )),
        }
    }
}
