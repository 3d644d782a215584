mod known_vulnerabilities;
mod match_strategy;

pub use known_vulnerabilities::{KnownVulnerability, KnownVulnerabilityTable, AUDIT_SOURCE};
pub use match_strategy::MatchStrategy;
