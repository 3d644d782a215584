mod aggregator;
mod project_id_generator;
mod vulnerability_matcher;

pub use aggregator::Aggregator;
pub use project_id_generator::ProjectIdGenerator;
pub use vulnerability_matcher::{AuditMetadata, AuditReport, VulnerabilityMatcher};
