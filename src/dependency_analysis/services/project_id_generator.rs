use chrono::Utc;
use uuid::Uuid;

/// Length of the random suffix taken from a v4 UUID
const RANDOM_SUFFIX_LEN: usize = 9;

/// ProjectIdGenerator service for per-request analysis identifiers
///
/// Ids are `proj-{unix millis}-{9 random hex chars}`: opaque, unique per
/// invocation for all practical purposes, and not meant to be stable.
pub struct ProjectIdGenerator;

impl ProjectIdGenerator {
    pub fn generate() -> String {
        let millis = Utc::now().timestamp_millis();
        let random = Uuid::new_v4().simple().to_string();
        format!("proj-{}-{}", millis, &random[..RANDOM_SUFFIX_LEN])
    }
}
