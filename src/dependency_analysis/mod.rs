/// Domain layer for dependency analysis
///
/// Pure business logic with no I/O: the manifest and result models,
/// the known-vulnerability policy and the matching/aggregation services.
pub mod domain;
pub mod policies;
pub mod services;
