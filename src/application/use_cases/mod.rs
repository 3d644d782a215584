/// Use cases module containing application business logic orchestration
mod analyze_manifest;
mod build_dependency_tree;

pub use analyze_manifest::AnalyzeManifestUseCase;
pub use build_dependency_tree::{
    BuildDependencyTreeUseCase, DEFAULT_CONCURRENCY, METADATA_DEPTH_LIMIT,
};
