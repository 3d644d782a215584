//! depviz - dependency tree and vulnerability analysis for npm manifests
//!
//! This library reads a package.json, resolves each declared dependency
//! against the npm registry, matches the manifest against a table of known
//! vulnerable packages and summarizes the result, following hexagonal
//! architecture and Domain-Driven Design principles.
//!
//! # Architecture
//!
//! - **Domain Layer** (`dependency_analysis`): Pure business logic and domain models
//! - **Application Layer** (`application`): Use cases, DTOs and factories
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use depviz::prelude::*;
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<()> {
//! // Create adapters
//! let registry = CachingRegistryClient::new(
//!     NpmRegistryClient::new()?,
//!     Arc::new(RegistryCache::default()),
//! );
//! let progress_reporter = StderrProgressReporter::new();
//!
//! // Create use case
//! let use_case = AnalyzeManifestUseCase::new(registry, progress_reporter);
//!
//! // Execute
//! let result = use_case
//!     .execute(sample_manifest(), AnalysisOptions::default())
//!     .await?;
//!
//! // Format output
//! let output = MarkdownFormatter::new().format(&result)?;
//! println!("{}", output);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod cli;
pub mod config;
pub mod dependency_analysis;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemReader, FileSystemWriter, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::{
        GraphFormatter, GraphView, JsonFormatter, MarkdownFormatter,
    };
    pub use crate::adapters::outbound::network::{
        CachingRegistryClient, NpmRegistryClient, RegistryCache, RegistrySettings,
    };
    pub use crate::application::dto::{
        handle_analyze_request, AnalysisOptions, AnalyzeRequest, AnalyzeResponse, OutputFormat,
    };
    pub use crate::application::sample_manifest::sample_manifest;
    pub use crate::application::use_cases::{AnalyzeManifestUseCase, BuildDependencyTreeUseCase};
    pub use crate::dependency_analysis::domain::{
        AnalysisResult, AnalysisStats, DependencyNode, DependencyType, Manifest, PackageInfo,
        ResolutionStatus, Severity, Vulnerability,
    };
    pub use crate::dependency_analysis::policies::{
        KnownVulnerability, KnownVulnerabilityTable, MatchStrategy,
    };
    pub use crate::dependency_analysis::services::{Aggregator, VulnerabilityMatcher};
    pub use crate::ports::inbound::ManifestAnalysisPort;
    pub use crate::ports::outbound::{
        AnalysisFormatter, ManifestReader, OutputPresenter, PackageRegistry, ProgressReporter,
    };
    pub use crate::shared::error::AnalysisError;
    pub use crate::shared::Result;
}
