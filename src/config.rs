//! Configuration file support for depviz.
//!
//! Provides YAML-based configuration through `depviz.config.yml` files,
//! including data structures, file loading, and validation.

use anyhow::Context;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use crate::dependency_analysis::domain::Severity;
use crate::dependency_analysis::policies::{KnownVulnerability, MatchStrategy};
use crate::shared::error::AnalysisError;
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "depviz.config.yml";

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
const DEFAULT_MAX_RETRIES: u32 = 3;
const DEFAULT_CACHE_CAPACITY: usize = 1000;
const DEFAULT_CACHE_TTL_SECS: u64 = 3600;

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub registry_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub max_retries: Option<u32>,
    pub concurrency: Option<usize>,
    pub include_dev_dependencies: Option<bool>,
    pub max_depth: Option<u32>,
    pub match_strategy: Option<MatchStrategy>,
    pub cache: Option<CacheConfig>,
    pub advisories: Option<Vec<KnownVulnerability>>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Registry cache bounds. A `ttl_secs` of 0 disables expiry.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    pub capacity: Option<usize>,
    pub ttl_secs: Option<u64>,
}

impl ConfigFile {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries.unwrap_or(DEFAULT_MAX_RETRIES)
    }

    pub fn cache_capacity(&self) -> usize {
        self.cache
            .and_then(|c| c.capacity)
            .unwrap_or(DEFAULT_CACHE_CAPACITY)
    }

    pub fn cache_ttl(&self) -> Option<Duration> {
        match self.cache.and_then(|c| c.ttl_secs) {
            Some(0) => None,
            Some(secs) => Some(Duration::from_secs(secs)),
            None => Some(Duration::from_secs(DEFAULT_CACHE_TTL_SECS)),
        }
    }

    pub fn match_strategy(&self) -> MatchStrategy {
        self.match_strategy.unwrap_or_default()
    }

    pub fn advisories(&self) -> Vec<KnownVulnerability> {
        self.advisories.clone().unwrap_or_default()
    }
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);
    tracing::debug!(path = %path.display(), "loaded config file");

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

fn invalid(message: String) -> AnalysisError {
    AnalysisError::Validation { message }
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> std::result::Result<(), AnalysisError> {
    if let Some(ref url) = config.registry_url {
        if url.trim().is_empty() {
            return Err(invalid(
                "registry_url must not be empty.\n\n\
                 💡 Hint: Remove the field to use https://registry.npmjs.org"
                    .to_string(),
            ));
        }
    }
    if config.concurrency == Some(0) {
        return Err(invalid(
            "concurrency must be at least 1.\n\n\
             💡 Hint: Use 1 to resolve packages one at a time."
                .to_string(),
        ));
    }
    if config.max_retries == Some(0) {
        return Err(invalid(
            "max_retries must be at least 1.\n\n\
             💡 Hint: max_retries counts the first attempt; use 1 to disable retrying."
                .to_string(),
        ));
    }
    for (i, entry) in config.advisories.iter().flatten().enumerate() {
        if entry.package.trim().is_empty() {
            return Err(invalid(format!(
                "advisories[{}].package must not be empty.\n\n\
                 💡 Hint: Each advisory must name the npm package it applies to (e.g., \"minimist\").",
                i
            )));
        }
        if entry.severity == Severity::Unknown {
            return Err(invalid(format!(
                "advisories[{}].severity for '{}' is not a recognised severity.\n\n\
                 💡 Hint: Use one of critical, high, medium or low.",
                i, entry.package
            )));
        }
    }
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}
