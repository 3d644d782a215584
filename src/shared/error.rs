use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow CI systems to distinguish between different
/// types of failures and successes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - no vulnerabilities detected, or all below threshold
    Success = 0,
    /// Vulnerabilities were detected at or above the `--fail-on` severity
    VulnerabilitiesDetected = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (invalid manifest, I/O error, analysis failure, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::VulnerabilitiesDetected => write!(f, "Vulnerabilities Detected (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Errors surfaced by the manifest analysis pipeline and its adapters.
///
/// Only `EmptyManifest`, `InvalidManifestSyntax` and `AnalysisFailed` ever
/// leave the orchestrator. `RegistryLookupFailed` describes a single package
/// whose metadata could not be fetched; the tree builder recovers from it
/// locally and the node degrades to an unknown version.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("package.json content is required\n\n💡 Hint: Provide the contents of a package.json file")]
    EmptyManifest,

    #[error("Invalid manifest: {details}\n\n💡 Hint: Please verify that package.json contains valid JSON")]
    InvalidManifestSyntax { details: String },

    #[error("Failed to fetch package info for {package_name}: {details}")]
    RegistryLookupFailed {
        package_name: String,
        details: String,
    },

    #[error("Failed to analyze package.json")]
    AnalysisFailed,

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    /// Validation error for configuration and options
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Security violation: {path}\nReason: {reason}\n\n💡 Hint: {hint}")]
    SecurityError {
        path: PathBuf,
        reason: String,
        hint: String,
    },
}

impl AnalysisError {
    /// Whether the error is the caller's fault (HTTP 400 equivalent).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AnalysisError::EmptyManifest | AnalysisError::InvalidManifestSyntax { .. }
        )
    }
}
