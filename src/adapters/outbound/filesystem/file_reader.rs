use crate::ports::outbound::ManifestReader;
use crate::shared::error::AnalysisError;
use crate::shared::security::{validate_readable_file, MAX_MANIFEST_SIZE};
use crate::shared::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up when a directory is given
const MANIFEST_FILE_NAME: &str = "package.json";

/// FileSystemReader adapter for reading manifests from the file system
///
/// This adapter implements the ManifestReader port. Files are checked before
/// reading: symbolic links are rejected and the size is capped.
pub struct FileSystemReader;

impl FileSystemReader {
    pub fn new() -> Self {
        Self
    }

    /// A directory resolves to its package.json; anything else is taken as-is
    fn resolve_manifest_path(path: &Path) -> PathBuf {
        if path.is_dir() {
            path.join(MANIFEST_FILE_NAME)
        } else {
            path.to_path_buf()
        }
    }
}

impl Default for FileSystemReader {
    fn default() -> Self {
        Self::new()
    }
}

impl ManifestReader for FileSystemReader {
    fn read_manifest(&self, path: &Path) -> Result<String> {
        let manifest_path = Self::resolve_manifest_path(path);

        if !manifest_path.exists() {
            return Err(AnalysisError::FileReadError {
                path: manifest_path.clone(),
                details: format!(
                    "No {} found. Pass a package.json file or a directory that contains one.",
                    MANIFEST_FILE_NAME
                ),
            }
            .into());
        }

        validate_readable_file(&manifest_path, "manifest", MAX_MANIFEST_SIZE)?;

        fs::read_to_string(&manifest_path).map_err(|e| {
            AnalysisError::FileReadError {
                path: manifest_path,
                details: e.to_string(),
            }
            .into()
        })
    }
}
