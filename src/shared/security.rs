use crate::shared::error::AnalysisError;
use std::fs;
use std::path::Path;

/// Upper bound for a manifest on disk (10 MB).
/// A package.json anywhere near this size is not a real project descriptor.
pub const MAX_MANIFEST_SIZE: u64 = 10 * 1024 * 1024;

/// Checks that `path` is a regular file that is not a symbolic link
/// and is no larger than `max_size` bytes.
///
/// `symlink_metadata()` is used so the link itself is inspected rather than
/// its target.
///
/// # Errors
/// - `SecurityError` if the path is a symlink or exceeds the size limit
/// - `FileReadError` if the metadata cannot be read or the path is not a
///   regular file
pub fn validate_readable_file(
    path: &Path,
    file_description: &str,
    max_size: u64,
) -> Result<u64, AnalysisError> {
    let metadata = fs::symlink_metadata(path).map_err(|e| AnalysisError::FileReadError {
        path: path.to_path_buf(),
        details: format!("Failed to read {} metadata: {}", file_description, e),
    })?;

    if metadata.is_symlink() {
        return Err(AnalysisError::SecurityError {
            path: path.to_path_buf(),
            reason: format!("{} is a symbolic link", file_description),
            hint: "Pass the real file instead of a symbolic link".to_string(),
        });
    }

    if !metadata.is_file() {
        return Err(AnalysisError::FileReadError {
            path: path.to_path_buf(),
            details: format!("{} is not a regular file", path.display()),
        });
    }

    let size = metadata.len();
    if size > max_size {
        return Err(AnalysisError::SecurityError {
            path: path.to_path_buf(),
            reason: format!(
                "{} is too large ({} bytes, maximum {} bytes)",
                file_description, size, max_size
            ),
            hint: "Check that the path points at a package.json file".to_string(),
        });
    }

    Ok(size)
}

/// Rejects an output target that already exists as a symbolic link.
pub fn validate_writable_target(path: &Path) -> Result<(), AnalysisError> {
    if let Ok(metadata) = fs::symlink_metadata(path) {
        if metadata.is_symlink() {
            return Err(AnalysisError::SecurityError {
                path: path.to_path_buf(),
                reason: "output target is a symbolic link".to_string(),
                hint: "Choose an output path that is not a symbolic link".to_string(),
            });
        }
    }
    Ok(())
}
