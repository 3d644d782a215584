use crate::shared::Result;
use std::path::Path;

/// ManifestReader port for loading manifest text
///
/// This port abstracts the file system operations needed to read
/// a package.json before it is handed to the analysis pipeline.
pub trait ManifestReader {
    /// Reads the raw manifest at `path`
    ///
    /// `path` may point at a package.json file or at a directory that
    /// contains one.
    ///
    /// # Errors
    /// Returns an error if:
    /// - No manifest exists at the location
    /// - The file cannot be read due to permissions or I/O errors
    /// - The file fails the symlink or size checks
    fn read_manifest(&self, path: &Path) -> Result<String>;
}
