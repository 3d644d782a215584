use crate::dependency_analysis::domain::PackageInfo;
use crate::shared::Result;
use async_trait::async_trait;

/// PackageRegistry port for looking up package metadata
///
/// This port abstracts the remote package registry (e.g., registry.npmjs.org)
/// used to resolve a dependency name to published metadata.
///
/// # Async Support
/// Lookups are async so sibling dependencies can be resolved concurrently.
/// Implementations must be `Send + Sync` to support concurrent access.
#[async_trait]
pub trait PackageRegistry: Send + Sync {
    /// Fetches metadata for `package_name` at `version`, or the latest
    /// release when `version` is `None`
    ///
    /// # Errors
    /// Returns an error if:
    /// - The package name cannot be used in a registry URL
    /// - The network request fails or times out
    /// - The registry answers with a non-success status
    /// - The response cannot be parsed
    async fn fetch_package_info(&self, package_name: &str, version: Option<&str>)
        -> Result<PackageInfo>;

    /// Soft-failing lookup: any failure is logged as a warning and
    /// reported as `None`
    async fn get_package_info(
        &self,
        package_name: &str,
        version: Option<&str>,
    ) -> Option<PackageInfo> {
        match self.fetch_package_info(package_name, version).await {
            Ok(info) => Some(info),
            Err(e) => {
                tracing::warn!(package = package_name, error = %e, "failed to fetch package info");
                None
            }
        }
    }

    /// Latest published version of `package_name`, if it can be resolved
    async fn get_latest_version(&self, package_name: &str) -> Option<String> {
        self.get_package_info(package_name, None)
            .await
            .map(|info| info.version)
    }
}
