use super::registry_cache::RegistryCache;
use crate::dependency_analysis::domain::PackageInfo;
use crate::ports::outbound::PackageRegistry;
use crate::shared::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// CachingRegistryClient wraps a PackageRegistry and adds in-memory caching.
///
/// This adapter implements the decorator pattern to add caching capability
/// to any PackageRegistry implementation. The cache itself is injected, so
/// several clients (or several analyses) can share one `RegistryCache` and
/// its size and age bounds are chosen by the caller.
///
/// Only successful lookups are cached; a failed lookup is retried on the
/// next request for the same key.
///
/// # Architecture
/// In hexagonal architecture, caching is an implementation detail of the adapter layer.
/// The application layer only asks for package metadata - whether it comes
/// from cache or the registry is transparent to it.
pub struct CachingRegistryClient<R: PackageRegistry> {
    inner: R,
    cache: Arc<RegistryCache>,
}

impl<R: PackageRegistry> CachingRegistryClient<R> {
    pub fn new(inner: R, cache: Arc<RegistryCache>) -> Self {
        Self { inner, cache }
    }

    pub fn cache(&self) -> &Arc<RegistryCache> {
        &self.cache
    }
}

#[async_trait]
impl<R: PackageRegistry> PackageRegistry for CachingRegistryClient<R> {
    async fn fetch_package_info(
        &self,
        package_name: &str,
        version: Option<&str>,
    ) -> Result<PackageInfo> {
        if let Some(cached) = self.cache.get(package_name, version) {
            tracing::debug!(
                package = package_name,
                version = version.unwrap_or("latest"),
                "registry cache hit"
            );
            return Ok(cached);
        }

        let info = self.inner.fetch_package_info(package_name, version).await?;
        self.cache.insert(package_name, version, info.clone());

        Ok(info)
    }
}
