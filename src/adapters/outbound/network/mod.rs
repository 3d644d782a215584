/// Network adapters for external API calls
mod caching_registry_client;
mod npm_registry_client;
mod registry_cache;

pub use caching_registry_client::CachingRegistryClient;
pub use npm_registry_client::{NpmRegistryClient, RegistrySettings, DEFAULT_REGISTRY_URL};
pub use registry_cache::RegistryCache;
