use crate::dependency_analysis::domain::PackageInfo;
use dashmap::DashMap;
use std::fmt;
use std::time::{Duration, Instant};

/// Version segment used in keys for "latest" lookups
const LATEST: &str = "latest";

/// Cache key for registry lookups: `name@version`, or `name@latest`
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
struct CacheKey {
    package_name: String,
    version: String,
}

impl CacheKey {
    fn new(package_name: &str, version: Option<&str>) -> Self {
        Self {
            package_name: package_name.to_string(),
            version: version.unwrap_or(LATEST).to_string(),
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.package_name, self.version)
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    info: PackageInfo,
    inserted_at: Instant,
}

/// RegistryCache holds registry metadata shared across lookups.
///
/// The cache is an explicit object: it is created by the caller, shared via
/// `Arc`, and handed to `CachingRegistryClient`. It is thread-safe and can
/// be bounded in size (oldest entry evicted first) and in age (expired
/// entries are dropped on read). Concurrent inserts of the same key are
/// tolerated; the values are equivalent.
#[derive(Debug)]
pub struct RegistryCache {
    entries: DashMap<CacheKey, CacheEntry>,
    capacity: Option<usize>,
    ttl: Option<Duration>,
}

impl RegistryCache {
    /// Creates a cache with an optional entry limit and time-to-live
    pub fn new(capacity: Option<usize>, ttl: Option<Duration>) -> Self {
        Self {
            entries: DashMap::new(),
            capacity,
            ttl,
        }
    }

    /// A cache without size or age limits. Suitable for short-lived runs only.
    pub fn unbounded() -> Self {
        Self::new(None, None)
    }

    /// Returns the cached metadata for `package_name` at `version`, if fresh
    pub fn get(&self, package_name: &str, version: Option<&str>) -> Option<PackageInfo> {
        let key = CacheKey::new(package_name, version);

        match self.entries.get(&key) {
            None => return None,
            Some(entry) if !self.is_expired(&entry) => return Some(entry.info.clone()),
            Some(_) => {}
        }

        // The read guard is released above; removing while holding it would deadlock.
        self.entries.remove_if(&key, |_, entry| self.is_expired(entry));
        tracing::debug!(key = %key, "registry cache entry expired");
        None
    }

    pub fn insert(&self, package_name: &str, version: Option<&str>, info: PackageInfo) {
        let key = CacheKey::new(package_name, version);

        if let Some(capacity) = self.capacity {
            if capacity == 0 {
                return;
            }
            if !self.entries.contains_key(&key) && self.entries.len() >= capacity {
                self.evict_oldest();
            }
        }

        self.entries.insert(
            key,
            CacheEntry {
                info,
                inserted_at: Instant::now(),
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    fn is_expired(&self, entry: &CacheEntry) -> bool {
        self.ttl
            .is_some_and(|ttl| entry.inserted_at.elapsed() >= ttl)
    }

    fn evict_oldest(&self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|entry| entry.inserted_at)
            .map(|entry| entry.key().clone());

        if let Some(key) = oldest {
            tracing::debug!(key = %key, "evicting oldest registry cache entry");
            self.entries.remove(&key);
        }
    }
}

impl Default for RegistryCache {
    fn default() -> Self {
        Self::unbounded()
    }
}
