use async_trait::async_trait;
use depviz::prelude::*;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Mock PackageRegistry for testing
///
/// Packages registered with `with_package` resolve to that metadata; any
/// other name resolves to version 1.0.0 unless the registry is failing or
/// the name was marked missing.
pub struct MockPackageRegistry {
    pub packages: HashMap<String, PackageInfo>,
    pub missing: Vec<String>,
    pub should_fail: bool,
    call_count: AtomicUsize,
}

impl MockPackageRegistry {
    pub fn new() -> Self {
        Self {
            packages: HashMap::new(),
            missing: Vec::new(),
            should_fail: false,
            call_count: AtomicUsize::new(0),
        }
    }

    pub fn with_package(
        mut self,
        name: &str,
        version: &str,
        license: &str,
        description: &str,
    ) -> Self {
        self.packages.insert(
            name.to_string(),
            PackageInfo::new(name, version)
                .with_license(license)
                .with_description(description),
        );
        self
    }

    pub fn with_missing(mut self, name: &str) -> Self {
        self.missing.push(name.to_string());
        self
    }

    pub fn with_failure() -> Self {
        Self {
            should_fail: true,
            ..Self::new()
        }
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

impl Default for MockPackageRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PackageRegistry for MockPackageRegistry {
    async fn fetch_package_info(
        &self,
        package_name: &str,
        _version: Option<&str>,
    ) -> Result<PackageInfo> {
        self.call_count.fetch_add(1, Ordering::SeqCst);

        if self.should_fail {
            anyhow::bail!("Mock package registry failure");
        }
        if self.missing.iter().any(|name| name == package_name) {
            anyhow::bail!("registry returned status 404 Not Found for {}", package_name);
        }

        Ok(self
            .packages
            .get(package_name)
            .cloned()
            .unwrap_or_else(|| PackageInfo::new(package_name, "1.0.0")))
    }
}
