use crate::dependency_analysis::domain::{
    DependencyNode, DependencyType, Manifest, ResolutionStatus,
};
use crate::ports::outbound::{PackageRegistry, ProgressReporter};
use crate::shared::error::AnalysisError;
use futures::stream::{self, StreamExt};

/// Registry metadata is only fetched for nodes shallower than this depth.
/// Deeper nodes are created without a lookup to bound fan-out.
pub const METADATA_DEPTH_LIMIT: u32 = 2;

/// Default number of sibling lookups in flight at once
pub const DEFAULT_CONCURRENCY: usize = 8;

/// BuildDependencyTreeUseCase - Walks a manifest's dependency maps into nodes
///
/// Nodes are produced for the manifest's own maps only; a fetched package's
/// dependencies are not descended into, so `children` stays empty.
///
/// # Type Parameters
/// * `R` - PackageRegistry implementation
pub struct BuildDependencyTreeUseCase<R> {
    registry: R,
    concurrency: usize,
}

impl<R: PackageRegistry> BuildDependencyTreeUseCase<R> {
    pub fn new(registry: R) -> Self {
        Self {
            registry,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }

    /// Sets the number of concurrent registry lookups (at least 1)
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// Builds the node list for one manifest level
    ///
    /// Returns an empty list once `current_depth >= max_depth`. Otherwise
    /// nodes follow manifest order: production entries, then development
    /// entries (only when `include_dev_dependencies`), then peer entries.
    /// Lookups for siblings run concurrently but never reorder the result.
    ///
    /// A failed lookup never fails the build: the node is kept with an
    /// unknown version and a `Degraded` resolution.
    pub async fn build(
        &self,
        manifest: &Manifest,
        include_dev_dependencies: bool,
        max_depth: u32,
        current_depth: u32,
    ) -> Vec<DependencyNode> {
        self.build_nodes(
            manifest,
            include_dev_dependencies,
            max_depth,
            current_depth,
            None,
        )
        .await
    }

    /// Same as `build`, reporting each finished node to `progress_reporter`
    pub async fn build_with_progress(
        &self,
        manifest: &Manifest,
        include_dev_dependencies: bool,
        max_depth: u32,
        current_depth: u32,
        progress_reporter: &dyn ProgressReporter,
    ) -> Vec<DependencyNode> {
        self.build_nodes(
            manifest,
            include_dev_dependencies,
            max_depth,
            current_depth,
            Some(progress_reporter),
        )
        .await
    }

    async fn build_nodes(
        &self,
        manifest: &Manifest,
        include_dev_dependencies: bool,
        max_depth: u32,
        current_depth: u32,
        progress_reporter: Option<&dyn ProgressReporter>,
    ) -> Vec<DependencyNode> {
        if current_depth >= max_depth {
            return Vec::new();
        }

        let sources = Self::sources(include_dev_dependencies);
        let entries: Vec<(DependencyType, String, String)> = sources
            .into_iter()
            .filter_map(|dependency_type| {
                manifest
                    .dependencies_of(dependency_type)
                    .map(|map| (dependency_type, map))
            })
            .flat_map(|(dependency_type, map)| {
                map.iter().map(move |(name, range)| {
                    (dependency_type, name.to_string(), range.to_string())
                })
            })
            .collect();

        let total = entries.len();
        stream::iter(entries)
            .map(|(dependency_type, name, range)| async move {
                self.resolve_node(&name, &range, dependency_type, current_depth).await
            })
            .buffered(self.concurrency)
            .enumerate()
            .map(|(index, node)| {
                if let Some(reporter) = progress_reporter {
                    reporter.report_progress(index + 1, total, Some(&node.name));
                }
                node
            })
            .collect()
            .await
    }

    fn sources(include_dev_dependencies: bool) -> Vec<DependencyType> {
        let mut sources = vec![DependencyType::Production];
        if include_dev_dependencies {
            sources.push(DependencyType::Development);
        }
        sources.push(DependencyType::Peer);
        sources
    }

    async fn resolve_node(
        &self,
        name: &str,
        range: &str,
        dependency_type: DependencyType,
        depth: u32,
    ) -> DependencyNode {
        if depth >= METADATA_DEPTH_LIMIT {
            return DependencyNode::unresolved(
                name,
                range,
                dependency_type,
                depth,
                ResolutionStatus::Skipped,
            );
        }

        match self.registry.fetch_package_info(name, None).await {
            Ok(info) => DependencyNode::resolved(name, range, dependency_type, depth, info),
            Err(e) => {
                let failure = AnalysisError::RegistryLookupFailed {
                    package_name: name.to_string(),
                    details: format!("{:#}", e),
                };
                tracing::warn!(package = name, depth, "{}", failure);
                DependencyNode::unresolved(
                    name,
                    range,
                    dependency_type,
                    depth,
                    ResolutionStatus::Degraded,
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dependency_analysis::domain::{PackageInfo, UNKNOWN_VERSION};
    use crate::shared::Result;
    use async_trait::async_trait;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Mock registry that knows every package except the ones listed as missing
    struct MockPackageRegistry {
        missing: HashSet<String>,
        call_count: AtomicUsize,
        delay: Option<Duration>,
    }

    impl MockPackageRegistry {
        fn new() -> Self {
            Self {
                missing: HashSet::new(),
                call_count: AtomicUsize::new(0),
                delay: None,
            }
        }

        fn with_missing(names: &[&str]) -> Self {
            Self {
                missing: names.iter().map(|n| n.to_string()).collect(),
                ..Self::new()
            }
        }

        fn get_call_count(&self) -> usize {
            self.call_count.load(Ordering::SeqCst)
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
            if let Some(delay) = self.delay {
                // Earlier names sleep longer so completion order is reversed
                let weight = 10u64.saturating_sub(package_name.len() as u64);
                tokio::time::sleep(delay * weight as u32).await;
            }
            if self.missing.contains(package_name) {
                anyhow::bail!("registry returned status code 404 Not Found");
            }
            Ok(PackageInfo::new(package_name, "1.0.0").with_license("MIT"))
        }
    }

    fn manifest(text: &str) -> Manifest {
        Manifest::parse(text).unwrap()
    }

    #[tokio::test]
    async fn test_production_only_yields_one_node_per_entry() {
        let use_case = BuildDependencyTreeUseCase::new(MockPackageRegistry::new());
        let m = manifest(
            r#"{"dependencies": {"react": "^18.0.0", "axios": "^1.0.0", "zod": "^3.0.0"}}"#,
        );

        let tree = use_case.build(&m, true, 1, 0).await;

        assert_eq!(tree.len(), 3);
        for node in &tree {
            assert_eq!(node.dependency_type, DependencyType::Production);
            assert_eq!(node.depth, 0);
            assert!(node.children.is_empty());
            assert!(node.vulnerabilities.is_empty());
        }
    }

    #[tokio::test]
    async fn test_order_is_production_development_peer() {
        let use_case = BuildDependencyTreeUseCase::new(MockPackageRegistry::new());
        let m = manifest(
            r#"{
                "peerDependencies": {"react": ">=17"},
                "devDependencies": {"vite": "^5.0.0", "typescript": "^5.0.0"},
                "dependencies": {"zod": "^3.0.0", "axios": "^1.0.0"}
            }"#,
        );

        let tree = use_case.build(&m, true, 3, 0).await;
        let names: Vec<&str> = tree.iter().map(|n| n.name.as_str()).collect();

        assert_eq!(names, vec!["zod", "axios", "vite", "typescript", "react"]);
    }

    #[tokio::test]
    async fn test_concurrency_preserves_manifest_order() {
        let registry = MockPackageRegistry {
            delay: Some(Duration::from_millis(2)),
            ..MockPackageRegistry::new()
        };
        let use_case = BuildDependencyTreeUseCase::new(registry).with_concurrency(4);
        let m = manifest(
            r#"{"dependencies": {"a": "1", "bb": "1", "ccc": "1", "dddd": "1", "eeeee": "1"}}"#,
        );

        let tree = use_case.build(&m, true, 3, 0).await;
        let names: Vec<&str> = tree.iter().map(|n| n.name.as_str()).collect();

        assert_eq!(names, vec!["a", "bb", "ccc", "dddd", "eeeee"]);
    }

    #[tokio::test]
    async fn test_dev_dependencies_excluded_when_flag_unset() {
        let use_case = BuildDependencyTreeUseCase::new(MockPackageRegistry::new());
        let m = manifest(
            r#"{
                "dependencies": {"lodash": "^4.0.0"},
                "devDependencies": {"lodash": "^4.17.0", "jest": "^29.0.0"}
            }"#,
        );

        let tree = use_case.build(&m, false, 3, 0).await;

        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].name, "lodash");
        assert_eq!(tree[0].dependency_type, DependencyType::Production);
        assert_eq!(use_case.registry().get_call_count(), 1);
    }

    #[tokio::test]
    async fn test_zero_max_depth_is_empty_without_lookups() {
        let use_case = BuildDependencyTreeUseCase::new(MockPackageRegistry::new());
        let m = manifest(r#"{"dependencies": {"react": "^18.0.0"}}"#);

        assert!(use_case.build(&m, true, 0, 0).await.is_empty());
        assert_eq!(use_case.registry().get_call_count(), 0);
    }

    #[tokio::test]
    async fn test_current_depth_at_ceiling_is_empty() {
        let use_case = BuildDependencyTreeUseCase::new(MockPackageRegistry::new());
        let m = manifest(r#"{"dependencies": {"react": "^18.0.0"}}"#);

        assert!(use_case.build(&m, true, 3, 3).await.is_empty());
    }

    #[tokio::test]
    async fn test_resolved_nodes_carry_metadata() {
        let use_case = BuildDependencyTreeUseCase::new(MockPackageRegistry::new());
        let m = manifest(r#"{"dependencies": {"axios": "^1.0.0"}}"#);

        let tree = use_case.build(&m, true, 3, 1).await;

        assert_eq!(tree[0].id, "axios@1.0.0-1");
        assert_eq!(tree[0].resolved_version, "1.0.0");
        assert_eq!(tree[0].requested_range, "^1.0.0");
        assert_eq!(tree[0].license.as_deref(), Some("MIT"));
        assert_eq!(tree[0].resolution, ResolutionStatus::Resolved);
    }

    #[tokio::test]
    async fn test_depth_two_skips_registry() {
        let use_case = BuildDependencyTreeUseCase::new(MockPackageRegistry::new());
        let m = manifest(r#"{"dependencies": {"axios": "^1.0.0"}}"#);

        let tree = use_case.build(&m, true, 3, 2).await;

        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].id, "axios@unknown-2");
        assert_eq!(tree[0].resolved_version, UNKNOWN_VERSION);
        assert_eq!(tree[0].resolution, ResolutionStatus::Skipped);
        assert_eq!(use_case.registry().get_call_count(), 0);
    }

    #[tokio::test]
    async fn test_failed_lookup_degrades_single_node() {
        let use_case =
            BuildDependencyTreeUseCase::new(MockPackageRegistry::with_missing(&["left-pad"]));
        let m = manifest(
            r#"{"dependencies": {"react": "^18.0.0", "left-pad": "^1.0.0", "zod": "^3.0.0"}}"#,
        );

        let tree = use_case.build(&m, true, 3, 0).await;

        assert_eq!(tree.len(), 3);
        assert_eq!(tree[1].name, "left-pad");
        assert_eq!(tree[1].id, "left-pad@unknown-0");
        assert_eq!(tree[1].resolution, ResolutionStatus::Degraded);
        assert!(tree[1].license.is_none());
        assert_eq!(tree[0].resolution, ResolutionStatus::Resolved);
        assert_eq!(tree[2].resolution, ResolutionStatus::Resolved);
    }

    #[tokio::test]
    async fn test_manifest_without_maps_is_empty() {
        let use_case = BuildDependencyTreeUseCase::new(MockPackageRegistry::new());
        let tree = use_case.build(&manifest(r#"{"name": "bare"}"#), true, 3, 0).await;
        assert!(tree.is_empty());
    }

    struct CountingReporter {
        steps: std::sync::Mutex<Vec<(usize, usize, String)>>,
    }

    impl ProgressReporter for CountingReporter {
        fn report(&self, _message: &str) {}
        fn report_progress(&self, current: usize, total: usize, message: Option<&str>) {
            self.steps
                .lock()
                .unwrap()
                .push((current, total, message.unwrap_or_default().to_string()));
        }
        fn report_error(&self, _message: &str) {}
        fn report_completion(&self, _message: &str) {}
    }

    #[tokio::test]
    async fn test_build_with_progress_reports_each_node_in_order() {
        let use_case = BuildDependencyTreeUseCase::new(MockPackageRegistry::new());
        let reporter = CountingReporter {
            steps: std::sync::Mutex::new(Vec::new()),
        };
        let m = manifest(
            r#"{"dependencies": {"react": "1", "zod": "1"}, "peerDependencies": {"vue": "3"}}"#,
        );

        let tree = use_case.build_with_progress(&m, true, 3, 0, &reporter).await;

        assert_eq!(tree.len(), 3);
        let steps = reporter.steps.lock().unwrap().clone();
        assert_eq!(
            steps,
            vec![
                (1, 3, "react".to_string()),
                (2, 3, "zod".to_string()),
                (3, 3, "vue".to_string()),
            ]
        );
    }

    #[test]
    fn test_with_concurrency_floors_at_one() {
        let use_case =
            BuildDependencyTreeUseCase::new(MockPackageRegistry::new()).with_concurrency(0);
        assert_eq!(use_case.concurrency, 1);
    }
}
