use crate::dependency_analysis::domain::{
    AnalysisStats, DependencyNode, DependencyType, DependencyTypeCount, Vulnerability,
    VulnerabilityCount,
};
use crate::dependency_analysis::policies::MatchStrategy;

/// Aggregator service joining the dependency tree with audit results
///
/// Pure logic: attaches vulnerabilities to nodes and derives the summary
/// counts shown next to the graph.
///
/// `Aggregator::default()` matches by exact package name. The looser rule,
/// where either name containing the other is a match (so a `moment-timezone`
/// advisory also lands on `moment`), is `MatchStrategy::Containment` and
/// must be selected explicitly via `Aggregator::new`, the config file or
/// `--match-strategy`.
pub struct Aggregator {
    strategy: MatchStrategy,
}

impl Aggregator {
    /// Maximum nesting walked when recursing into `children`.
    /// Trees deeper than this are truncated with a warning.
    const MAX_RECURSION_DEPTH: usize = 100;

    pub fn new(strategy: MatchStrategy) -> Self {
        Self { strategy }
    }

    /// Replaces every node's `vulnerabilities` with the matching subset of
    /// `vulnerabilities`, recursing into children.
    pub fn attach_vulnerabilities(
        &self,
        tree: &mut [DependencyNode],
        vulnerabilities: &[Vulnerability],
    ) {
        self.attach_level(tree, vulnerabilities, 0);
    }

    fn attach_level(
        &self,
        nodes: &mut [DependencyNode],
        vulnerabilities: &[Vulnerability],
        level: usize,
    ) {
        if level >= Self::MAX_RECURSION_DEPTH {
            tracing::warn!(
                max_depth = Self::MAX_RECURSION_DEPTH,
                "maximum nesting reached while attaching vulnerabilities; subtree skipped"
            );
            return;
        }

        for node in nodes.iter_mut() {
            node.vulnerabilities = vulnerabilities
                .iter()
                .filter(|vuln| self.strategy.matches(&node.name, vuln))
                .cloned()
                .collect();

            if !node.children.is_empty() {
                self.attach_level(&mut node.children, vulnerabilities, level + 1);
            }
        }
    }

    /// Pre-order flattening: each node precedes its children.
    pub fn flatten(tree: &[DependencyNode]) -> Vec<&DependencyNode> {
        let mut result = Vec::new();
        Self::collect(tree, &mut result, 0);
        result
    }

    fn collect<'a>(
        nodes: &'a [DependencyNode],
        result: &mut Vec<&'a DependencyNode>,
        level: usize,
    ) {
        if level >= Self::MAX_RECURSION_DEPTH {
            tracing::warn!(
                max_depth = Self::MAX_RECURSION_DEPTH,
                "maximum nesting reached while flattening; subtree skipped"
            );
            return;
        }
        for node in nodes {
            result.push(node);
            if !node.children.is_empty() {
                Self::collect(&node.children, result, level + 1);
            }
        }
    }

    /// Totals over the flattened tree and the vulnerability list.
    ///
    /// Severity buckets count the vulnerability list itself, not per-node
    /// attachments; an `Unknown` severity lands in no bucket.
    pub fn compute_stats(
        tree: &[DependencyNode],
        vulnerabilities: &[Vulnerability],
    ) -> AnalysisStats {
        let flat = Self::flatten(tree);

        let mut vulnerability_count = VulnerabilityCount::default();
        for vuln in vulnerabilities {
            vulnerability_count.record(vuln.severity);
        }

        let mut dependency_types = DependencyTypeCount::default();
        for node in &flat {
            match node.dependency_type {
                DependencyType::Production => dependency_types.production += 1,
                DependencyType::Development => dependency_types.development += 1,
                DependencyType::Peer => dependency_types.peer += 1,
            }
        }

        AnalysisStats {
            total_dependencies: flat.len(),
            vulnerability_count,
            dependency_types,
        }
    }
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new(MatchStrategy::default())
    }
}
