use crate::dependency_analysis::domain::{AnalysisResult, DependencyNode, DependencyType, Severity};
use crate::ports::outbound::AnalysisFormatter;
use crate::shared::Result;
use serde::Serialize;
use std::collections::HashSet;
use std::f64::consts::PI;

/// Layout centre of the root ring
const CENTER: Position = Position { x: 400.0, y: 300.0 };

/// Radius of the root ring; each nested ring shrinks by `CHILD_RADIUS_FACTOR`
const ROOT_RADIUS: f64 = 200.0;
const CHILD_RADIUS_FACTOR: f64 = 0.7;

/// Nesting below this is not laid out
const MAX_LAYOUT_DEPTH: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// One node of the visualization
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    pub version: String,
    pub dependency_type: DependencyType,
    pub position: Position,
    /// Worst severity when vulnerable, otherwise the dependency type
    pub color: String,
    pub vulnerability_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Parent to child edge, stroked by the parent's dependency type
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub stroke: &'static str,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GraphView {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl GraphView {
    /// Lays the tree out on concentric rings around `CENTER`
    ///
    /// Siblings are spread evenly on a ring; a node's children get their own
    /// ring centred on the node. A node id seen before is laid out once.
    pub fn from_tree(tree: &[DependencyNode]) -> Self {
        let mut view = GraphView::default();
        let mut seen = HashSet::new();
        view.layout_ring(tree, CENTER, ROOT_RADIUS, &mut seen, 0);
        view
    }

    fn layout_ring<'a>(
        &mut self,
        nodes: &'a [DependencyNode],
        center: Position,
        radius: f64,
        seen: &mut HashSet<&'a str>,
        level: usize,
    ) {
        if level >= MAX_LAYOUT_DEPTH {
            tracing::warn!(max_depth = MAX_LAYOUT_DEPTH, "graph layout truncated");
            return;
        }

        let angle_step = if nodes.len() > 1 {
            2.0 * PI / nodes.len() as f64
        } else {
            0.0
        };

        for (index, node) in nodes.iter().enumerate() {
            if !seen.insert(node.id.as_str()) {
                continue;
            }

            let angle = index as f64 * angle_step;
            let position = Position {
                x: center.x + radius * angle.cos(),
                y: center.y + radius * angle.sin(),
            };
            self.nodes.push(Self::graph_node(node, position));

            for child in &node.children {
                if !seen.contains(child.id.as_str()) {
                    self.edges.push(GraphEdge {
                        id: format!("{}-{}", node.id, child.id),
                        source: node.id.clone(),
                        target: child.id.clone(),
                        stroke: edge_stroke(node.dependency_type),
                    });
                }
            }

            if !node.children.is_empty() {
                self.layout_ring(
                    &node.children,
                    position,
                    radius * CHILD_RADIUS_FACTOR,
                    seen,
                    level + 1,
                );
            }
        }
    }

    fn graph_node(node: &DependencyNode, position: Position) -> GraphNode {
        let color = match node.highest_severity() {
            Some(severity) => severity.as_str().to_string(),
            None if node.is_vulnerable() => Severity::Unknown.as_str().to_string(),
            None => node.dependency_type.to_string(),
        };

        GraphNode {
            id: node.id.clone(),
            label: node.name.clone(),
            version: node.resolved_version.clone(),
            dependency_type: node.dependency_type,
            position,
            color,
            vulnerability_count: node.vulnerabilities.len(),
            description: node.description.clone(),
        }
    }
}

fn edge_stroke(dependency_type: DependencyType) -> &'static str {
    match dependency_type {
        DependencyType::Production => "#3b82f6",
        DependencyType::Development => "#fb923c",
        DependencyType::Peer => "#a855f7",
    }
}

/// GraphFormatter adapter emitting visualization nodes and edges as JSON
pub struct GraphFormatter;

impl GraphFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for GraphFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisFormatter for GraphFormatter {
    fn format(&self, result: &AnalysisResult) -> Result<String> {
        let view = GraphView::from_tree(&result.dependency_tree);
        Ok(serde_json::to_string_pretty(&view)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::outbound::formatters::fixtures::sample_result;
    use crate::dependency_analysis::domain::ResolutionStatus;

    fn node(name: &str, dependency_type: DependencyType) -> DependencyNode {
        DependencyNode::unresolved(name, "*", dependency_type, 0, ResolutionStatus::Skipped)
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-6,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_single_node_sits_right_of_center() {
        let view = GraphView::from_tree(&[node("react", DependencyType::Production)]);

        assert_eq!(view.nodes.len(), 1);
        assert_close(view.nodes[0].position.x, 600.0);
        assert_close(view.nodes[0].position.y, 300.0);
        assert!(view.edges.is_empty());
    }

    #[test]
    fn test_siblings_spread_evenly() {
        let view = GraphView::from_tree(&[
            node("a", DependencyType::Production),
            node("b", DependencyType::Production),
            node("c", DependencyType::Production),
            node("d", DependencyType::Production),
        ]);

        let positions: Vec<(f64, f64)> = view
            .nodes
            .iter()
            .map(|n| (n.position.x, n.position.y))
            .collect();
        assert_close(positions[0].0, 600.0);
        assert_close(positions[1].1, 500.0);
        assert_close(positions[2].0, 200.0);
        assert_close(positions[3].1, 100.0);
    }

    #[test]
    fn test_children_get_edges_and_smaller_ring() {
        let mut parent = node("express", DependencyType::Development);
        parent.children = vec![DependencyNode::unresolved(
            "qs",
            "*",
            DependencyType::Development,
            1,
            ResolutionStatus::Skipped,
        )];

        let view = GraphView::from_tree(&[parent]);

        assert_eq!(view.nodes.len(), 2);
        assert_eq!(view.edges.len(), 1);
        assert_eq!(view.edges[0].id, "express@unknown-0-qs@unknown-1");
        assert_eq!(view.edges[0].stroke, "#fb923c");
        assert_close(view.nodes[1].position.x, 600.0 + 140.0);
    }

    #[test]
    fn test_duplicate_ids_laid_out_once() {
        let view = GraphView::from_tree(&[
            node("react", DependencyType::Production),
            node("react", DependencyType::Production),
        ]);
        assert_eq!(view.nodes.len(), 1);
    }

    #[test]
    fn test_color_prefers_severity_over_type() {
        let view = GraphView::from_tree(&sample_result().dependency_tree);

        assert_eq!(view.nodes[0].color, "high");
        assert_eq!(view.nodes[0].vulnerability_count, 1);
        assert_eq!(view.nodes[1].color, "production");
        assert_eq!(view.nodes[2].color, "development");
    }

    #[test]
    fn test_format_serializes_camel_case() {
        let output = GraphFormatter::new().format(&sample_result()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(json["nodes"].as_array().unwrap().len(), 3);
        assert_eq!(json["nodes"][0]["label"], "lodash");
        assert_eq!(json["nodes"][0]["dependencyType"], "production");
        assert_eq!(json["nodes"][0]["vulnerabilityCount"], 1);
        assert!(json["edges"].as_array().unwrap().is_empty());
    }
}
