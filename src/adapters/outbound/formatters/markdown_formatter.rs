use crate::dependency_analysis::domain::{
    AnalysisResult, DependencyNode, DependencyType, ResolutionStatus, Severity,
};
use crate::dependency_analysis::services::Aggregator;
use crate::ports::outbound::AnalysisFormatter;
use crate::shared::Result;

/// Markdown table header for dependency information
const TABLE_HEADER: &str = "| Package | Requested | Resolved | License | Description |\n";

/// Markdown table separator line
const TABLE_SEPARATOR: &str = "|---------|-----------|----------|---------|-------------|\n";

/// Markdown table header for vulnerability information
const VULN_TABLE_HEADER: &str = "| Package | Severity | Title | Vulnerable Versions | Source |\n";

/// Markdown table separator line for vulnerability table
const VULN_TABLE_SEPARATOR: &str =
    "|---------|----------|-------|---------------------|--------|\n";

/// Severities listed in the summary, worst first
const SEVERITY_ORDER: [Severity; 4] = [
    Severity::Critical,
    Severity::High,
    Severity::Medium,
    Severity::Low,
];

/// MarkdownFormatter adapter for a human-readable analysis report
///
/// This adapter implements the AnalysisFormatter port for Markdown format:
/// project header, summary counts, the vulnerability list and one
/// dependency table per dependency type.
pub struct MarkdownFormatter;

impl MarkdownFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Escapes pipe characters and newlines for safe Markdown table rendering
    fn escape_markdown_table_cell(text: &str) -> String {
        text.replace('|', "\\|").replace('\n', " ")
    }

    /// Generate a Markdown hyperlink to the package's npm page
    fn package_to_npm_link(name: &str) -> String {
        format!(
            "[{}](https://www.npmjs.com/package/{})",
            Self::escape_markdown_table_cell(name),
            name
        )
    }

    fn section_title(dependency_type: DependencyType) -> &'static str {
        match dependency_type {
            DependencyType::Production => "Production Dependencies",
            DependencyType::Development => "Development Dependencies",
            DependencyType::Peer => "Peer Dependencies",
        }
    }
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper methods for rendering sections
impl MarkdownFormatter {
    fn render_header(&self, output: &mut String, result: &AnalysisResult) {
        let info = &result.project_info;
        output.push_str(&format!(
            "# Dependency Analysis: {} v{}\n\n",
            info.name, info.version
        ));
        if !info.description.is_empty() {
            output.push_str(&format!("{}\n\n", info.description));
        }
        output.push_str(&format!("Analysis ID: `{}`\n\n", result.project_id));
    }

    fn render_summary(&self, output: &mut String, result: &AnalysisResult) {
        let stats = &result.stats;
        output.push_str("## Summary\n\n");
        output.push_str("| Metric | Count |\n");
        output.push_str("|--------|-------|\n");
        output.push_str(&format!(
            "| Total dependencies | {} |\n",
            stats.total_dependencies
        ));
        output.push_str(&format!(
            "| Production | {} |\n",
            stats.dependency_types.production
        ));
        output.push_str(&format!(
            "| Development | {} |\n",
            stats.dependency_types.development
        ));
        output.push_str(&format!("| Peer | {} |\n", stats.dependency_types.peer));

        for severity in SEVERITY_ORDER {
            output.push_str(&format!(
                "| {} vulnerabilities | {} |\n",
                capitalize(severity.as_str()),
                stats.vulnerability_count.get(severity)
            ));
        }
        output.push('\n');
    }

    fn render_vulnerabilities(&self, output: &mut String, result: &AnalysisResult) {
        output.push_str("## Known Vulnerabilities\n\n");

        if result.vulnerabilities.is_empty() {
            output.push_str("No known vulnerabilities found.\n\n");
            return;
        }

        output.push_str(VULN_TABLE_HEADER);
        output.push_str(VULN_TABLE_SEPARATOR);

        let mut sorted: Vec<_> = result.vulnerabilities.iter().collect();
        sorted.sort_by(|a, b| b.severity.cmp(&a.severity));

        for vuln in sorted {
            output.push_str(&format!(
                "| {} | {} | {} | {} | {} |\n",
                Self::package_to_npm_link(&vuln.package_name),
                severity_badge(vuln.severity),
                Self::escape_markdown_table_cell(&vuln.title),
                Self::escape_markdown_table_cell(&vuln.vulnerable_versions),
                Self::escape_markdown_table_cell(&vuln.source)
            ));
        }
        output.push('\n');
    }

    fn render_dependencies(&self, output: &mut String, result: &AnalysisResult) {
        let flat = Aggregator::flatten(&result.dependency_tree);

        if flat.is_empty() {
            output.push_str("## Dependencies\n\n");
            output.push_str("No dependencies within the requested depth.\n\n");
            return;
        }

        for dependency_type in [
            DependencyType::Production,
            DependencyType::Development,
            DependencyType::Peer,
        ] {
            let nodes: Vec<&DependencyNode> = flat
                .iter()
                .copied()
                .filter(|node| node.dependency_type == dependency_type)
                .collect();
            if nodes.is_empty() {
                continue;
            }

            output.push_str(&format!("## {}\n\n", Self::section_title(dependency_type)));
            output.push_str(TABLE_HEADER);
            output.push_str(TABLE_SEPARATOR);

            for node in nodes {
                let resolved = match node.resolution {
                    ResolutionStatus::Degraded => {
                        format!("{} (lookup failed)", node.resolved_version)
                    }
                    _ => node.resolved_version.clone(),
                };
                let name = if node.is_vulnerable() {
                    format!("{} ⚠️", Self::package_to_npm_link(&node.name))
                } else {
                    Self::package_to_npm_link(&node.name)
                };

                output.push_str(&format!(
                    "| {} | {} | {} | {} | {} |\n",
                    name,
                    Self::escape_markdown_table_cell(&node.requested_range),
                    Self::escape_markdown_table_cell(&resolved),
                    Self::escape_markdown_table_cell(node.license.as_deref().unwrap_or("N/A")),
                    Self::escape_markdown_table_cell(node.description.as_deref().unwrap_or(""))
                ));
            }
            output.push('\n');
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn severity_badge(severity: Severity) -> String {
    match severity {
        Severity::Critical => "🔴 CRITICAL".to_string(),
        Severity::High => "🟠 HIGH".to_string(),
        Severity::Medium => "🟡 MEDIUM".to_string(),
        Severity::Low => "🟢 LOW".to_string(),
        Severity::Unknown => "⚪ UNKNOWN".to_string(),
    }
}

impl AnalysisFormatter for MarkdownFormatter {
    fn format(&self, result: &AnalysisResult) -> Result<String> {
        let mut output = String::new();

        self.render_header(&mut output, result);
        self.render_summary(&mut output, result);
        self.render_vulnerabilities(&mut output, result);
        self.render_dependencies(&mut output, result);

        Ok(output)
    }
}
