use crate::dependency_analysis::domain::{AnalysisResult, Severity};
use owo_colors::OwoColorize;
use std::io::IsTerminal;

/// One-screen overview of an analysis for the terminal
///
/// Colours are applied only when `colored` is set; severity counts of zero
/// are dimmed.
pub fn render_summary(result: &AnalysisResult, colored: bool) -> String {
    let stats = &result.stats;
    let mut lines = Vec::new();

    lines.push(format!(
        "📦 {} v{}: {} dependencies ({} production, {} development, {} peer)",
        result.project_info.name,
        result.project_info.version,
        stats.total_dependencies,
        stats.dependency_types.production,
        stats.dependency_types.development,
        stats.dependency_types.peer
    ));

    let counts: Vec<String> = [
        Severity::Critical,
        Severity::High,
        Severity::Medium,
        Severity::Low,
    ]
    .into_iter()
    .map(|severity| {
        let text = format!("{} {}", stats.vulnerability_count.get(severity), severity);
        if colored {
            paint(&text, severity, stats.vulnerability_count.get(severity) > 0)
        } else {
            text
        }
    })
    .collect();

    lines.push(format!("🛡️  Vulnerabilities: {}", counts.join(", ")));
    lines.join("\n")
}

fn paint(text: &str, severity: Severity, present: bool) -> String {
    if !present {
        return text.dimmed().to_string();
    }
    match severity {
        Severity::Critical => text.red().bold().to_string(),
        Severity::High => text.red().to_string(),
        Severity::Medium => text.yellow().to_string(),
        Severity::Low => text.green().to_string(),
        Severity::Unknown => text.to_string(),
    }
}

/// Prints the summary to stderr, coloured when stderr is a terminal
pub fn print_summary(result: &AnalysisResult) {
    let colored = std::io::stderr().is_terminal();
    eprintln!("{}", render_summary(result, colored));
}
