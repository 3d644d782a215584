/// Formatter adapters for the supported analysis output formats
mod graph_formatter;
mod json_formatter;
mod markdown_formatter;

pub use graph_formatter::{GraphEdge, GraphFormatter, GraphNode, GraphView, Position};
pub use json_formatter::JsonFormatter;
pub use markdown_formatter::MarkdownFormatter;
