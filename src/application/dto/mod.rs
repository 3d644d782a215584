/// Data Transfer Objects for application layer
///
/// DTOs are used to transfer data between the application layer
/// and adapters, keeping the domain layer isolated.
mod analysis_options;
mod analyze_request;
mod analyze_response;
mod output_format;

pub use analysis_options::{AnalysisOptions, DEFAULT_INCLUDE_DEV_DEPENDENCIES, DEFAULT_MAX_DEPTH};
pub use analyze_request::AnalyzeRequest;
pub use analyze_response::{handle_analyze_request, AnalyzeResponse};
pub use output_format::OutputFormat;
