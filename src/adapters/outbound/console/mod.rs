/// Console adapters for user-facing terminal output on stderr
mod progress_reporter;
mod summary;

pub use progress_reporter::StderrProgressReporter;
pub use summary::{print_summary, render_summary};
