/// ProgressReporter port for reporting progress during an analysis
///
/// This port abstracts user-facing progress output (e.g., to stderr)
/// so that it never mixes with the formatted result on stdout.
/// Implementations must be `Send + Sync` because the analysis runs async.
pub trait ProgressReporter: Send + Sync {
    /// Reports a progress message
    fn report(&self, message: &str);

    /// Reports `current` out of `total` steps done, with an optional message
    fn report_progress(&self, current: usize, total: usize, message: Option<&str>);

    /// Reports an error or warning message
    fn report_error(&self, message: &str);

    /// Reports completion of an operation
    fn report_completion(&self, message: &str);
}
