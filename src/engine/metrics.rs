//! Instance run metrics.
//!
//! Counters are updated as the [`Process`](super::Process) iterator is pulled,
//! so a partially consumed run reports only the work actually done.

/// Counters for one instance.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunMetrics {
    /// Input lines fully processed by the Main phase.
    pub records: usize,
    /// Output lines handed to the caller.
    pub emitted: usize,
    /// Actions whose pattern matched (any phase).
    pub fired: usize,
    /// Actions whose pattern did not match.
    pub skipped: usize,
}
