//! Core logging types: item entries, status, and the [`Log`] trait.

/// Result of one installed item, kept for summary reporting.
#[derive(Debug, Clone)]
pub struct ItemEntry {
    /// Human-readable item name (usually the destination path).
    pub name: String,
    /// Final status of the item.
    pub status: ItemStatus,
    /// Optional detail message (e.g. the error description).
    pub message: Option<String>,
}

/// Status of a processed item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemStatus {
    /// The item was created or updated.
    Ok,
    /// The item was already in place; nothing was changed.
    Unchanged,
    /// Simulation mode; the intended action was only reported.
    DryRun,
    /// The item could not be installed.
    Failed,
}

/// Abstraction over logging backends.
///
/// [`Logger`](super::logger::Logger) is the production implementation; file
/// operations take `&dyn Log` so tests can substitute a recording double.
pub trait Log: Send + Sync {
    /// Log a section header.
    fn section(&self, msg: &str);
    /// Log an informational message.
    fn info(&self, msg: &str);
    /// Log a completed action.
    fn success(&self, msg: &str);
    /// Log a debug message (suppressed on console unless verbose).
    fn debug(&self, msg: &str);
    /// Log a warning message.
    fn warn(&self, msg: &str);
    /// Log an error message.
    fn error(&self, msg: &str);
    /// Log an action that simulation mode did not perform.
    fn dry_run(&self, msg: &str);
    /// Record an item result for the summary.
    fn record_item(&self, name: &str, status: ItemStatus, message: Option<&str>);
}
