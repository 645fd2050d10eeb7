//! Structured logger with dry-run awareness and summary collection.
use std::path::PathBuf;
use std::sync::Mutex;

use super::subscriber::{DRY_RUN_TARGET, SECTION_TARGET, SUCCESS_TARGET};
use super::types::{ItemEntry, ItemStatus, Log};
use super::utils::log_file_path;

/// Implement the display methods of [`Log`] by delegating to inherent methods
/// of the same name on the implementing type.
///
/// The `record_item` method is **not** included because its signature differs
/// from the `fn(&self, &str)` pattern shared by the display methods.
macro_rules! forward_log_methods {
    ($($method:ident),+ $(,)?) => {
        $(
            fn $method(&self, msg: &str) {
                self.$method(msg);
            }
        )+
    };
}

/// Structured logger with dry-run awareness and summary collection.
///
/// Console and file output both go through [`tracing`]; the subscriber set
/// up by [`init_subscriber`](super::subscriber::init_subscriber) decides how
/// each line is rendered. The logger itself only remembers item results for
/// the closing summary.
#[derive(Debug)]
pub struct Logger {
    items: Mutex<Vec<ItemEntry>>,
    log_file: Option<PathBuf>,
}

impl Logger {
    /// Create a new logger for `command`.
    ///
    /// Stores the log file path for display in the run summary; the file
    /// itself is created by the subscriber's file layer.
    #[must_use]
    pub fn new(command: &str) -> Self {
        Self {
            items: Mutex::new(Vec::new()),
            log_file: log_file_path(command),
        }
    }

    /// Return the log file path, if available.
    #[cfg(test)]
    pub const fn log_path(&self) -> Option<&PathBuf> {
        self.log_file.as_ref()
    }

    /// Return a clone of all recorded item entries.
    #[must_use]
    pub fn item_entries(&self) -> Vec<ItemEntry> {
        self.items.lock().map_or_else(|_| vec![], |g| g.clone())
    }

    /// Log a section header.
    pub fn section(&self, msg: &str) {
        tracing::info!(target: SECTION_TARGET, "{msg}");
    }

    /// Log an informational message.
    pub fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    /// Log a completed action.
    pub fn success(&self, msg: &str) {
        tracing::info!(target: SUCCESS_TARGET, "{msg}");
    }

    /// Log a debug message (suppressed on console unless verbose; always
    /// written to the log file).
    pub fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    /// Log a warning message.
    pub fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    /// Log an error message.
    pub fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    /// Log an action that simulation mode did not perform.
    pub fn dry_run(&self, msg: &str) {
        tracing::info!(target: DRY_RUN_TARGET, "{msg}");
    }

    /// Record an item result for the summary.
    pub fn record_item(&self, name: &str, status: ItemStatus, message: Option<&str>) {
        if let Ok(mut guard) = self.items.lock() {
            guard.push(ItemEntry {
                name: name.to_string(),
                status,
                message: message.map(String::from),
            });
        }
    }

    /// Count the number of failed items.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.items.lock().map_or(0, |guard| {
            guard
                .iter()
                .filter(|t| t.status == ItemStatus::Failed)
                .count()
        })
    }

    /// Print the summary of all recorded items.
    pub fn print_summary(&self) {
        let items = self.item_entries();
        if items.is_empty() {
            return;
        }

        self.section("Summary");

        let mut ok = 0u32;
        let mut unchanged = 0u32;
        let mut dry_run = 0u32;
        let mut failed = 0u32;

        for item in &items {
            let suffix = item
                .message
                .as_ref()
                .map_or_else(String::new, |msg| format!(" ({msg})"));
            let line = format!("{}{suffix}", item.name);
            match item.status {
                ItemStatus::Ok => {
                    ok += 1;
                    self.success(&line);
                }
                ItemStatus::Unchanged => {
                    unchanged += 1;
                    self.debug(&format!("{line} unchanged"));
                }
                ItemStatus::DryRun => {
                    dry_run += 1;
                    self.dry_run(&line);
                }
                ItemStatus::Failed => {
                    failed += 1;
                    self.error(&line);
                }
            }
        }

        let total = ok + unchanged + dry_run + failed;
        self.info(&format!(
            "{total} items: {ok} ok, {unchanged} unchanged, {dry_run} dry-run, {failed} failed"
        ));

        if let Some(path) = &self.log_file {
            self.debug(&format!("log: {}", path.display()));
        }
    }
}

impl Log for Logger {
    forward_log_methods!(section, info, success, debug, warn, error, dry_run);

    fn record_item(&self, name: &str, status: ItemStatus, message: Option<&str>) {
        self.record_item(name, status, message);
    }
}
