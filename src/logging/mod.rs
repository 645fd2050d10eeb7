//! Logging infrastructure for colorized console and file output.

mod logger;
mod subscriber;
mod types;
mod utils;

pub use logger::Logger;
pub use subscriber::init_subscriber;
pub use types::{ItemEntry, ItemStatus, Log};

/// Serializes `XDG_CACHE_HOME` manipulation across parallel test threads.
#[cfg(test)]
pub(crate) static TEST_ENV_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());

/// Create a Logger backed by an isolated per-thread tracing subscriber
/// with a [`FileLayer`](subscriber::FileLayer), so that tracing events
/// emitted by logger methods actually reach the log file during tests.
///
/// Returns a [`tracing::dispatcher::DefaultGuard`] that must be kept alive
/// for the duration of the test; dropping it restores the previous
/// thread-local dispatcher.
#[cfg(test)]
#[allow(clippy::expect_used)]
pub(crate) fn isolated_logger() -> (Logger, tempfile::TempDir, tracing::dispatcher::DefaultGuard) {
    use tracing_subscriber::{Layer as _, filter::LevelFilter, layer::SubscriberExt as _};
    let tmp = tempfile::tempdir().expect("failed to create temp dir");
    let env_lock = TEST_ENV_MUTEX
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner);
    // SAFETY: Protected by TEST_ENV_MUTEX; restored before lock is released.
    #[allow(unsafe_code)]
    unsafe {
        std::env::set_var("XDG_CACHE_HOME", tmp.path());
    }
    let file_layer = subscriber::FileLayer::new("test").expect("failed to create file layer");
    let log = Logger::new("test");
    // SAFETY: Protected by TEST_ENV_MUTEX.
    #[allow(unsafe_code)]
    unsafe {
        std::env::remove_var("XDG_CACHE_HOME");
    }
    drop(env_lock);
    let subscriber =
        tracing_subscriber::registry().with(file_layer.with_filter(LevelFilter::DEBUG));
    let guard = tracing::dispatcher::set_default(&tracing::Dispatch::new(subscriber));
    (log, tmp, guard)
}

/// In-memory [`Log`] double for unit and integration tests.
///
/// Every display call is stored as `(kind, message)` so tests can assert on
/// what an operation reported without a tracing subscriber.
#[doc(hidden)]
#[derive(Debug, Default)]
pub struct RecordingLog {
    lines: std::sync::Mutex<Vec<(&'static str, String)>>,
    items: std::sync::Mutex<Vec<ItemEntry>>,
}

impl RecordingLog {
    /// Create an empty recording log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded `(kind, message)` lines, in order.
    #[must_use]
    pub fn lines(&self) -> Vec<(&'static str, String)> {
        self.lines.lock().map_or_else(|_| vec![], |g| g.clone())
    }

    /// Messages recorded under `kind` (`"info"`, `"success"`, `"dry_run"`, …).
    #[must_use]
    pub fn messages(&self, kind: &str) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|(k, _)| *k == kind)
            .map(|(_, m)| m)
            .collect()
    }

    /// All recorded item entries.
    #[must_use]
    pub fn items(&self) -> Vec<ItemEntry> {
        self.items.lock().map_or_else(|_| vec![], |g| g.clone())
    }

    fn push(&self, kind: &'static str, msg: &str) {
        if let Ok(mut guard) = self.lines.lock() {
            guard.push((kind, msg.to_string()));
        }
    }
}

impl Log for RecordingLog {
    fn section(&self, msg: &str) {
        self.push("section", msg);
    }

    fn info(&self, msg: &str) {
        self.push("info", msg);
    }

    fn success(&self, msg: &str) {
        self.push("success", msg);
    }

    fn debug(&self, msg: &str) {
        self.push("debug", msg);
    }

    fn warn(&self, msg: &str) {
        self.push("warn", msg);
    }

    fn error(&self, msg: &str) {
        self.push("error", msg);
    }

    fn dry_run(&self, msg: &str) {
        self.push("dry_run", msg);
    }

    fn record_item(&self, name: &str, status: ItemStatus, message: Option<&str>) {
        if let Ok(mut guard) = self.items.lock() {
            guard.push(ItemEntry {
                name: name.to_string(),
                status,
                message: message.map(String::from),
            });
        }
    }
}
