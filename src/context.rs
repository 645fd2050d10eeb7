//! Run-wide settings shared by every file operation.
use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::fileops::fs::expand_path;

/// Format of the per-run backup directory name.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Name of the environment variable that switches on simulation mode.
pub const DRY_RUN_ENV: &str = "DRY_RUN";

/// Settings computed once at startup and threaded into every operation.
///
/// Nothing here changes during a run: all backups of one invocation share
/// [`timestamp`](Self::timestamp), and [`dry_run`](Self::dry_run) is never
/// re-read from the environment.
#[derive(Debug, Clone)]
pub struct Context {
    /// Root of the dotfiles repository; link sources live below it.
    pub base: PathBuf,
    /// Directory that holds one timestamped subdirectory per run.
    pub backup_root: PathBuf,
    /// Run timestamp (`%Y%m%d%H%M%S`), fixed at construction.
    pub timestamp: String,
    /// User's home directory, used to expand `~`.
    pub home: PathBuf,
    /// Simulation mode: report intended actions, mutate nothing.
    pub dry_run: bool,
}

impl Context {
    /// Create a context for a run starting now.
    ///
    /// # Errors
    ///
    /// Returns an error if the HOME environment variable is not set.
    pub fn new(base: PathBuf, dry_run: bool) -> Result<Self> {
        let home = home_dir()?;
        let timestamp = chrono::Local::now().format(TIMESTAMP_FORMAT).to_string();
        Ok(Self::with_timestamp(base, home, dry_run, timestamp))
    }

    /// Create a context with every value supplied explicitly.
    #[must_use]
    pub fn with_timestamp(
        base: PathBuf,
        home: PathBuf,
        dry_run: bool,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            backup_root: base.join("backup"),
            base,
            timestamp: timestamp.into(),
            home,
            dry_run,
        }
    }

    /// The backup directory of this run: `<backup_root>/<timestamp>`.
    #[must_use]
    pub fn backup_dir(&self) -> PathBuf {
        self.backup_root.join(&self.timestamp)
    }

    /// Resolve `path` to an absolute path, expanding a leading `~`.
    #[must_use]
    pub fn expand(&self, path: &Path) -> PathBuf {
        expand_path(path, &self.home)
    }

    /// Display name of a link source: relative to [`base`](Self::base) when
    /// it lives below it, the full path otherwise.
    #[must_use]
    pub fn display_source(&self, source: &Path) -> String {
        source
            .strip_prefix(&self.base)
            .unwrap_or(source)
            .display()
            .to_string()
    }
}

/// Interpret the value of the `DRY_RUN` environment variable.
///
/// Only the exact string `"true"` enables simulation mode.
#[must_use]
pub fn dry_run_from_env(value: Option<&str>) -> bool {
    value == Some("true")
}

/// Return the user's home directory from `HOME`.
///
/// # Errors
///
/// Returns an error if `HOME` is not set.
pub fn home_dir() -> Result<PathBuf> {
    std::env::var("HOME")
        .map(PathBuf::from)
        .map_err(|_| anyhow::anyhow!("HOME environment variable is not set"))
}
