//! Domain-specific error types for the installer.
//!
//! File operations return [`FileOpsError`], which carries a [`Severity`]
//! describing whether the run may continue past it. Configuration loading
//! returns [`ConfigError`]. Command handlers at the CLI boundary convert both
//! to [`anyhow::Error`] via the standard `?` operator.
//!
//! # Error hierarchy
//!
//! ```text
//! FileOpsError               severity
//! ├── CreateDir              Fatal
//! ├── Backup                 Fatal
//! ├── Link                   Fatal
//! ├── Download               Recoverable
//! └── Command                Recoverable
//!
//! ConfigError
//! ├── Io
//! └── Parse
//! ```

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// How far the effect of a failed operation reaches.
///
/// Operations never terminate the process themselves; the driver inspects
/// the severity and decides whether to stop iterating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The run must stop here (outside simulation mode).
    Fatal,
    /// Only this item failed; the run continues with the next one.
    Recoverable,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fatal => write!(f, "fatal"),
            Self::Recoverable => write!(f, "recoverable"),
        }
    }
}

/// Errors produced by the file operations in [`crate::fileops`].
#[derive(Error, Debug)]
pub enum FileOpsError {
    /// A directory (or a link's parent directory) could not be created.
    #[error("Failed to create directory {}: {source}", path.display())]
    CreateDir {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A conflicting file could not be moved into the backup directory.
    #[error("Failed to back up {} to {}: {source}", path.display(), backup_dir.display())]
    Backup {
        /// Path that was being backed up.
        path: PathBuf,
        /// Timestamped backup directory of the current run.
        backup_dir: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The symbolic link could not be created.
    #[error("Failed to link {} to {}: {source}", source_path.display(), destination.display())]
    Link {
        /// What the link should point at.
        source_path: PathBuf,
        /// Where the link should be created.
        destination: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A download failed while fetching, writing, or verifying.
    #[error("Failed to download {url}: {reason}")]
    Download {
        /// URL that was being fetched.
        url: String,
        /// Human-readable reason for the failure.
        reason: String,
    },

    /// A shell command could not be started or exited unsuccessfully.
    #[error("Command '{command}' failed: {reason}")]
    Command {
        /// Command line that was run.
        command: String,
        /// Human-readable reason for the failure.
        reason: String,
    },
}

impl FileOpsError {
    /// Whether the driver must halt the run after this error.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        match self {
            Self::CreateDir { .. } | Self::Backup { .. } | Self::Link { .. } => Severity::Fatal,
            Self::Download { .. } | Self::Command { .. } => Severity::Recoverable,
        }
    }

    /// Shorthand for `severity() == Severity::Fatal`.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self.severity(), Severity::Fatal)
    }
}

/// Errors that arise while loading the install manifest.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The manifest exists but could not be read.
    #[error("IO error reading config file {}: {source}", path.display())]
    Io {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The manifest is not valid TOML or does not match the expected shape.
    #[error("Invalid TOML in {}: {source}", path.display())]
    Parse {
        /// Path to the file that failed to parse.
        path: PathBuf,
        /// Underlying deserialization error.
        source: toml::de::Error,
    },
}
