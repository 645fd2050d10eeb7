//! Stateless installer operations: link, backup, download, ensure directory,
//! and run command.
//!
//! Every operation reports progress through [`Log`] and returns an
//! [`OpResult`]. None of them terminates the process; a failed operation
//! returns a [`FileOpsError`] whose [`Severity`](crate::error::Severity)
//! tells the driver whether the run may continue.
//!
//! In simulation mode ([`Context::dry_run`]) no operation mutates the
//! filesystem, touches the network, or runs a command. Each one reports the
//! action it would have taken instead.
pub mod backup;
pub mod command;
pub mod directory;
pub mod download;
pub mod fs;
pub mod link;

use crate::context::Context;
use crate::error::FileOpsError;
use crate::logging::Log;

/// What an operation did to the system.
///
/// # Examples
///
/// ```
/// use dotfiles_installer::fileops::Change;
///
/// assert_ne!(Change::Applied, Change::AlreadyCorrect);
/// assert_eq!(Change::Simulated, Change::Simulated);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    /// The filesystem (or system) was changed.
    Applied,
    /// Nothing needed doing; no mutation happened.
    AlreadyCorrect,
    /// Simulation mode; the change was only reported.
    Simulated,
}

/// Successful result of an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// What happened.
    pub change: Change,
    /// Human-readable status line.
    pub message: String,
}

impl Outcome {
    /// The operation changed the system.
    #[must_use]
    pub fn applied(message: impl Into<String>) -> Self {
        Self {
            change: Change::Applied,
            message: message.into(),
        }
    }

    /// The operation found nothing to do.
    #[must_use]
    pub fn already_correct(message: impl Into<String>) -> Self {
        Self {
            change: Change::AlreadyCorrect,
            message: message.into(),
        }
    }

    /// The operation only reported what it would do.
    #[must_use]
    pub fn simulated(message: impl Into<String>) -> Self {
        Self {
            change: Change::Simulated,
            message: message.into(),
        }
    }

    /// Applied or simulated, depending on the run mode.
    #[must_use]
    pub fn done(dry_run: bool, message: impl Into<String>) -> Self {
        if dry_run {
            Self::simulated(message)
        } else {
            Self::applied(message)
        }
    }
}

/// Result type returned by every file operation.
pub type OpResult = Result<Outcome, FileOpsError>;

/// Entry point for the installer operations.
///
/// Holds the run [`Context`] and the log every operation reports through.
/// Operations are implemented in the submodules of this module.
pub struct FileOps<'a> {
    ctx: &'a Context,
    log: &'a dyn Log,
}

impl std::fmt::Debug for FileOps<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileOps")
            .field("ctx", &self.ctx)
            .field("log", &"<dyn Log>")
            .finish()
    }
}

impl<'a> FileOps<'a> {
    /// Create the operations for one run.
    #[must_use]
    pub const fn new(ctx: &'a Context, log: &'a dyn Log) -> Self {
        Self { ctx, log }
    }

    /// Whether simulation mode is active.
    #[must_use]
    pub const fn simulating(&self) -> bool {
        self.ctx.dry_run
    }
}
