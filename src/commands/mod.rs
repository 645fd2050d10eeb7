//! Top-level subcommand orchestration.
//!
//! Each subcommand builds one [`Context`] from the global options, runs its
//! file operations, and hands every result to [`settle`], which reports it
//! and decides whether the run may continue.
pub mod completions;
pub mod download;
pub mod ensure_dir;
pub mod install;
pub mod link;
pub mod version;

use anyhow::{Context as _, Result};
use std::path::PathBuf;

use crate::cli::GlobalOpts;
use crate::context::{self, Context, DRY_RUN_ENV};
use crate::fileops::{Change, OpResult};
use crate::logging::{ItemStatus, Log};

/// Environment variable that overrides the dotfiles base directory.
pub const ROOT_ENV: &str = "DOTFILES_ROOT";

/// Base directory under `$HOME` when neither `--root` nor `DOTFILES_ROOT` is set.
pub const DEFAULT_ROOT_DIR: &str = "dotfiles";

/// Resolve the dotfiles root from `--root`, then `DOTFILES_ROOT`, then
/// `~/dotfiles`.
///
/// # Errors
///
/// Returns an error if the default is needed and `HOME` is not set, or the
/// path cannot be made absolute.
pub fn resolve_root(global: &GlobalOpts) -> Result<PathBuf> {
    let root = match (&global.root, std::env::var_os(ROOT_ENV)) {
        (Some(root), _) => root.clone(),
        (None, Some(env)) if !env.is_empty() => PathBuf::from(env),
        _ => context::home_dir()?.join(DEFAULT_ROOT_DIR),
    };

    if root.exists() {
        return dunce::canonicalize(&root)
            .with_context(|| format!("cannot resolve dotfiles root {}", root.display()));
    }
    std::path::absolute(&root)
        .with_context(|| format!("cannot resolve dotfiles root {}", root.display()))
}

/// Simulation mode is on when `--dry-run` is given or `DRY_RUN=true`.
#[must_use]
pub fn resolve_dry_run(flag: bool) -> bool {
    flag || context::dry_run_from_env(std::env::var(DRY_RUN_ENV).ok().as_deref())
}

/// Build the run context from the global options.
///
/// # Errors
///
/// Returns an error if the root cannot be resolved or `HOME` is not set.
pub fn setup(global: &GlobalOpts, log: &dyn Log) -> Result<Context> {
    let root = resolve_root(global)?;
    let dry_run = resolve_dry_run(global.dry_run);
    if !root.is_dir() {
        log.warn(&format!("dotfiles root {} does not exist", root.display()));
    }
    log.debug(&format!("root: {}", root.display()));
    if dry_run {
        log.debug("simulation mode: nothing will be changed");
    }
    Context::new(root, dry_run)
}

/// Report the result of one operation and record it for the summary.
///
/// A fatal error stops the run outside simulation mode; anything else is
/// logged and the caller moves on to the next item.
///
/// # Errors
///
/// Returns the operation's error if it is fatal and `dry_run` is off.
pub fn settle(name: &str, result: OpResult, dry_run: bool, log: &dyn Log) -> Result<()> {
    match result {
        Ok(outcome) => {
            let status = match outcome.change {
                Change::Applied => ItemStatus::Ok,
                Change::AlreadyCorrect => ItemStatus::Unchanged,
                Change::Simulated => ItemStatus::DryRun,
            };
            if status == ItemStatus::DryRun {
                log.dry_run(&outcome.message);
            } else {
                log.success(&outcome.message);
            }
            log.record_item(name, status, None);
            Ok(())
        }
        Err(err) => {
            let message = err.to_string();
            log.error(&message);
            log.record_item(name, ItemStatus::Failed, Some(&message));
            if err.is_fatal() && !dry_run {
                return Err(anyhow::Error::new(err).context(format!("{name} failed")));
            }
            Ok(())
        }
    }
}
