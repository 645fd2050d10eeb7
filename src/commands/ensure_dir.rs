//! Command: create a directory if it is missing.
use anyhow::Result;
use std::path::Path;

use super::settle;
use crate::cli::GlobalOpts;
use crate::fileops::FileOps;
use crate::logging::Logger;

/// Ensure `path` exists as a directory.
///
/// # Errors
///
/// Returns an error if setup fails or the directory cannot be created
/// outside simulation mode.
pub fn run(global: &GlobalOpts, path: &Path, log: &Logger) -> Result<()> {
    let ctx = super::setup(global, log)?;
    let name = ctx.expand(path).display().to_string();

    let result = FileOps::new(&ctx, log).ensure_directory(path);
    settle(&name, result, ctx.dry_run, log)
}
