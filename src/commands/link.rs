//! Command: symlink a single file into place.
use anyhow::Result;
use std::path::Path;

use super::settle;
use crate::cli::GlobalOpts;
use crate::fileops::FileOps;
use crate::logging::Logger;

/// Link `destination` to `source`.
///
/// A relative `source` is taken relative to the dotfiles root.
///
/// # Errors
///
/// Returns an error if setup fails or the link fails outside simulation
/// mode.
pub fn run(global: &GlobalOpts, source: &Path, destination: &Path, log: &Logger) -> Result<()> {
    let ctx = super::setup(global, log)?;
    let source = if source.is_absolute() || source.starts_with("~") {
        ctx.expand(source)
    } else {
        ctx.base.join(source)
    };
    let destination = ctx.expand(destination);
    let name = destination.display().to_string();

    let result = FileOps::new(&ctx, log).link(&source, &destination);
    settle(&name, result, ctx.dry_run, log)
}
