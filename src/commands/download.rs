//! Command: download a single file.
use anyhow::{Result, bail};
use std::path::Path;

use super::settle;
use crate::cli::GlobalOpts;
use crate::fileops::FileOps;
use crate::fileops::download::DownloadOptions;
use crate::logging::Logger;

/// Download `url` to `destination`.
///
/// # Errors
///
/// Returns an error if setup fails, the destination directory cannot be
/// created, or the download itself fails.
pub fn run(
    global: &GlobalOpts,
    url: &str,
    destination: &Path,
    options: &DownloadOptions,
    log: &Logger,
) -> Result<()> {
    let ctx = super::setup(global, log)?;
    let name = ctx.expand(destination).display().to_string();

    let result = FileOps::new(&ctx, log).download_with(url, destination, options);
    settle(&name, result, ctx.dry_run, log)?;

    if log.failure_count() > 0 {
        bail!("download of {url} failed");
    }
    Ok(())
}
