//! Command: apply the install manifest.
use anyhow::{Context as _, Result};
use std::path::Path;

use super::settle;
use crate::cli::{GlobalOpts, InstallOpts, Section};
use crate::config::{self, Manifest};
use crate::context::Context;
use crate::fileops::FileOps;
use crate::logging::{Log, Logger};

/// Run the install command.
///
/// # Errors
///
/// Returns an error if the manifest cannot be loaded or an item fails
/// fatally outside simulation mode.
pub fn run(global: &GlobalOpts, opts: &InstallOpts, log: &Logger) -> Result<()> {
    log.info(&format!("dotfiles {}", super::version::string()));

    let ctx = super::setup(global, log)?;

    log.section("Loading configuration");
    let path = config::manifest_path(&ctx.base);
    let manifest =
        Manifest::load(&path).with_context(|| format!("loading {}", path.display()))?;
    log.info(&format!(
        "loaded {} directories, {} symlinks, {} downloads, {} commands",
        manifest.directories.len(),
        manifest.symlinks.len(),
        manifest.downloads.len(),
        manifest.commands.len()
    ));

    let result = apply(&manifest, opts, &ctx, log);
    log.print_summary();
    result
}

/// Apply every selected manifest section in order.
///
/// Recoverable failures are recorded and the run moves on; the first fatal
/// failure outside simulation mode stops it.
///
/// # Errors
///
/// Returns the first fatal error when `ctx.dry_run` is off.
pub fn apply(manifest: &Manifest, opts: &InstallOpts, ctx: &Context, log: &dyn Log) -> Result<()> {
    let ops = FileOps::new(ctx, log);

    for section in Section::ALL {
        if !opts.includes(section) {
            log.debug(&format!("skipping {}", section.title()));
            continue;
        }
        if section_is_empty(manifest, section) {
            continue;
        }
        log.section(section.title());

        match section {
            Section::Directories => {
                for dir in &manifest.directories {
                    let result = ops.ensure_directory(Path::new(dir));
                    settle(dir, result, ctx.dry_run, log)?;
                }
            }
            Section::Symlinks => {
                for entry in &manifest.symlinks {
                    let pair = entry.resolve(ctx);
                    let name = pair.destination.display().to_string();
                    let result = ops.link(&pair.source, &pair.destination);
                    settle(&name, result, ctx.dry_run, log)?;
                }
            }
            Section::Downloads => {
                for entry in &manifest.downloads {
                    let result =
                        ops.download_with(&entry.url, Path::new(&entry.target), &entry.options());
                    settle(&entry.target, result, ctx.dry_run, log)?;
                }
            }
            Section::Commands => {
                for command in &manifest.commands {
                    let result = ops.run_command(command);
                    settle(command, result, ctx.dry_run, log)?;
                }
            }
        }
    }
    Ok(())
}

const fn section_is_empty(manifest: &Manifest, section: Section) -> bool {
    match section {
        Section::Directories => manifest.directories.is_empty(),
        Section::Symlinks => manifest.symlinks.is_empty(),
        Section::Downloads => manifest.downloads.is_empty(),
        Section::Commands => manifest.commands.is_empty(),
    }
}
