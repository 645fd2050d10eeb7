//! Symlink a dotfile into place, backing up whatever was there.
use std::path::Path;

use super::fs::symlink;
use super::{Change, FileOps, OpResult, Outcome};
use crate::error::FileOpsError;

impl FileOps<'_> {
    /// Create a symlink at `destination` pointing to `source`.
    ///
    /// - An existing symlink at `destination` (even a dangling one, or one
    ///   pointing elsewhere) is left alone and reported as already linked.
    /// - Any other existing entry is moved aside with [`backup`](Self::backup)
    ///   first.
    /// - Missing parent directories of `destination` are created.
    ///
    /// # Errors
    ///
    /// All failures are fatal: [`FileOpsError::Backup`] when the conflicting
    /// entry cannot be moved, [`FileOpsError::CreateDir`] when the parent
    /// cannot be created, and [`FileOpsError::Link`] when the symlink call
    /// fails.
    pub fn link(&self, source: &Path, destination: &Path) -> OpResult {
        let name = self.ctx.display_source(source);
        self.log.info(&format!("Linking {name} to {}", destination.display()));

        if let Ok(meta) = destination.symlink_metadata() {
            if meta.is_symlink() {
                if let Ok(current) = std::fs::read_link(destination)
                    && current != source
                {
                    self.log.warn(&format!(
                        "{} points to {}, leaving it",
                        destination.display(),
                        current.display()
                    ));
                }
                return Ok(Outcome::already_correct(format!("{name} already linked")));
            }

            self.log.warn(&format!("{} already exists", destination.display()));
            let backed_up = self.backup(destination)?;
            if backed_up.change == Change::Applied {
                self.log.success(&backed_up.message);
            }
        }

        let parent = destination.parent().filter(|p| !p.as_os_str().is_empty());
        let done = format!("{name} → {} linked", destination.display());

        if self.simulating() {
            if let Some(parent) = parent {
                self.log.dry_run(&format!("mkdir -p {}", parent.display()));
            }
            self.log.dry_run(&format!("ln -s {} {}", source.display(), destination.display()));
            return Ok(Outcome::simulated(done));
        }

        if let Some(parent) = parent {
            std::fs::create_dir_all(parent).map_err(|source| FileOpsError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        symlink(source, destination).map_err(|e| FileOpsError::Link {
            source_path: source.to_path_buf(),
            destination: destination.to_path_buf(),
            source: e,
        })?;

        Ok(Outcome::applied(done))
    }
}
