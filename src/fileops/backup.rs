//! Move a conflicting file out of the way before it is replaced.
use std::path::Path;

use super::fs::{move_path, unique_child};
use super::{FileOps, OpResult, Outcome};
use crate::error::FileOpsError;

impl FileOps<'_> {
    /// Move the file or directory at `path` into this run's backup directory
    /// (`<backup_root>/<timestamp>/`), keeping its basename.
    ///
    /// The backup directory is created if needed. If an earlier backup of
    /// the same run already took the basename, a numeric suffix is added.
    /// Backing up the same path twice fails the second time because the
    /// source is gone.
    ///
    /// # Errors
    ///
    /// Returns a fatal [`FileOpsError::Backup`] if the directory cannot be
    /// created or the move fails.
    pub fn backup(&self, path: &Path) -> OpResult {
        let path = &self.ctx.expand(path);
        let backup_dir = self.ctx.backup_dir();
        self.log.info(&format!("Backing up {}", path.display()));

        let done = format!("{} backed up to {}", path.display(), backup_dir.display());

        if self.simulating() {
            self.log.dry_run(&format!("mkdir -p {}", backup_dir.display()));
            self.log.dry_run(&format!("mv {} {}", path.display(), backup_dir.display()));
            return Ok(Outcome::simulated(done));
        }

        let fail = |source| FileOpsError::Backup {
            path: path.to_path_buf(),
            backup_dir: backup_dir.clone(),
            source,
        };

        std::fs::create_dir_all(&backup_dir).map_err(fail)?;

        let name = path.file_name().ok_or_else(|| {
            fail(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "path has no file name",
            ))
        })?;
        let target = unique_child(&backup_dir, name);
        self.log.debug(&format!("mv {} {}", path.display(), target.display()));
        move_path(path, &target).map_err(fail)?;

        Ok(Outcome::applied(done))
    }
}
