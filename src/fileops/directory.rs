//! Ensure a directory exists.
use std::path::Path;

use super::{FileOps, OpResult, Outcome};
use crate::error::FileOpsError;

impl FileOps<'_> {
    /// Create `path` (after `~` expansion) and its parents unless it is
    /// already a directory.
    ///
    /// # Errors
    ///
    /// Returns a fatal [`FileOpsError::CreateDir`] if creation fails, for
    /// instance when a regular file occupies the path.
    pub fn ensure_directory(&self, path: &Path) -> OpResult {
        let path = self.ctx.expand(path);
        if path.is_dir() {
            return Ok(Outcome::already_correct(format!(
                "Directory {} exists",
                path.display()
            )));
        }

        self.log.info(&format!("Creating directory {}", path.display()));
        if self.simulating() {
            self.log.dry_run(&format!("mkdir -p {}", path.display()));
        } else {
            std::fs::create_dir_all(&path).map_err(|source| FileOpsError::CreateDir {
                path: path.clone(),
                source,
            })?;
        }

        Ok(Outcome::done(
            self.simulating(),
            format!("Directory {} created", path.display()),
        ))
    }
}
