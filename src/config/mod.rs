//! Loading the install manifest from the dotfiles repository.
pub mod manifest;
pub mod toml_loader;

use std::path::{Path, PathBuf};

pub use manifest::{DownloadEntry, LinkSpec, Manifest, SymlinkEntry};

/// Manifest location relative to the dotfiles base directory.
pub const MANIFEST_FILE: &str = "conf/install.toml";

/// Path of the manifest inside `root`.
#[must_use]
pub fn manifest_path(root: &Path) -> PathBuf {
    root.join(MANIFEST_FILE)
}
