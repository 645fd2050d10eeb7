//! The install manifest: what to create, link, download, and run.
use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::toml_loader;
use crate::context::Context;
use crate::error::ConfigError;
use crate::fileops::download::DownloadOptions;

/// A symlink entry: a plain source path, or a `{ source, target }` pair
/// for an explicit target.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum SymlinkEntry {
    /// Plain string: `"zshrc"` links `~/.zshrc` to `<base>/zshrc`.
    Simple(String),
    /// Structured: `{ source = "nvim", target = "~/.config/nvim" }`.
    WithTarget {
        /// Path relative to the dotfiles base directory.
        source: String,
        /// Where the link is created; may start with `~`. Defaults to
        /// `~/.<source>`.
        #[serde(default)]
        target: Option<String>,
    },
}

/// A file to fetch.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DownloadEntry {
    /// URL to fetch.
    pub url: String,
    /// Destination path; may start with `~`.
    pub target: String,
    /// Always mark the downloaded file executable.
    #[serde(default)]
    pub executable: bool,
    /// Expected SHA-256 hex digest of the downloaded bytes.
    #[serde(default)]
    pub sha256: Option<String>,
}

/// Contents of `conf/install.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Manifest {
    /// Directories to ensure, in order.
    pub directories: Vec<String>,
    /// Dotfiles to symlink, in order.
    pub symlinks: Vec<SymlinkEntry>,
    /// Files to download, in order.
    pub downloads: Vec<DownloadEntry>,
    /// Shell commands to run last, in order.
    pub commands: Vec<String>,
}

/// A resolved (source, destination) pair for
/// [`FileOps::link`](crate::fileops::FileOps::link).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkSpec {
    /// Absolute path of the dotfile under the base directory.
    pub source: PathBuf,
    /// Absolute path where the link goes.
    pub destination: PathBuf,
}

impl SymlinkEntry {
    /// Resolve against the run context.
    ///
    /// A plain entry targets `~/.<source>`.
    #[must_use]
    pub fn resolve(&self, ctx: &Context) -> LinkSpec {
        let (source, target) = match self {
            Self::Simple(source)
            | Self::WithTarget {
                source,
                target: None,
            } => (source.as_str(), format!("~/.{source}")),
            Self::WithTarget {
                source,
                target: Some(target),
            } => (source.as_str(), target.clone()),
        };
        LinkSpec {
            source: ctx.base.join(source),
            destination: ctx.expand(Path::new(&target)),
        }
    }
}

impl DownloadEntry {
    /// Per-download options taken from this entry.
    #[must_use]
    pub fn options(&self) -> DownloadOptions {
        DownloadOptions {
            executable: self.executable,
            sha256: self.sha256.clone(),
        }
    }
}

impl Manifest {
    /// Load the manifest at `path`; a missing file is an empty manifest.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        toml_loader::load_config(path)
    }

    /// Total number of configured items.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.directories.len() + self.symlinks.len() + self.downloads.len() + self.commands.len()
    }

    /// Whether nothing is configured.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
