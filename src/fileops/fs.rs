//! File-system helpers shared by the file operations.
use std::ffi::OsString;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Resolve `path` to an absolute path, expanding a leading `~` component to
/// `home`. Relative paths are resolved against the current directory, and
/// `.` and `..` are collapsed without touching the filesystem.
#[must_use]
pub fn expand_path(path: &Path, home: &Path) -> PathBuf {
    let expanded = match path.strip_prefix("~") {
        Ok(rest) if rest.as_os_str().is_empty() => home.to_path_buf(),
        Ok(rest) => home.join(rest),
        Err(_) => path.to_path_buf(),
    };
    let absolute = std::path::absolute(&expanded).unwrap_or(expanded);
    normalize(&absolute)
}

/// Lexically drop `.` components and resolve `..` against the preceding
/// component. `..` at the root stays at the root.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Whether anything (including a dangling symlink) exists at `path`.
#[must_use]
pub fn entry_exists(path: &Path) -> bool {
    path.symlink_metadata().is_ok()
}

/// Pick a name for `file_name` inside `dir` that does not exist yet.
///
/// Returns `dir/file_name` when free, otherwise `dir/file_name.1`,
/// `dir/file_name.2`, and so on.
#[must_use]
pub fn unique_child(dir: &Path, file_name: &std::ffi::OsStr) -> PathBuf {
    let candidate = dir.join(file_name);
    if !entry_exists(&candidate) {
        return candidate;
    }
    (1u32..)
        .map(|n| {
            let mut name = OsString::from(file_name);
            name.push(format!(".{n}"));
            dir.join(name)
        })
        .find(|p| !entry_exists(p))
        .unwrap_or(candidate)
}

/// Move `from` to `to`, falling back to copy + remove when the rename would
/// cross a filesystem boundary.
///
/// # Errors
///
/// Returns an error if neither the rename nor the fallback succeeds.
pub fn move_path(from: &Path, to: &Path) -> io::Result<()> {
    match std::fs::rename(from, to) {
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
            copy_entry(from, to)?;
            remove_entry(from)
        }
        other => other,
    }
}

/// Copy a file, directory tree, or symlink (as a link) from `src` to `dst`.
fn copy_entry(src: &Path, dst: &Path) -> io::Result<()> {
    let meta = src.symlink_metadata()?;
    if meta.is_symlink() {
        symlink(&std::fs::read_link(src)?, dst)
    } else if meta.is_dir() {
        copy_dir_recursive(src, dst)
    } else {
        std::fs::copy(src, dst).map(|_| ())
    }
}

/// Remove a file, symlink, or directory tree.
fn remove_entry(path: &Path) -> io::Result<()> {
    let meta = path.symlink_metadata()?;
    if meta.is_dir() {
        std::fs::remove_dir_all(path)
    } else {
        std::fs::remove_file(path)
    }
}

/// Recursively copy a directory tree.
///
/// Symlinks within the source tree are copied as links so a backup keeps
/// the exact shape of what was moved aside.
///
/// # Errors
///
/// Returns an error if the destination directory cannot be created, a source
/// entry cannot be read, or a file cannot be copied.
pub fn copy_dir_recursive(src: &Path, dst: &Path) -> io::Result<()> {
    std::fs::create_dir_all(dst)?;
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        copy_entry(&entry.path(), &dst.join(entry.file_name()))?;
    }
    Ok(())
}

/// Create a symlink at `link` pointing to `target`.
///
/// # Errors
///
/// Returns an error if the link cannot be created.
pub fn symlink(target: &Path, link: &Path) -> io::Result<()> {
    #[cfg(unix)]
    {
        std::os::unix::fs::symlink(target, link)
    }

    #[cfg(windows)]
    {
        if target.is_dir() {
            std::os::windows::fs::symlink_dir(target, link)
        } else {
            std::os::windows::fs::symlink_file(target, link)
        }
    }
}

/// Whether any execute bit is set on the file at `path`.
#[must_use]
pub fn is_executable(path: &Path) -> bool {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt as _;
        std::fs::metadata(path).is_ok_and(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
    }

    #[cfg(not(unix))]
    {
        let _ = path;
        false
    }
}

/// Set mode `0755` on `path`.
///
/// # Errors
///
/// Returns an error if the permissions cannot be changed.
pub fn make_executable(path: &Path) -> io::Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt as _;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
    }

    #[cfg(not(unix))]
    {
        let _ = path;
        Ok(())
    }
}
