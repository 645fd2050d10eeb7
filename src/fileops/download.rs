//! Fetch a file over HTTP and move it into place atomically.
use std::io::Write as _;
use std::path::Path;

use anyhow::{Context as _, Result, bail};
use tempfile::NamedTempFile;

use super::fs::{is_executable, make_executable};
use super::{FileOps, OpResult, Outcome};
use crate::error::FileOpsError;

/// Extra behavior for a single download.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownloadOptions {
    /// Always mark the result executable (mode `0755`).
    pub executable: bool,
    /// Expected lowercase hex SHA-256 digest of the fetched bytes.
    pub sha256: Option<String>,
}

impl FileOps<'_> {
    /// Download `url` to `destination` with default options.
    ///
    /// # Errors
    ///
    /// See [`download_with`](Self::download_with).
    pub fn download(&self, url: &str, destination: &Path) -> OpResult {
        self.download_with(url, destination, &DownloadOptions::default())
    }

    /// Download `url` to `destination`.
    ///
    /// The body is streamed into a temporary file next to the destination and
    /// renamed over it only once fully written (and verified, when a digest
    /// is configured), so a failed download never touches the destination.
    /// The result gets mode `0755` when the replaced file was executable,
    /// when the fetched file already is, or when `options.executable` is set.
    ///
    /// # Errors
    ///
    /// Returns a fatal [`FileOpsError::CreateDir`] when the parent directory
    /// cannot be created, and a recoverable [`FileOpsError::Download`] for
    /// any fetch, write, verification, or permission failure.
    pub fn download_with(
        &self,
        url: &str,
        destination: &Path,
        options: &DownloadOptions,
    ) -> OpResult {
        self.log.info(&format!("Downloading from {url}"));
        let dest = self.ctx.expand(destination);
        let filename = dest
            .file_name()
            .map_or_else(|| dest.display().to_string(), |n| n.to_string_lossy().into_owned());

        if self.simulating() {
            self.log.dry_run(&format!("Download {url} to {}", dest.display()));
            return Ok(Outcome::simulated(format!("{filename} downloaded")));
        }

        let parent = dest.parent().unwrap_or_else(|| Path::new("/"));
        std::fs::create_dir_all(parent).map_err(|source| FileOpsError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;

        let was_executable = is_executable(&dest);
        fetch_into_place(url, &dest, &filename, options, was_executable).map_err(|e| {
            FileOpsError::Download {
                url: url.to_string(),
                reason: format!("{e:#}"),
            }
        })?;

        Ok(Outcome::applied(format!("{filename} downloaded")))
    }
}

/// Fetch, verify, rename, and fix permissions.
fn fetch_into_place(
    url: &str,
    dest: &Path,
    filename: &str,
    options: &DownloadOptions,
    was_executable: bool,
) -> Result<()> {
    let parent = dest.parent().unwrap_or_else(|| Path::new("/"));
    let mut tmp = tempfile::Builder::new()
        .prefix(&format!(".{filename}."))
        .suffix(".part")
        .tempfile_in(parent)
        .with_context(|| format!("creating temporary file in {}", parent.display()))?;

    fetch(url, &mut tmp)?;

    if let Some(expected) = &options.sha256 {
        let actual = compute_sha256(tmp.path())?;
        if !actual.eq_ignore_ascii_case(expected.trim()) {
            bail!("checksum mismatch: expected {expected}, got {actual}");
        }
    }

    tmp.persist(dest)
        .map_err(|e| e.error)
        .with_context(|| format!("moving download to {}", dest.display()))?;

    if was_executable || options.executable || is_executable(dest) {
        make_executable(dest)
            .with_context(|| format!("setting permissions on {}", dest.display()))?;
    }
    Ok(())
}

/// Stream the body of `url` into `tmp`.
fn fetch(url: &str, tmp: &mut NamedTempFile) -> Result<()> {
    let response = ureq::get(url).call()?;
    let mut reader = response.into_body().into_reader();
    std::io::copy(&mut reader, tmp.as_file_mut()).context("writing response body")?;
    tmp.as_file_mut().flush().context("flushing response body")?;
    Ok(())
}

/// Compute the lowercase hex SHA-256 digest of the file at `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn compute_sha256(path: &Path) -> Result<String> {
    use sha2::{Digest, Sha256};
    use std::fmt::Write as _;

    let bytes = std::fs::read(path).context("reading download for checksum verification")?;
    let digest = Sha256::digest(&bytes);
    let mut hex = String::with_capacity(64);
    for b in &digest {
        // write! to a String is infallible; unwrap_or(()) makes that explicit.
        write!(hex, "{b:02x}").unwrap_or(());
    }
    Ok(hex)
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use std::io::{BufRead as _, BufReader, Write as _};
    use std::net::TcpListener;
    use std::path::Path;

    use super::*;
    use crate::fileops::Change;
    use crate::fileops::test_helpers::Sandbox;
    use crate::logging::RecordingLog;

    /// Serve exactly one HTTP response on a random local port and return
    /// the base URL.
    fn serve_once(status: &'static str, body: &'static [u8]) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        std::thread::spawn(move || {
            let Ok((stream, _)) = listener.accept() else {
                return;
            };
            let mut reader = BufReader::new(stream.try_clone().unwrap());
            let mut line = String::new();
            while reader.read_line(&mut line).is_ok_and(|n| n > 0) && line != "\r\n" {
                line.clear();
            }
            let mut stream = stream;
            write!(
                stream,
                "HTTP/1.1 {status}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                body.len()
            )
            .unwrap();
            stream.write_all(body).unwrap();
        });
        format!("http://{addr}")
    }

    /// A URL nothing listens on.
    fn unreachable_url() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{addr}/tool")
    }

    #[test]
    fn downloads_bytes_to_destination() {
        let sb = Sandbox::new();
        let ctx = sb.context(false);
        let log = RecordingLog::new();
        let url = serve_once("200 OK", b"#!/bin/sh\necho hi\n");

        let outcome = FileOps::new(&ctx, &log)
            .download(&format!("{url}/hi.sh"), Path::new("~/.local/bin/hi"))
            .unwrap();

        assert_eq!(outcome.change, Change::Applied);
        assert_eq!(outcome.message, "hi downloaded");
        let dest = sb.home().join(".local/bin/hi");
        assert_eq!(std::fs::read(&dest).unwrap(), b"#!/bin/sh\necho hi\n");
        let leftovers: Vec<_> = std::fs::read_dir(dest.parent().unwrap()).unwrap().collect();
        assert_eq!(leftovers.len(), 1, "temporary file should be gone");
    }

    #[cfg(unix)]
    #[test]
    fn replacing_executable_keeps_it_executable() {
        use std::os::unix::fs::PermissionsExt as _;
        let sb = Sandbox::new();
        let ctx = sb.context(false);
        let log = RecordingLog::new();
        let dest = sb.home().join("bin/tool");
        std::fs::create_dir_all(dest.parent().unwrap()).unwrap();
        std::fs::write(&dest, b"old").unwrap();
        std::fs::set_permissions(&dest, std::fs::Permissions::from_mode(0o700)).unwrap();
        let url = serve_once("200 OK", b"new");

        FileOps::new(&ctx, &log).download(&url, &dest).unwrap();

        assert_eq!(std::fs::read(&dest).unwrap(), b"new");
        let mode = std::fs::metadata(&dest).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
    }

    #[cfg(unix)]
    #[test]
    fn executable_option_sets_mode() {
        let sb = Sandbox::new();
        let ctx = sb.context(false);
        let log = RecordingLog::new();
        let url = serve_once("200 OK", b"bin");
        let options = DownloadOptions {
            executable: true,
            sha256: None,
        };

        FileOps::new(&ctx, &log)
            .download_with(&url, Path::new("~/bin/fresh"), &options)
            .unwrap();

        assert!(is_executable(&sb.home().join("bin/fresh")));
    }

    #[test]
    fn unreachable_url_is_recoverable_and_leaves_destination() {
        let sb = Sandbox::new();
        let ctx = sb.context(false);
        let log = RecordingLog::new();
        let dest = sb.home().join("keep.txt");
        std::fs::write(&dest, b"untouched").unwrap();

        let err = FileOps::new(&ctx, &log)
            .download(&unreachable_url(), &dest)
            .unwrap_err();

        assert!(matches!(err, FileOpsError::Download { .. }));
        assert!(!err.is_fatal());
        assert_eq!(std::fs::read(&dest).unwrap(), b"untouched");
    }

    #[test]
    fn http_error_status_is_a_download_failure() {
        let sb = Sandbox::new();
        let ctx = sb.context(false);
        let log = RecordingLog::new();
        let url = serve_once("404 Not Found", b"nope");
        let dest = sb.home().join("missing");

        let err = FileOps::new(&ctx, &log).download(&url, &dest).unwrap_err();

        assert!(matches!(err, FileOpsError::Download { .. }));
        assert!(!dest.exists());
    }

    #[test]
    fn checksum_mismatch_leaves_destination() {
        let sb = Sandbox::new();
        let ctx = sb.context(false);
        let log = RecordingLog::new();
        let url = serve_once("200 OK", b"tampered");
        let dest = sb.home().join("verified");
        let options = DownloadOptions {
            executable: false,
            sha256: Some("00".repeat(32)),
        };

        let err = FileOps::new(&ctx, &log)
            .download_with(&url, &dest, &options)
            .unwrap_err();

        assert!(err.to_string().contains("checksum mismatch"), "{err}");
        assert!(!dest.exists());
    }

    #[test]
    fn checksum_match_is_accepted() {
        let sb = Sandbox::new();
        let ctx = sb.context(false);
        let log = RecordingLog::new();
        let url = serve_once("200 OK", b"abc");
        let options = DownloadOptions {
            executable: false,
            sha256: Some(
                "BA7816BF8F01CFEA414140DE5DAE2223B00361A396177A9CB410FF61F20015AD".to_string(),
            ),
        };

        FileOps::new(&ctx, &log)
            .download_with(&url, Path::new("~/abc"), &options)
            .unwrap();

        assert_eq!(std::fs::read(sb.home().join("abc")).unwrap(), b"abc");
    }

    #[test]
    fn simulation_fetches_nothing() {
        let sb = Sandbox::new();
        let ctx = sb.context(true);
        let log = RecordingLog::new();

        let outcome = FileOps::new(&ctx, &log)
            .download(&unreachable_url(), Path::new("~/.local/bin/tool"))
            .unwrap();

        assert_eq!(outcome.change, Change::Simulated);
        assert!(!sb.home().join(".local").exists());
        assert_eq!(log.messages("dry_run").len(), 1);
    }

    #[test]
    fn compute_sha256_of_known_input() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("abc");
        std::fs::write(&file, b"abc").unwrap();
        assert_eq!(
            compute_sha256(&file).unwrap(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
