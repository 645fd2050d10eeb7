// Shared helpers for integration tests.
//
// Provides a temporary-directory-backed home with a dotfiles repository
// inside it, a fluent builder so each test can describe its starting state,
// and a one-shot local HTTP server for download tests.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::path::{Path, PathBuf};

use dotfiles_installer::config::{self, Manifest};
use dotfiles_installer::context::Context;

/// Fixed run timestamp so backup paths are predictable.
pub const TIMESTAMP: &str = "20240102030405";

/// An isolated home directory backed by a [`tempfile::TempDir`].
///
/// Layout: `<tmp>/home` is the home directory and `<tmp>/home/dotfiles` the
/// repository. Everything is deleted when the context is dropped.
pub struct IntegrationTestContext {
    /// Temporary directory holding the home directory.
    pub dir: tempfile::TempDir,
}

impl IntegrationTestContext {
    /// Create a new context with an empty repository.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        std::fs::create_dir_all(dir.path().join("home/dotfiles/conf")).expect("create conf dir");
        Self { dir }
    }

    /// The simulated home directory.
    pub fn home(&self) -> PathBuf {
        self.dir.path().join("home")
    }

    /// The dotfiles repository root.
    pub fn base(&self) -> PathBuf {
        self.home().join("dotfiles")
    }

    /// A run context rooted at this repository.
    pub fn context(&self, dry_run: bool) -> Context {
        Context::with_timestamp(self.base(), self.home(), dry_run, TIMESTAMP)
    }

    /// This run's backup directory.
    pub fn backup_dir(&self) -> PathBuf {
        self.context(false).backup_dir()
    }

    /// Load `conf/install.toml` from the repository.
    pub fn manifest(&self) -> Manifest {
        Manifest::load(&config::manifest_path(&self.base())).expect("load manifest")
    }

    /// Read a file relative to the home directory.
    pub fn read_home(&self, rel: &str) -> String {
        std::fs::read_to_string(self.home().join(rel)).expect("read home file")
    }
}

/// Fluent builder for [`IntegrationTestContext`].
pub struct TestContextBuilder {
    ctx: IntegrationTestContext,
}

impl TestContextBuilder {
    /// Begin building a new context with an empty repository.
    pub fn new() -> Self {
        Self {
            ctx: IntegrationTestContext::new(),
        }
    }

    /// Continue building on top of an existing context.
    pub const fn from_context(ctx: IntegrationTestContext) -> Self {
        Self { ctx }
    }

    /// Write `content` to `conf/install.toml`.
    pub fn with_manifest(self, content: &str) -> Self {
        let path = config::manifest_path(&self.ctx.base());
        std::fs::write(path, content).expect("write manifest");
        self
    }

    /// Create a source file inside the repository.
    pub fn with_source(self, rel: &str, content: &str) -> Self {
        write_file(&self.ctx.base().join(rel), content);
        self
    }

    /// Create a pre-existing file in the home directory.
    pub fn with_home_file(self, rel: &str, content: &str) -> Self {
        write_file(&self.ctx.home().join(rel), content);
        self
    }

    /// Finish building and return the configured context.
    pub fn build(self) -> IntegrationTestContext {
        self.ctx
    }
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create parent dir");
    }
    std::fs::write(path, content).expect("write file");
}

/// Serve a single HTTP response on a local port and return the base URL.
pub fn serve_once(status: &'static str, body: &'static [u8]) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    std::thread::spawn(move || {
        let Ok((stream, _)) = listener.accept() else {
            return;
        };
        let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));
        let mut line = String::new();
        while reader.read_line(&mut line).is_ok_and(|n| n > 0) && line != "\r\n" {
            line.clear();
        }
        let mut stream = stream;
        let _ = write!(
            stream,
            "HTTP/1.1 {status}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            body.len()
        );
        let _ = stream.write_all(body);
    });
    format!("http://{addr}")
}

/// A URL nothing listens on.
pub fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{addr}/tool")
}
