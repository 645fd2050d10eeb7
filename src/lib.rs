//! Dotfiles installer.
//!
//! Links files from a dotfiles repository into the home directory, backing
//! up anything already in the way, and fetches or creates the remaining
//! pieces: directories, downloaded tools, and setup commands. Everything is
//! driven by `conf/install.toml` and can be previewed with `--dry-run`.
//!
//! The public API is organised into four layers:
//!
//! - **[`config`]**: parse the install manifest
//! - **[`fileops`]**: the individual file operations (`link`, `backup`, `download`, …)
//! - **[`context`]**: run-wide settings shared by every operation
//! - **[`commands`]**: top-level subcommand orchestration
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod exec;
pub mod fileops;
pub mod logging;
