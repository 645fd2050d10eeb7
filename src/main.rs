//! Command-line entry point for the dotfiles installer.

use anyhow::Result;
use clap::Parser;

use dotfiles_installer::cli::{Cli, Command};
use dotfiles_installer::commands;
use dotfiles_installer::fileops::download::DownloadOptions;
use dotfiles_installer::logging::{self, Logger};

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = Cli::parse();

    let name = match &args.command {
        Command::Install(_) => "install",
        Command::Link { .. } => "link",
        Command::Download { .. } => "download",
        Command::EnsureDir { .. } => "ensure-dir",
        Command::Completions { shell } => {
            commands::completions::run(*shell);
            return Ok(());
        }
        Command::Version => {
            commands::version::run();
            return Ok(());
        }
    };

    logging::init_subscriber(args.verbose, name);
    let log = Logger::new(name);

    match args.command {
        Command::Install(opts) => commands::install::run(&args.global, &opts, &log),
        Command::Link {
            source,
            destination,
        } => commands::link::run(&args.global, &source, &destination, &log),
        Command::Download {
            url,
            destination,
            executable,
            sha256,
        } => {
            let options = DownloadOptions { executable, sha256 };
            commands::download::run(&args.global, &url, &destination, &options, &log)
        }
        Command::EnsureDir { path } => commands::ensure_dir::run(&args.global, &path, &log),
        Command::Completions { .. } | Command::Version => Ok(()),
    }
}
