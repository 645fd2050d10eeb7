//! Command-line interface definitions.
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Top-level CLI entry point for the dotfiles installer.
#[derive(Parser, Debug)]
#[command(
    name = "dotfiles",
    about = "Link, back up, and fetch dotfiles into the home directory",
    version
)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Options shared by every subcommand.
    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOpts {
    /// Preview changes without applying
    #[arg(short = 'd', long, global = true)]
    pub dry_run: bool,

    /// Override dotfiles root directory
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Apply every item from conf/install.toml
    Install(InstallOpts),
    /// Symlink a single file into place
    Link {
        /// File inside the dotfiles directory
        source: PathBuf,
        /// Where the link is created
        destination: PathBuf,
    },
    /// Download a single file
    Download {
        /// URL to fetch
        url: String,
        /// Destination path
        destination: PathBuf,
        /// Mark the file executable
        #[arg(short = 'x', long)]
        executable: bool,
        /// Expected SHA-256 digest of the file
        #[arg(long)]
        sha256: Option<String>,
    },
    /// Create a directory if it is missing
    EnsureDir {
        /// Directory to create
        path: PathBuf,
    },
    /// Print shell completions to stdout
    Completions {
        /// Target shell
        shell: clap_complete::Shell,
    },
    /// Print version information
    Version,
}

/// Sections of the install manifest, in execution order.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    /// Ensure directories exist.
    Directories,
    /// Link dotfiles.
    Symlinks,
    /// Fetch files.
    Downloads,
    /// Run shell commands.
    Commands,
}

impl Section {
    /// Every section, in the order `install` runs them.
    pub const ALL: [Self; 4] = [
        Self::Directories,
        Self::Symlinks,
        Self::Downloads,
        Self::Commands,
    ];

    /// Header printed before the section runs.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Directories => "Directories",
            Self::Symlinks => "Symlinks",
            Self::Downloads => "Downloads",
            Self::Commands => "Commands",
        }
    }
}

/// Options for the `install` subcommand.
#[derive(Parser, Debug, Clone, Default)]
pub struct InstallOpts {
    /// Skip specific sections
    #[arg(long, value_delimiter = ',', value_enum)]
    pub skip: Vec<Section>,

    /// Run only specific sections
    #[arg(long, value_delimiter = ',', value_enum)]
    pub only: Vec<Section>,
}

impl InstallOpts {
    /// Whether `section` should run under `--only` and `--skip`.
    ///
    /// `--only` wins when both are given.
    #[must_use]
    pub fn includes(&self, section: Section) -> bool {
        if !self.only.is_empty() {
            return self.only.contains(&section);
        }
        !self.skip.contains(&section)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_install_dry_run() {
        let cli = Cli::parse_from(["dotfiles", "--dry-run", "install"]);
        assert!(cli.global.dry_run);
        assert!(matches!(cli.command, Command::Install(_)));
    }

    #[test]
    fn parse_install_dry_run_short() {
        let cli = Cli::parse_from(["dotfiles", "-d", "install"]);
        assert!(cli.global.dry_run);
    }

    #[test]
    fn parse_install_skip_sections() {
        let cli = Cli::parse_from(["dotfiles", "install", "--skip", "downloads,commands"]);
        assert!(
            matches!(&cli.command, Command::Install(_)),
            "Expected Install command"
        );
        if let Command::Install(opts) = cli.command {
            assert_eq!(opts.skip, vec![Section::Downloads, Section::Commands]);
        }
    }

    #[test]
    fn parse_install_only_sections() {
        let cli = Cli::parse_from(["dotfiles", "install", "--only", "symlinks"]);
        assert!(
            matches!(&cli.command, Command::Install(_)),
            "Expected Install command"
        );
        if let Command::Install(opts) = cli.command {
            assert_eq!(opts.only, vec![Section::Symlinks]);
        }
    }

    #[test]
    fn unknown_section_is_rejected() {
        let result = Cli::try_parse_from(["dotfiles", "install", "--only", "packages"]);
        assert!(result.is_err());
    }

    #[test]
    fn parse_link() {
        let cli = Cli::parse_from(["dotfiles", "link", "zshrc", "/home/me/.zshrc"]);
        assert!(matches!(
            cli.command,
            Command::Link { ref source, ref destination }
                if source == &PathBuf::from("zshrc")
                    && destination == &PathBuf::from("/home/me/.zshrc")
        ));
    }

    #[test]
    fn parse_download_with_options() {
        let cli = Cli::parse_from([
            "dotfiles",
            "download",
            "-x",
            "--sha256",
            "abc",
            "https://example.com/tool",
            "~/bin/tool",
        ]);
        assert!(
            matches!(&cli.command, Command::Download { .. }),
            "Expected Download command"
        );
        if let Command::Download {
            url,
            executable,
            sha256,
            ..
        } = cli.command
        {
            assert_eq!(url, "https://example.com/tool");
            assert!(executable);
            assert_eq!(sha256.as_deref(), Some("abc"));
        }
    }

    #[test]
    fn parse_ensure_dir() {
        let cli = Cli::parse_from(["dotfiles", "ensure-dir", "~/.cache/zsh"]);
        assert!(matches!(cli.command, Command::EnsureDir { .. }));
    }

    #[test]
    fn parse_completions() {
        let cli = Cli::parse_from(["dotfiles", "completions", "bash"]);
        assert!(matches!(
            cli.command,
            Command::Completions {
                shell: clap_complete::Shell::Bash
            }
        ));
    }

    #[test]
    fn parse_version() {
        let cli = Cli::parse_from(["dotfiles", "version"]);
        assert!(matches!(cli.command, Command::Version));
    }

    #[test]
    fn parse_verbose() {
        let cli = Cli::parse_from(["dotfiles", "-v", "install"]);
        assert!(cli.verbose);
    }

    #[test]
    fn parse_root_override() {
        let cli = Cli::parse_from(["dotfiles", "--root", "/tmp/dotfiles", "install"]);
        assert_eq!(cli.global.root, Some(PathBuf::from("/tmp/dotfiles")));
    }

    // ------------------------------------------------------------------
    // Section filtering
    // ------------------------------------------------------------------

    #[test]
    fn includes_everything_by_default() {
        let opts = InstallOpts::default();
        assert!(Section::ALL.iter().all(|s| opts.includes(*s)));
    }

    #[test]
    fn skip_excludes_section() {
        let opts = InstallOpts {
            skip: vec![Section::Downloads],
            only: vec![],
        };
        assert!(opts.includes(Section::Symlinks));
        assert!(!opts.includes(Section::Downloads));
    }

    #[test]
    fn only_takes_precedence_over_skip() {
        let opts = InstallOpts {
            skip: vec![Section::Symlinks],
            only: vec![Section::Symlinks],
        };
        assert!(opts.includes(Section::Symlinks));
        assert!(!opts.includes(Section::Directories));
    }
}
