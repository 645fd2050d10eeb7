//! Command: print version information.

/// Version string: `DOTFILES_VERSION` from the build, else the crate version.
#[must_use]
pub fn string() -> &'static str {
    option_env!("DOTFILES_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
}

/// Print the dotfiles version to stdout.
pub fn run() {
    println!("dotfiles {}", string());
}
