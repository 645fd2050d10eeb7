//! Running shell command lines.
use anyhow::{Context, Result};
use std::process::{Command, ExitStatus};

/// Build a [`Command`] that runs `line` through the platform shell.
fn shell(line: &str) -> Command {
    #[cfg(windows)]
    {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", line]);
        cmd
    }

    #[cfg(not(windows))]
    {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", line]);
        cmd
    }
}

/// Run `line` through the shell with inherited stdio and wait for it.
///
/// A non-zero exit is not an error here; callers inspect the returned
/// status.
///
/// # Errors
///
/// Returns an error if the shell cannot be spawned.
pub fn run_shell(line: &str) -> Result<ExitStatus> {
    shell(line)
        .status()
        .with_context(|| format!("failed to execute: {line}"))
}

/// Describe an exit status for humans (`"exit code 3"`, `"terminated by signal"`).
#[must_use]
pub fn describe_status(status: ExitStatus) -> String {
    status.code().map_or_else(
        || "terminated by signal".to_string(),
        |code| format!("exit code {code}"),
    )
}
