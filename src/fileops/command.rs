//! Run a configured shell command.
use super::{FileOps, OpResult, Outcome};
use crate::error::FileOpsError;
use crate::exec;

impl FileOps<'_> {
    /// Run `command` through the shell, inheriting stdio.
    ///
    /// # Errors
    ///
    /// Returns a recoverable [`FileOpsError::Command`] if the shell cannot
    /// be started or the command exits unsuccessfully.
    pub fn run_command(&self, command: &str) -> OpResult {
        if self.simulating() {
            self.log.dry_run(command);
            return Ok(Outcome::simulated(format!("'{command}' executed")));
        }

        self.log.info(&format!("Executing '{command}'"));
        let fail = |reason: String| FileOpsError::Command {
            command: command.to_string(),
            reason,
        };
        let status = exec::run_shell(command).map_err(|e| fail(format!("{e:#}")))?;
        if !status.success() {
            return Err(fail(exec::describe_status(status)));
        }
        Ok(Outcome::applied(format!("'{command}' executed")))
    }
}
