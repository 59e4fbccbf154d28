use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, error};

use super::bounded;
use crate::util::errors::{Error, Result, StdError};

/// Runs an external program and captures its standard output.
///
/// A non-zero exit status is an error.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, program: &str, args: &[String]) -> Result<Vec<u8>>;
}

/// [`CommandRunner`] that spawns real processes.
#[derive(Clone, Debug, Default)]
pub struct ProcessRunner {
    timeout: Option<Duration>,
}

impl ProcessRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }
}

pub fn render_command(program: &str, args: &[String]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(&self, program: &str, args: &[String]) -> Result<Vec<u8>> {
        let command_line = render_command(program, args);
        debug!(command = %command_line, "Running command");

        // The child is killed if the timeout drops the future.
        let output = bounded(self.timeout, &command_line, async {
            Command::new(program)
                .args(args)
                .kill_on_drop(true)
                .output()
                .await
                .map_err(|e| {
                    Error::StdError(StdError::CommandError(format!(
                        "failed to execute `{}`: {}",
                        command_line, e
                    )))
                })
        })
        .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            error!(command = %command_line, status = %output.status, "Command failed");
            return Err(Error::StdError(StdError::CommandError(format!(
                "`{}` failed with {}: {}",
                command_line,
                output.status,
                stderr.trim()
            ))));
        }

        Ok(output.stdout)
    }
}
