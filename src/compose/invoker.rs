// ABOUTME: Orchestrator trait and the subprocess-backed compose invoker.
// ABOUTME: Every call runs `<compose command> -f <compose file> <args>` and propagates failures.

use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;

use super::context::ComposeContext;

/// Errors from orchestrator calls.
#[derive(Debug, thiserror::Error)]
pub enum OrchestrationError {
    #[error("failed to run `{program}`: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("`{command}` exited with {}", describe_code(.code))]
    Failed { command: String, code: Option<i32> },
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "a signal".to_string(),
    }
}

impl OrchestrationError {
    /// Exit code reported by the orchestrator, if it ran and exited normally.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            OrchestrationError::Failed { code, .. } => *code,
            _ => None,
        }
    }
}

/// Calls into a compose-compatible orchestrator.
#[async_trait]
pub trait Orchestrator: Send + Sync {
    /// Run with the caller's stdout/stderr so output streams live.
    async fn run(&self, args: &[String]) -> Result<(), OrchestrationError>;

    /// Run and capture stdout.
    async fn capture(&self, args: &[String]) -> Result<String, OrchestrationError>;
}

/// [`Orchestrator`] that spawns the resolved compose command.
#[derive(Debug, Clone)]
pub struct ComposeInvoker {
    context: ComposeContext,
}

impl ComposeInvoker {
    pub fn new(context: ComposeContext) -> Self {
        Self { context }
    }

    fn command(&self, args: &[String]) -> Command {
        let program = self.context.command().program();
        let mut cmd = Command::new(program);
        cmd.args(self.context.args(args));
        if let Some(dir) = self.context.working_dir() {
            cmd.current_dir(dir);
        }
        cmd
    }

    fn spawn_error(&self, source: std::io::Error) -> OrchestrationError {
        OrchestrationError::Spawn {
            program: self.context.command().to_string(),
            source,
        }
    }
}

#[async_trait]
impl Orchestrator for ComposeInvoker {
    async fn run(&self, args: &[String]) -> Result<(), OrchestrationError> {
        tracing::debug!("running {}", self.context.display_command(args));

        let status = self
            .command(args)
            .status()
            .await
            .map_err(|e| self.spawn_error(e))?;

        if status.success() {
            Ok(())
        } else {
            Err(OrchestrationError::Failed {
                command: self.context.display_command(args),
                code: status.code(),
            })
        }
    }

    async fn capture(&self, args: &[String]) -> Result<String, OrchestrationError> {
        tracing::debug!("capturing {}", self.context.display_command(args));

        let output = self
            .command(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| self.spawn_error(e))?;

        if !output.status.success() {
            tracing::debug!(
                "{} failed: {}",
                self.context.display_command(args),
                String::from_utf8_lossy(&output.stderr).trim()
            );
            return Err(OrchestrationError::Failed {
                command: self.context.display_command(args),
                code: output.status.code(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
