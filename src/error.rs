// ABOUTME: Application-wide error types for stackdeploy.
// ABOUTME: Uses thiserror for ergonomic error handling and maps errors to exit codes.

use std::path::PathBuf;
use thiserror::Error;

use crate::compose::OrchestrationError;
use crate::engine::EnvironmentError;
use crate::vcs::SourceError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("unknown service target: {0} (expected `server` or `analyzer`)")]
    UnknownTarget(String),

    #[error("service `{service}` is not defined in {}", .compose_file.display())]
    UndefinedService {
        service: String,
        compose_file: PathBuf,
    },

    #[error(transparent)]
    Environment(#[from] EnvironmentError),

    #[error(transparent)]
    Orchestration(#[from] OrchestrationError),

    #[error("source update failed: {0}")]
    SourceUpdate(#[from] SourceError),

    #[error("invalid compose file {}: {source}", .path.display())]
    ComposeFile {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Process exit code for this error.
    ///
    /// Orchestrator failures surface the orchestrator's own exit code so
    /// callers see the same status they would get running it directly.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Orchestration(e) => e.exit_code().filter(|c| *c != 0).unwrap_or(1),
            _ => 1,
        }
    }

    /// Whether usage text should accompany this error.
    pub fn is_usage(&self) -> bool {
        matches!(self, Error::UnknownCommand(_) | Error::UnknownTarget(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
