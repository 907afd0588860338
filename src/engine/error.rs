// ABOUTME: Environment error types with SNAFU pattern.
// ABOUTME: Unifies engine reachability and compose discovery failures for programmatic handling.

use snafu::Snafu;

/// Failure talking to the container engine daemon.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(
        "no container engine found (checked DOCKER_HOST, Docker and Podman sockets, and `docker info`)"
    )]
    NoSocket,

    #[error("connection failed: {0}")]
    ConnectionFailed(String),
}

/// Fatal environment problems detected before any orchestration call.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum EnvironmentError {
    #[snafu(display("container engine is not running or not reachable: {source}"))]
    EngineUnavailable { source: EngineError },

    #[snafu(display(
        "neither `docker compose` nor `docker-compose` is available; install Docker Compose: https://docs.docker.com/compose/install/"
    ))]
    OrchestratorMissing,
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvironmentErrorKind {
    /// No engine socket exists on this host.
    NoEngine,
    /// A socket exists but the daemon did not answer.
    EngineUnreachable,
    /// No compose command form responded.
    OrchestratorMissing,
}

impl EnvironmentError {
    /// Returns the error kind for programmatic handling.
    pub fn kind(&self) -> EnvironmentErrorKind {
        match self {
            EnvironmentError::EngineUnavailable { source } => match source {
                EngineError::NoSocket => EnvironmentErrorKind::NoEngine,
                EngineError::ConnectionFailed(_) => EnvironmentErrorKind::EngineUnreachable,
            },
            EnvironmentError::OrchestratorMissing => EnvironmentErrorKind::OrchestratorMissing,
        }
    }
}

impl From<EngineError> for EnvironmentError {
    fn from(source: EngineError) -> Self {
        EnvironmentError::EngineUnavailable { source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_source() {
        assert_eq!(
            EnvironmentError::from(EngineError::NoSocket).kind(),
            EnvironmentErrorKind::NoEngine
        );
        assert_eq!(
            EnvironmentError::from(EngineError::ConnectionFailed("refused".into())).kind(),
            EnvironmentErrorKind::EngineUnreachable
        );
        assert_eq!(
            EnvironmentError::OrchestratorMissing.kind(),
            EnvironmentErrorKind::OrchestratorMissing
        );
    }

    #[test]
    fn missing_orchestrator_carries_install_hint() {
        let message = EnvironmentError::OrchestratorMissing.to_string();
        assert!(message.contains("docker-compose"));
        assert!(message.contains("https://docs.docker.com/compose/install/"));
    }
}
