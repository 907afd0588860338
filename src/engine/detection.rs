// ABOUTME: Environment detection for the local container engine and compose command.
// ABOUTME: Pings the engine via bollard, then picks the first compose form that answers.

use async_trait::async_trait;
use bollard::Docker;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

use super::error::{EngineError, EnvironmentError};
use crate::compose::{ComposeCommand, ComposeContext};

/// Reachability check for the container engine daemon.
#[async_trait]
pub trait EngineProbe: Send + Sync {
    async fn ping(&self) -> Result<(), EngineError>;
}

/// Checks whether a program runs and exits successfully.
#[async_trait]
pub trait ProgramProbe: Send + Sync {
    async fn succeeds(&self, program: &str, args: &[&str]) -> bool;
}

/// Resolve the compose context for this invocation.
///
/// The engine must answer a ping; then `docker compose` is tried before
/// `docker-compose`. All probes are read-only.
///
/// When no engine socket is known locally, `docker info` decides instead:
/// the docker CLI may reach an engine through its active context.
pub async fn resolve(
    engine: &impl EngineProbe,
    programs: &impl ProgramProbe,
    compose_file: &Path,
) -> Result<ComposeContext, EnvironmentError> {
    if let Err(e) = engine.ping().await {
        let via_cli = matches!(e, EngineError::NoSocket)
            && programs.succeeds(DOCKER_CLI, &["info"]).await;
        if !via_cli {
            return Err(e.into());
        }
        tracing::debug!("no engine socket found; docker CLI context reaches an engine");
    }

    for candidate in ComposeCommand::CANDIDATES {
        let mut args = candidate.prefix_args().to_vec();
        args.push("version");

        if programs.succeeds(candidate.program(), &args).await {
            tracing::debug!("using {}", candidate);
            return Ok(ComposeContext::new(candidate, compose_file));
        }
        tracing::debug!("{} not available", candidate);
    }

    Err(EnvironmentError::OrchestratorMissing)
}

/// [`ProgramProbe`] that spawns the program with output discarded.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProbe;

#[async_trait]
impl ProgramProbe for SystemProbe {
    async fn succeeds(&self, program: &str, args: &[&str]) -> bool {
        let status = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await;

        match status {
            Ok(status) => status.success(),
            Err(e) => {
                tracing::debug!("cannot run {}: {}", program, e);
                false
            }
        }
    }
}

/// Where to reach the engine API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEndpoint {
    /// Use `DOCKER_HOST` as bollard interprets it.
    FromEnv,
    /// A local unix socket.
    Socket(PathBuf),
}

/// [`EngineProbe`] backed by the Docker-compatible API.
#[derive(Debug, Clone)]
pub struct BollardEngine {
    endpoint: Option<EngineEndpoint>,
}

impl BollardEngine {
    pub fn new(endpoint: Option<EngineEndpoint>) -> Self {
        Self { endpoint }
    }

    /// Endpoint from `DOCKER_HOST`, or the first local socket that exists.
    pub fn detect() -> Self {
        if std::env::var_os("DOCKER_HOST").is_some() {
            return Self::new(Some(EngineEndpoint::FromEnv));
        }
        Self::new(detect_local_socket().map(EngineEndpoint::Socket))
    }

    fn client(&self) -> Result<Docker, EngineError> {
        let client = match self.endpoint.as_ref().ok_or(EngineError::NoSocket)? {
            EngineEndpoint::FromEnv => Docker::connect_with_defaults(),
            EngineEndpoint::Socket(path) => Docker::connect_with_unix(
                &path.to_string_lossy(),
                120,
                bollard::API_DEFAULT_VERSION,
            ),
        };
        client.map_err(|e| EngineError::ConnectionFailed(e.to_string()))
    }
}

#[async_trait]
impl EngineProbe for BollardEngine {
    async fn ping(&self) -> Result<(), EngineError> {
        let client = self.client()?;
        client
            .ping()
            .await
            .map_err(|e| EngineError::ConnectionFailed(e.to_string()))?;
        Ok(())
    }
}

const DOCKER_CLI: &str = "docker";
const DOCKER_SOCKET: &str = "/var/run/docker.sock";
const ROOTFUL_PODMAN: &str = "/run/podman/podman.sock";

/// Detect a container engine socket on the local system.
///
/// Detection order:
/// 1. Docker socket (`/var/run/docker.sock`)
/// 2. Rootless Docker socket (`$XDG_RUNTIME_DIR/docker.sock`)
/// 3. Docker Desktop socket (`~/.docker/run/docker.sock`)
/// 4. Rootless Podman socket (`$XDG_RUNTIME_DIR/podman/podman.sock`)
/// 5. Rootful Podman socket (`/run/podman/podman.sock`)
///
/// `$XDG_RUNTIME_DIR` defaults to `/run/user/$UID`.
pub fn detect_local_socket() -> Option<PathBuf> {
    let home = std::env::var_os("HOME").map(PathBuf::from);
    socket_candidates(user_runtime_dir().as_deref(), home.as_deref())
        .into_iter()
        .find(|path| path.exists())
}

fn socket_candidates(runtime_dir: Option<&Path>, home: Option<&Path>) -> Vec<PathBuf> {
    let mut candidates = vec![PathBuf::from(DOCKER_SOCKET)];
    if let Some(dir) = runtime_dir {
        candidates.push(dir.join("docker.sock"));
    }
    if let Some(home) = home {
        candidates.push(home.join(".docker/run/docker.sock"));
    }
    if let Some(dir) = runtime_dir {
        candidates.push(dir.join("podman/podman.sock"));
    }
    candidates.push(PathBuf::from(ROOTFUL_PODMAN));
    candidates
}

fn user_runtime_dir() -> Option<PathBuf> {
    match std::env::var_os("XDG_RUNTIME_DIR") {
        Some(dir) if !dir.is_empty() => Some(PathBuf::from(dir)),
        _ => get_uid().map(|uid| PathBuf::from(format!("/run/user/{uid}"))),
    }
}

fn get_uid() -> Option<String> {
    std::env::var("UID").ok().or_else(|| {
        // Fall back to reading /proc/self/status
        std::fs::read_to_string("/proc/self/status")
            .ok()
            .and_then(|s| {
                s.lines()
                    .find(|l| l.starts_with("Uid:"))
                    .and_then(|l| l.split_whitespace().nth(1))
                    .map(|s| s.to_string())
            })
    })
}
