// ABOUTME: Resolved compose command form and compose file path.
// ABOUTME: Built once per invocation by the environment prober and threaded into every call.

use std::fmt;
use std::path::{Path, PathBuf};

/// The two ways a compose-compatible CLI can be invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposeCommand {
    /// `docker compose` (Compose v2 CLI plugin).
    Plugin,
    /// `docker-compose` (standalone binary).
    Standalone,
}

impl ComposeCommand {
    /// Detection order: plugin first, then standalone.
    pub const CANDIDATES: [ComposeCommand; 2] =
        [ComposeCommand::Plugin, ComposeCommand::Standalone];

    /// Executable to spawn.
    pub fn program(&self) -> &'static str {
        match self {
            ComposeCommand::Plugin => "docker",
            ComposeCommand::Standalone => "docker-compose",
        }
    }

    /// Arguments that precede every compose subcommand.
    pub fn prefix_args(&self) -> &'static [&'static str] {
        match self {
            ComposeCommand::Plugin => &["compose"],
            ComposeCommand::Standalone => &[],
        }
    }
}

impl fmt::Display for ComposeCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComposeCommand::Plugin => write!(f, "docker compose"),
            ComposeCommand::Standalone => write!(f, "docker-compose"),
        }
    }
}

/// Orchestrator command form plus compose file, fixed for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposeContext {
    command: ComposeCommand,
    compose_file: PathBuf,
}

impl ComposeContext {
    pub fn new(command: ComposeCommand, compose_file: impl Into<PathBuf>) -> Self {
        Self {
            command,
            compose_file: compose_file.into(),
        }
    }

    pub fn command(&self) -> ComposeCommand {
        self.command
    }

    pub fn compose_file(&self) -> &Path {
        &self.compose_file
    }

    /// Directory the orchestrator runs in (where it also finds `.env`).
    pub fn working_dir(&self) -> Option<&Path> {
        self.compose_file
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
    }

    /// Full argument vector: `<prefix> -f <compose file> <args>`.
    pub fn args<S: AsRef<str>>(&self, args: &[S]) -> Vec<String> {
        let mut full: Vec<String> = self
            .command
            .prefix_args()
            .iter()
            .map(|s| s.to_string())
            .collect();
        full.push("-f".to_string());
        full.push(self.compose_file.display().to_string());
        full.extend(args.iter().map(|a| a.as_ref().to_string()));
        full
    }

    /// Human-readable command line, for logs and error messages.
    pub fn display_command<S: AsRef<str>>(&self, args: &[S]) -> String {
        let mut line = self.command.program().to_string();
        for arg in self.args(args) {
            line.push(' ');
            line.push_str(&arg);
        }
        line
    }
}
