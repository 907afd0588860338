// ABOUTME: Command table mapping a command word and trailing arguments to a DeploymentCommand.
// ABOUTME: Decides aliases, the default command and unknown commands in one place.

use std::fmt;

use crate::error::{Error, Result};

/// Compose service that serves HTTP and exposes the health endpoints.
pub const SERVER_SERVICE: &str = "server";

/// Compose service that runs scheduled analysis.
pub const ANALYZER_SERVICE: &str = "analyzer";

/// Usage text listing every command.
pub const USAGE: &str = "\
Commands:
  up [server|analyzer]   Build images, start services, wait for health, show status (default)
  server                 Build images and start only the server
  analyzer               Build images and start only the analyzer
  stop, down             Stop and remove the stack's containers
  restart [target]       Stop the stack, then run `up` with the same target
  logs, log [args...]    Follow logs (last 100 lines), optionally for named services
  status, ps             Show container state and API reachability
  update, upgrade        Pull the latest source, then run `up`
  build [services...]    Build images without starting anything
  help                   Show this help";

/// Which part of the stack an `up` sequence starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    All,
    Server,
    Analyzer,
}

impl Target {
    /// Parse optional forwarded arguments: none means the whole stack.
    pub fn from_args(args: &[String]) -> Result<Self> {
        match args {
            [] => Ok(Target::All),
            [name] => Self::parse(name),
            [_, extra, ..] => Err(Error::UnknownTarget(extra.clone())),
        }
    }

    pub fn parse(name: &str) -> Result<Self> {
        match name {
            "all" => Ok(Target::All),
            SERVER_SERVICE => Ok(Target::Server),
            ANALYZER_SERVICE => Ok(Target::Analyzer),
            other => Err(Error::UnknownTarget(other.to_string())),
        }
    }

    /// Compose service to pass to `up`, or `None` for all services.
    pub fn service(&self) -> Option<&'static str> {
        match self {
            Target::All => None,
            Target::Server => Some(SERVER_SERVICE),
            Target::Analyzer => Some(ANALYZER_SERVICE),
        }
    }

    /// Whether starting this target waits on the server's health endpoints.
    pub fn gates_health(&self) -> bool {
        !matches!(self, Target::Analyzer)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.service() {
            Some(service) => write!(f, "{service}"),
            None => write!(f, "all services"),
        }
    }
}

/// One parsed invocation. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeploymentCommand {
    /// Build, start, health-gate, report.
    Up(Target),
    /// Build images only; arguments name services.
    Build(Vec<String>),
    /// Stop and remove the stack's containers.
    Stop,
    /// Stop, then `Up` with the same target.
    Restart(Target),
    /// Follow logs; arguments pass through to the orchestrator.
    Logs(Vec<String>),
    /// Report container state and reachability.
    Status,
    /// Pull source, then `Up` with the same target.
    Update(Target),
    /// Print usage.
    Help,
}

impl DeploymentCommand {
    /// Parse a command word and its trailing arguments.
    pub fn parse<S: AsRef<str>>(args: &[S]) -> Result<Self> {
        let Some((command, rest)) = args.split_first() else {
            return Ok(DeploymentCommand::Up(Target::All));
        };
        let rest: Vec<String> = rest.iter().map(|a| a.as_ref().to_string()).collect();

        match command.as_ref() {
            "" | "up" => Ok(DeploymentCommand::Up(Target::from_args(&rest)?)),
            word @ (SERVER_SERVICE | ANALYZER_SERVICE) => match rest.first() {
                Some(extra) => Err(Error::UnknownTarget(extra.clone())),
                None => Ok(DeploymentCommand::Up(Target::parse(word)?)),
            },
            "stop" | "down" => Ok(DeploymentCommand::Stop),
            "restart" => Ok(DeploymentCommand::Restart(Target::from_args(&rest)?)),
            "logs" | "log" => Ok(DeploymentCommand::Logs(rest)),
            "status" | "ps" => Ok(DeploymentCommand::Status),
            "update" | "upgrade" => Ok(DeploymentCommand::Update(Target::from_args(&rest)?)),
            "build" => Ok(DeploymentCommand::Build(rest)),
            "help" | "-h" | "--help" => Ok(DeploymentCommand::Help),
            other => Err(Error::UnknownCommand(other.to_string())),
        }
    }

    /// Whether this command talks to the orchestrator at all.
    pub fn needs_orchestrator(&self) -> bool {
        !matches!(self, DeploymentCommand::Help)
    }
}
