// ABOUTME: Command dispatcher for stackdeploy.
// ABOUTME: Runs one parsed command against the orchestrator, health gate and source control.

mod lifecycle;
mod parse;
mod status;
mod up;

pub use parse::{ANALYZER_SERVICE, DeploymentCommand, SERVER_SERVICE, Target, USAGE};

use crate::compose::Orchestrator;
use crate::config::{DefaultReason, PortSource, ProjectLayout, resolve_port};
use crate::diagnostics::{Diagnostics, Warning, WarningKind};
use crate::error::Result;
use crate::health::{HealthGate, HealthOutcome, HealthProbe};
use crate::output::Output;
use crate::vcs::SourceControl;

/// What a command observed, beyond success or failure.
#[derive(Debug, Default)]
pub struct Outcome {
    /// Health gate result, when the command waited on it.
    pub health: Option<HealthOutcome>,
    /// Non-fatal warnings, in the order they were raised.
    pub diagnostics: Diagnostics,
}

/// Executes [`DeploymentCommand`]s for one invocation.
///
/// Holds an orchestrator that was built from an already-resolved
/// compose context, so every call goes through the same command form.
pub struct Dispatcher<O, P, S> {
    orchestrator: O,
    gate: HealthGate<P>,
    source: S,
    layout: ProjectLayout,
    output: Output,
}

impl<O, P, S> Dispatcher<O, P, S>
where
    O: Orchestrator,
    P: HealthProbe,
    S: SourceControl,
{
    pub fn new(
        orchestrator: O,
        gate: HealthGate<P>,
        source: S,
        layout: ProjectLayout,
        output: Output,
    ) -> Self {
        Self {
            orchestrator,
            gate,
            source,
            layout,
            output,
        }
    }

    pub fn orchestrator(&self) -> &O {
        &self.orchestrator
    }

    pub fn gate(&self) -> &HealthGate<P> {
        &self.gate
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn layout(&self) -> &ProjectLayout {
        &self.layout
    }

    /// Run `command`. `Help` is a no-op here; printing usage is the caller's job.
    pub async fn execute(&self, command: &DeploymentCommand) -> Result<Outcome> {
        let mut outcome = Outcome::default();
        let diag = &mut outcome.diagnostics;

        outcome.health = match command {
            DeploymentCommand::Up(target) => self.up(*target, diag).await?,
            DeploymentCommand::Build(services) => {
                self.build(services).await?;
                None
            }
            DeploymentCommand::Stop => {
                self.stop().await?;
                None
            }
            DeploymentCommand::Restart(target) => self.restart(*target, diag).await?,
            DeploymentCommand::Logs(args) => {
                self.logs(args).await?;
                None
            }
            DeploymentCommand::Status => {
                let port = self.api_port(diag);
                self.status(port).await?;
                None
            }
            DeploymentCommand::Update(target) => self.update(*target, diag).await?,
            DeploymentCommand::Help => None,
        };

        Ok(outcome)
    }

    /// Run one orchestrator subcommand with live output.
    async fn compose(&self, args: &[&str]) -> Result<()> {
        let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
        self.orchestrator.run(&args).await?;
        Ok(())
    }

    /// Show a warning and record it.
    fn warn(&self, diag: &mut Diagnostics, kind: WarningKind, message: String) {
        self.output.warning(&message);
        diag.record(Warning::new(kind, message));
    }

    /// API port from `.env`.
    ///
    /// An unreadable file or a malformed value is reported unless env
    /// preparation already warned about the same file. A missing key is not.
    fn api_port(&self, diag: &mut Diagnostics) -> u16 {
        let setting = resolve_port(self.layout.env_file());
        match &setting.source {
            PortSource::Default(DefaultReason::Malformed(raw)) => self.warn(
                diag,
                WarningKind::PortFallback,
                format!(
                    "API_PORT value {:?} is not a valid port; using {}",
                    raw, setting.port
                ),
            ),
            PortSource::Default(DefaultReason::MissingFile)
                if !diag.has(WarningKind::EnvMissing) && !diag.has(WarningKind::EnvSeedFailed) =>
            {
                self.warn(
                    diag,
                    WarningKind::EnvMissing,
                    format!(
                        "{} could not be read; using default API port {}",
                        self.layout.env_file().display(),
                        setting.port
                    ),
                )
            }
            _ => {}
        }
        setting.port
    }
}
