// ABOUTME: The `up` sequence: build, start, wait for health, report.
// ABOUTME: Also seeds .env and validates single-service targets before starting anything.

use super::{Dispatcher, SERVER_SERVICE, Target};
use crate::compose::{Orchestrator, running_services};
use crate::config::{ComposeFile, EnvFileStatus, ensure_env_file};
use crate::diagnostics::{Diagnostics, WarningKind};
use crate::error::{Error, Result};
use crate::health::{HealthOutcome, HealthProbe};
use crate::vcs::SourceControl;

impl<O, P, S> Dispatcher<O, P, S>
where
    O: Orchestrator,
    P: HealthProbe,
    S: SourceControl,
{
    /// Build every image, start `target`, wait for the server if it was
    /// started, then print status.
    pub(super) async fn up(
        &self,
        target: Target,
        diag: &mut Diagnostics,
    ) -> Result<Option<HealthOutcome>> {
        if let Some(service) = target.service() {
            self.ensure_declared(service)?;
        }

        self.prepare_env(diag);
        let port = self.api_port(diag);

        self.output.info("→ Building images...");
        self.compose(&["build"]).await?;

        self.output.info(&format!("→ Starting {target}..."));
        let mut args = vec!["up", "-d"];
        args.extend(target.service());
        self.compose(&args).await?;

        let health = if target.gates_health() {
            let running = running_services(&self.orchestrator)
                .await?
                .contains(SERVER_SERVICE);
            if running {
                self.output.info(&format!(
                    "→ Waiting for the API on port {port} (up to {}s)...",
                    self.gate.policy().budget().as_secs()
                ));
            }
            let outcome = self.gate.await_healthy(port, running).await;
            self.report_health(&outcome, port, diag);
            Some(outcome)
        } else {
            None
        };

        self.status(port).await?;
        Ok(health)
    }

    /// Refuse to start a service the compose file does not declare.
    ///
    /// A missing compose file is left for the orchestrator to report.
    fn ensure_declared(&self, service: &str) -> Result<()> {
        let path = self.layout.compose_file();
        if !path.exists() {
            return Ok(());
        }

        if ComposeFile::load(path)?.declares(service) {
            Ok(())
        } else {
            Err(Error::UndefinedService {
                service: service.to_string(),
                compose_file: path.to_path_buf(),
            })
        }
    }

    fn prepare_env(&self, diag: &mut Diagnostics) {
        let env_file = self.layout.env_file();
        let template = self.layout.env_template();

        match ensure_env_file(env_file, template) {
            EnvFileStatus::Present => {}
            EnvFileStatus::Seeded => self.warn(
                diag,
                WarningKind::EnvSeeded,
                format!(
                    "created {} from {}; edit it with your settings",
                    env_file.display(),
                    template.display()
                ),
            ),
            EnvFileStatus::SeedFailed(reason) => self.warn(
                diag,
                WarningKind::EnvSeedFailed,
                format!(
                    "could not create {} from {}: {}; using defaults",
                    env_file.display(),
                    template.display(),
                    reason
                ),
            ),
            EnvFileStatus::Missing => self.warn(
                diag,
                WarningKind::EnvMissing,
                format!("{} not found and no template; using defaults", env_file.display()),
            ),
        }
    }

    fn report_health(&self, outcome: &HealthOutcome, port: u16, diag: &mut Diagnostics) {
        match outcome {
            HealthOutcome::Healthy { .. } => {
                self.output
                    .success(&format!("API is healthy at http://localhost:{port}"));
            }
            HealthOutcome::TimedOut { attempts } => self.warn(
                diag,
                WarningKind::HealthTimeout,
                format!(
                    "API did not become healthy after {attempts} attempts; check `deploy logs {SERVER_SERVICE}`"
                ),
            ),
            HealthOutcome::NotRunning => self.warn(
                diag,
                WarningKind::ServerNotRunning,
                format!(
                    "{SERVER_SERVICE} container is not running; check `deploy logs {SERVER_SERVICE}`"
                ),
            ),
        }
    }
}
