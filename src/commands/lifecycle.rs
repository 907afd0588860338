// ABOUTME: Build, stop, restart, logs and update commands.
// ABOUTME: Thin compositions of orchestrator calls and the `up` sequence.

use super::{Dispatcher, Target};
use crate::compose::Orchestrator;
use crate::diagnostics::Diagnostics;
use crate::error::Result;
use crate::health::{HealthOutcome, HealthProbe};
use crate::vcs::SourceControl;

/// Lines of history `logs` shows before following.
const LOG_TAIL: &str = "--tail=100";

impl<O, P, S> Dispatcher<O, P, S>
where
    O: Orchestrator,
    P: HealthProbe,
    S: SourceControl,
{
    pub(super) async fn build(&self, services: &[String]) -> Result<()> {
        self.output.info("→ Building images...");
        let mut args = vec!["build"];
        args.extend(services.iter().map(String::as_str));
        self.compose(&args).await?;
        self.output.success("Images built");
        Ok(())
    }

    pub(super) async fn stop(&self) -> Result<()> {
        self.output.info("→ Stopping services...");
        self.compose(&["down"]).await?;
        self.output.success("Services stopped");
        Ok(())
    }

    pub(super) async fn restart(
        &self,
        target: Target,
        diag: &mut Diagnostics,
    ) -> Result<Option<HealthOutcome>> {
        self.stop().await?;
        self.up(target, diag).await
    }

    /// Follow logs until interrupted.
    pub(super) async fn logs(&self, args: &[String]) -> Result<()> {
        let mut full = vec!["logs", "-f", LOG_TAIL];
        full.extend(args.iter().map(String::as_str));
        self.compose(&full).await
    }

    pub(super) async fn update(
        &self,
        target: Target,
        diag: &mut Diagnostics,
    ) -> Result<Option<HealthOutcome>> {
        self.output.info("→ Pulling latest source...");
        self.source.pull(self.layout.root()).await?;
        self.up(target, diag).await
    }
}
