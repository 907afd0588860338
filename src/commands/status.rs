// ABOUTME: Status reporter.
// ABOUTME: Prints the orchestrator's container listing and whether the API answers.

use super::Dispatcher;
use crate::compose::Orchestrator;
use crate::error::Result;
use crate::health::HealthProbe;
use crate::vcs::SourceControl;

impl<O, P, S> Dispatcher<O, P, S>
where
    O: Orchestrator,
    P: HealthProbe,
    S: SourceControl,
{
    /// Show container state and API reachability. Changes nothing.
    pub(super) async fn status(&self, port: u16) -> Result<()> {
        self.output.info("Container status:");
        self.compose(&["ps"]).await?;

        match self.gate.check_once(port).await {
            Some(path) => {
                tracing::debug!("API answered on {}", path);
                self.output
                    .success(&format!("API reachable at http://localhost:{port}"));
            }
            None => self
                .output
                .info(&format!("API not reachable on port {port}")),
        }

        Ok(())
    }
}
