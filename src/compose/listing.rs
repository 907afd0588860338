// ABOUTME: Typed view of the orchestrator's container listing.
// ABOUTME: Parses `ps --format json` output and answers exact-match running-service queries.

use serde::Deserialize;
use std::collections::BTreeSet;

use super::invoker::{OrchestrationError, Orchestrator};

/// One container from `ps --format json`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ComposeContainer {
    /// Container name.
    pub name: String,
    /// Compose service the container belongs to.
    pub service: String,
    /// Machine state, e.g. `running` or `exited`.
    #[serde(default)]
    pub state: String,
    /// Status text, e.g. `Up 3 minutes (healthy)`.
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub health: String,
}

impl ComposeContainer {
    pub fn is_running(&self) -> bool {
        self.state.eq_ignore_ascii_case("running")
    }
}

/// Parse a JSON listing. Older Compose releases print one array, newer ones
/// print one object per line.
pub fn parse_listing(output: &str) -> Result<Vec<ComposeContainer>, serde_json::Error> {
    let trimmed = output.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    if trimmed.starts_with('[') {
        return serde_json::from_str(trimmed);
    }

    trimmed
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| serde_json::from_str(line))
        .collect()
}

/// Compose services with at least one running container.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunningServices(BTreeSet<String>);

impl RunningServices {
    pub fn from_containers(containers: &[ComposeContainer]) -> Self {
        Self(
            containers
                .iter()
                .filter(|c| c.is_running())
                .map(|c| c.service.clone())
                .collect(),
        )
    }

    /// From `ps --services` output, one name per line.
    pub fn from_service_lines(output: &str) -> Self {
        Self(
            output
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    pub fn contains(&self, service: &str) -> bool {
        self.0.contains(service)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

/// Query which services are running.
///
/// Tries the JSON listing first; when the orchestrator rejects `--format json`
/// or prints something unparsable, falls back to `ps --services` filtered on
/// running status.
pub async fn running_services<O: Orchestrator + ?Sized>(
    orchestrator: &O,
) -> Result<RunningServices, OrchestrationError> {
    let json_args = args(&["ps", "--format", "json"]);
    match orchestrator.capture(&json_args).await {
        Ok(output) => match parse_listing(&output) {
            Ok(containers) => return Ok(RunningServices::from_containers(&containers)),
            Err(e) => tracing::debug!("JSON listing unreadable, falling back: {}", e),
        },
        Err(e) => tracing::debug!("JSON listing unavailable, falling back: {}", e),
    }

    let fallback_args = args(&["ps", "--services", "--filter", "status=running"]);
    let output = orchestrator.capture(&fallback_args).await?;
    Ok(RunningServices::from_service_lines(&output))
}

fn args(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
