// ABOUTME: Test support utilities.
// ABOUTME: Recording orchestrator, scripted health probe and source-control fakes.

// Each test binary only uses some of these helpers, so allow dead_code.
#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use stackdeploy::commands::Dispatcher;
use stackdeploy::compose::{OrchestrationError, Orchestrator};
use stackdeploy::config::ProjectLayout;
use stackdeploy::health::{HealthGate, HealthPolicy, HealthProbe};
use stackdeploy::output::{Output, OutputMode};
use stackdeploy::vcs::{SourceControl, SourceError};
use std::path::{Path, PathBuf};
use std::sync::Once;
use std::time::Duration;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for tests. Safe to call multiple times.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::EnvFilter;
        let filter = EnvFilter::from_default_env()
            .add_directive("stackdeploy=debug".parse().unwrap());
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init()
            .ok();
    });
}

pub const COMPOSE_YAML: &str = r#"
services:
  server:
    build: .
    ports:
      - "${API_PORT:-8000}:8000"
  analyzer:
    build: .
"#;

/// Orchestrator fake that records every call in order.
pub struct RecordingOrchestrator {
    calls: Mutex<Vec<Vec<String>>>,
    listing: String,
    json_supported: bool,
    fail_on: Option<&'static str>,
}

impl RecordingOrchestrator {
    /// Listing in which each of `services` has a running container.
    pub fn running(services: &[&str]) -> Self {
        let listing = services
            .iter()
            .map(|s| {
                format!(
                    r#"{{"Name":"stack-{s}-1","Service":"{s}","State":"running","Status":"Up 1 second"}}"#
                )
            })
            .collect::<Vec<_>>()
            .join("\n");
        Self {
            calls: Mutex::new(Vec::new()),
            listing,
            json_supported: true,
            fail_on: None,
        }
    }

    /// Listing with raw JSON content.
    pub fn with_listing(listing: &str) -> Self {
        Self {
            listing: listing.to_string(),
            ..Self::running(&[])
        }
    }

    /// Reject `ps --format json`, as Compose v1 does.
    pub fn without_json(mut self) -> Self {
        self.json_supported = false;
        self
    }

    /// Fail any call whose first argument is `subcommand`.
    pub fn failing_on(mut self, subcommand: &'static str) -> Self {
        self.fail_on = Some(subcommand);
        self
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().clone()
    }

    /// Calls rendered as space-joined strings, for compact assertions.
    pub fn call_lines(&self) -> Vec<String> {
        self.calls().iter().map(|c| c.join(" ")).collect()
    }

    fn record(&self, args: &[String]) -> Result<(), OrchestrationError> {
        self.calls.lock().push(args.to_vec());
        match (self.fail_on, args.first()) {
            (Some(fail), Some(first)) if first == fail => Err(OrchestrationError::Failed {
                command: format!("docker compose {}", args.join(" ")),
                code: Some(3),
            }),
            _ => Ok(()),
        }
    }

    fn running_service_lines(&self) -> String {
        stackdeploy::compose::parse_listing(&self.listing)
            .unwrap_or_default()
            .into_iter()
            .filter(|c| c.is_running())
            .map(|c| c.service)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[async_trait]
impl Orchestrator for RecordingOrchestrator {
    async fn run(&self, args: &[String]) -> Result<(), OrchestrationError> {
        self.record(args)
    }

    async fn capture(&self, args: &[String]) -> Result<String, OrchestrationError> {
        self.record(args)?;
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        match args.as_slice() {
            ["ps", "--format", "json"] if self.json_supported => Ok(self.listing.clone()),
            ["ps", "--format", "json"] => Err(OrchestrationError::Failed {
                command: "docker-compose ps --format json".to_string(),
                code: Some(1),
            }),
            ["ps", "--services", ..] => Ok(self.running_service_lines()),
            _ => Ok(String::new()),
        }
    }
}

/// Health probe that answers on `/health` from a given attempt onwards.
pub struct ScriptedProbe {
    healthy_from: Option<u32>,
    calls: Mutex<Vec<(u16, String)>>,
}

impl ScriptedProbe {
    pub fn healthy_from(attempt: u32) -> Self {
        Self {
            healthy_from: Some(attempt),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn never_healthy() -> Self {
        Self {
            healthy_from: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(u16, String)> {
        self.calls.lock().clone()
    }

    pub fn calls_to(&self, path: &str) -> usize {
        self.calls.lock().iter().filter(|(_, p)| p == path).count()
    }

    pub fn ports(&self) -> Vec<u16> {
        self.calls.lock().iter().map(|(port, _)| *port).collect()
    }
}

#[async_trait]
impl HealthProbe for ScriptedProbe {
    async fn probe(&self, port: u16, path: &str) -> bool {
        let mut calls = self.calls.lock();
        calls.push((port, path.to_string()));
        let seen = calls.iter().filter(|(_, p)| p == path).count() as u32;
        match self.healthy_from {
            Some(from) => path == "/health" && seen >= from,
            None => false,
        }
    }
}

/// Source control fake recording pulled directories.
#[derive(Default)]
pub struct FakeSource {
    pulls: Mutex<Vec<PathBuf>>,
    fail: bool,
}

impl FakeSource {
    pub fn failing() -> Self {
        Self {
            pulls: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn pulls(&self) -> Vec<PathBuf> {
        self.pulls.lock().clone()
    }
}

#[async_trait]
impl SourceControl for FakeSource {
    async fn pull(&self, dir: &Path) -> Result<(), SourceError> {
        self.pulls.lock().push(dir.to_path_buf());
        if self.fail {
            Err(SourceError::PullFailed(Some(1)))
        } else {
            Ok(())
        }
    }
}

/// Retry budget with the real attempt count and no delay.
pub fn instant_policy() -> HealthPolicy {
    HealthPolicy {
        attempts: HealthPolicy::ATTEMPTS,
        interval: Duration::ZERO,
    }
}

pub type TestDispatcher = Dispatcher<RecordingOrchestrator, ScriptedProbe, FakeSource>;

/// Project directory with a compose file declaring `server` and `analyzer`.
pub fn project_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("docker-compose.yml"), COMPOSE_YAML).unwrap();
    dir
}

pub fn dispatcher(
    dir: &Path,
    orchestrator: RecordingOrchestrator,
    probe: ScriptedProbe,
    source: FakeSource,
) -> TestDispatcher {
    init_tracing();
    Dispatcher::new(
        orchestrator,
        HealthGate::new(probe, instant_policy()),
        source,
        ProjectLayout::new(dir).unwrap(),
        Output::new(OutputMode::Quiet),
    )
}
