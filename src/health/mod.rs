// ABOUTME: Health gate that polls the server's HTTP health endpoints after startup.
// ABOUTME: Bounded retries with a fixed delay; exhausting the budget is advisory, never fatal.

mod probe;

pub use probe::{HttpProbe, ProbeError};

use async_trait::async_trait;
use std::time::Duration;

/// Health paths, tried in order on each attempt.
pub const HEALTH_PATHS: [&str; 2] = ["/api/health", "/health"];

/// One GET against one health path.
#[async_trait]
pub trait HealthProbe: Send + Sync {
    /// Whether `path` on `localhost:<port>` answered successfully.
    async fn probe(&self, port: u16, path: &str) -> bool;
}

/// Retry budget for the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthPolicy {
    pub attempts: u32,
    pub interval: Duration,
}

impl HealthPolicy {
    pub const ATTEMPTS: u32 = 15;
    pub const INTERVAL: Duration = Duration::from_secs(2);

    /// Longest the gate can block.
    pub fn budget(&self) -> Duration {
        self.interval * self.attempts.saturating_sub(1)
    }
}

impl Default for HealthPolicy {
    fn default() -> Self {
        Self {
            attempts: Self::ATTEMPTS,
            interval: Self::INTERVAL,
        }
    }
}

/// Result of waiting on the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthOutcome {
    /// A health path answered on attempt `attempts`.
    Healthy { attempts: u32, path: &'static str },
    /// Every attempt failed.
    TimedOut { attempts: u32 },
    /// The service was not running, so nothing was probed.
    NotRunning,
}

impl HealthOutcome {
    pub fn is_healthy(&self) -> bool {
        matches!(self, HealthOutcome::Healthy { .. })
    }
}

/// Polls [`HEALTH_PATHS`] until one answers or the policy is exhausted.
pub struct HealthGate<P> {
    probe: P,
    policy: HealthPolicy,
}

impl<P: HealthProbe> HealthGate<P> {
    pub fn new(probe: P, policy: HealthPolicy) -> Self {
        Self { probe, policy }
    }

    pub fn policy(&self) -> HealthPolicy {
        self.policy
    }

    pub fn probe(&self) -> &P {
        &self.probe
    }

    /// Single pass over the health paths. Returns the path that answered.
    pub async fn check_once(&self, port: u16) -> Option<&'static str> {
        for path in HEALTH_PATHS {
            if self.probe.probe(port, path).await {
                return Some(path);
            }
        }
        None
    }

    /// Wait for the service on `port` to report healthy.
    ///
    /// Returns immediately with [`HealthOutcome::NotRunning`] when
    /// `service_running` is false. Otherwise makes at most `policy.attempts`
    /// passes, sleeping `policy.interval` between them, and stops on the
    /// first success.
    pub async fn await_healthy(&self, port: u16, service_running: bool) -> HealthOutcome {
        if !service_running {
            return HealthOutcome::NotRunning;
        }

        for attempt in 1..=self.policy.attempts {
            if let Some(path) = self.check_once(port).await {
                tracing::info!("healthy on {} after {} attempt(s)", path, attempt);
                return HealthOutcome::Healthy {
                    attempts: attempt,
                    path,
                };
            }

            tracing::debug!(
                "health attempt {}/{} failed on port {}",
                attempt,
                self.policy.attempts,
                port
            );

            if attempt < self.policy.attempts {
                tokio::time::sleep(self.policy.interval).await;
            }
        }

        HealthOutcome::TimedOut {
            attempts: self.policy.attempts,
        }
    }
}
