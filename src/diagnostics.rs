// ABOUTME: Diagnostics accumulator for non-fatal warnings during a command.
// ABOUTME: Records which fallback branch was taken so callers and tests can inspect it.

/// Collects non-fatal warnings during a command.
#[derive(Debug, Default)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    /// Record a warning. Display is the caller's job; this only traces it.
    pub fn record(&mut self, warning: Warning) {
        tracing::debug!(kind = ?warning.kind, "{}", warning.message);
        self.warnings.push(warning);
    }

    /// Warnings in the order they were raised.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Whether the fallback branch `kind` was taken.
    pub fn has(&self, kind: WarningKind) -> bool {
        self.warnings.iter().any(|w| w.kind == kind)
    }
}

/// A non-fatal warning collected during a command.
#[derive(Debug, Clone)]
pub struct Warning {
    pub kind: WarningKind,
    pub message: String,
}

impl Warning {
    pub fn new(kind: WarningKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Categories of warnings that can occur during a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    /// `.env` was created from the template and needs editing.
    EnvSeeded,
    /// `.env` is missing and no template exists; defaults apply.
    EnvMissing,
    /// Copying the template to `.env` failed; defaults apply.
    EnvSeedFailed,
    /// `API_PORT` was set but unusable; the default port applies.
    PortFallback,
    /// The server never answered its health endpoints.
    HealthTimeout,
    /// The server container was not running after startup.
    ServerNotRunning,
}
