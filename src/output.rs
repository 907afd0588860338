// ABOUTME: User-facing feedback for deploy commands.
// ABOUTME: Routes progress, success, warning and error events to text or JSON lines.

use serde::Serialize;
use std::time::Instant;

/// How feedback is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-friendly output with progress messages
    Normal,
    /// Results, warnings and errors only
    Quiet,
    /// JSON lines for scripting
    Json,
}

/// Category of a feedback line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Event {
    Info,
    Success,
    Warning,
    Error,
}

impl Event {
    fn name(self) -> &'static str {
        match self {
            Event::Info => "info",
            Event::Success => "success",
            Event::Warning => "warning",
            Event::Error => "error",
        }
    }

    /// Warnings and errors are written to stderr.
    fn goes_to_stderr(self) -> bool {
        matches!(self, Event::Warning | Event::Error)
    }
}

/// Feedback sink for one invocation.
#[derive(Debug, Clone)]
pub struct Output {
    mode: OutputMode,
    started: Option<Instant>,
}

impl Output {
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            started: None,
        }
    }

    /// Start the clock reported with success lines and JSON events.
    pub fn start_timer(&mut self) {
        self.started = Some(Instant::now());
    }

    /// Seconds since [`Output::start_timer`], or zero if it was never called.
    pub fn elapsed_secs(&self) -> f64 {
        self.started
            .map(|t| t.elapsed().as_secs_f64())
            .unwrap_or_default()
    }

    /// Progress line. Dropped in quiet mode.
    pub fn info(&self, message: &str) {
        self.emit(Event::Info, message);
    }

    /// Completed step, with elapsed time in normal mode.
    pub fn success(&self, message: &str) {
        self.emit(Event::Success, message);
    }

    pub fn warning(&self, message: &str) {
        self.emit(Event::Warning, message);
    }

    pub fn error(&self, message: &str) {
        self.emit(Event::Error, message);
    }

    fn emit(&self, event: Event, message: &str) {
        let line = match self.mode {
            OutputMode::Json => match self.event_json(event.name(), message) {
                Some(json) => json,
                None => return,
            },
            OutputMode::Quiet if event == Event::Info => return,
            mode => render_text(mode, event, message, self.elapsed_secs()),
        };

        if event.goes_to_stderr() {
            eprintln!("{line}");
        } else {
            println!("{line}");
        }
    }

    fn event_json(&self, event: &str, message: &str) -> Option<String> {
        let event = JsonEvent {
            event,
            message,
            duration_secs: self.started.map(|_| self.elapsed_secs()),
        };
        serde_json::to_string(&event).ok()
    }
}

fn render_text(mode: OutputMode, event: Event, message: &str, elapsed: f64) -> String {
    match event {
        Event::Info => message.to_string(),
        Event::Success if mode == OutputMode::Normal && elapsed > 0.0 => {
            format!("✓ {message} ({elapsed:.1}s)")
        }
        Event::Success if mode == OutputMode::Normal => format!("✓ {message}"),
        Event::Success => message.to_string(),
        Event::Warning => format!("Warning: {message}"),
        Event::Error => format!("Error: {message}"),
    }
}

#[derive(Serialize)]
struct JsonEvent<'a> {
    event: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration_secs: Option<f64>,
}
