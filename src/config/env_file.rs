// ABOUTME: Line-oriented KEY=value reader for .env files.
// ABOUTME: Extracts the API port, naming which fallback branch was taken when it is unusable.

use std::path::Path;

use super::{API_PORT_KEY, DEFAULT_API_PORT};

/// Parsed `.env` contents in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvFile {
    entries: Vec<(String, String)>,
}

impl EnvFile {
    /// Parse `.env` text. Lines that are not assignments are skipped.
    pub fn parse(content: &str) -> Self {
        let entries = content.lines().filter_map(parse_line).collect();
        Self { entries }
    }

    /// Value of the last assignment to `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn parse_line(line: &str) -> Option<(String, String)> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    let line = line.strip_prefix("export ").unwrap_or(line);
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }

    Some((key.to_string(), unquote(value.trim()).to_string()))
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner.trim();
        }
    }

    // Unquoted values may carry a trailing comment.
    match value.find(" #") {
        Some(idx) => value[..idx].trim_end(),
        None => value,
    }
}

/// Why the default port was used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultReason {
    /// The env file does not exist or reading it failed.
    MissingFile,
    /// The env file has no `API_PORT` assignment.
    MissingKey,
    /// `API_PORT` is set to something that is not a port number.
    Malformed(String),
}

/// Where the resolved port came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortSource {
    EnvFile,
    Default(DefaultReason),
}

/// A resolved port together with its provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortSetting {
    pub port: u16,
    pub source: PortSource,
}

impl PortSetting {
    fn fallback(reason: DefaultReason) -> Self {
        Self {
            port: DEFAULT_API_PORT,
            source: PortSource::Default(reason),
        }
    }

    pub fn is_default(&self) -> bool {
        matches!(self.source, PortSource::Default(_))
    }
}

/// Resolve the API port from the env file at `path`.
///
/// Never fails: every unusable input maps to [`DEFAULT_API_PORT`] with a
/// [`DefaultReason`] describing the branch taken.
pub fn resolve_port(path: &Path) -> PortSetting {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::debug!("cannot read {}: {}", path.display(), e);
            return PortSetting::fallback(DefaultReason::MissingFile);
        }
    };

    // Comments in legacy encodings must not hide an ASCII assignment.
    port_from_env(&EnvFile::parse(&String::from_utf8_lossy(&bytes)))
}

/// Port from already-parsed env contents.
pub fn port_from_env(env: &EnvFile) -> PortSetting {
    let Some(raw) = env.get(API_PORT_KEY) else {
        return PortSetting::fallback(DefaultReason::MissingKey);
    };

    match raw.parse::<u16>() {
        Ok(port) if port != 0 => PortSetting {
            port,
            source: PortSource::EnvFile,
        },
        _ => PortSetting::fallback(DefaultReason::Malformed(raw.to_string())),
    }
}

/// Resolve just the port number from the env file at `path`.
pub fn load_port(path: &Path) -> u16 {
    resolve_port(path).port
}
