// ABOUTME: Project layout and configuration file handling.
// ABOUTME: Locates the compose file and .env, seeds .env from its template, reads the API port.

mod compose_file;
mod env_file;
mod init;

pub use compose_file::ComposeFile;
pub use env_file::{
    DefaultReason, EnvFile, PortSetting, PortSource, load_port, port_from_env, resolve_port,
};
pub use init::{EnvFileStatus, ensure_env_file};

use std::path::{Path, PathBuf};

pub const COMPOSE_FILENAME: &str = "docker-compose.yml";
pub const ENV_FILENAME: &str = ".env";
pub const ENV_TEMPLATE_FILENAME: &str = ".env.example";

/// Port the server listens on when `.env` does not say otherwise.
pub const DEFAULT_API_PORT: u16 = 8000;

/// Key in `.env` holding the server port.
pub const API_PORT_KEY: &str = "API_PORT";

/// Filesystem locations used by one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    root: PathBuf,
    compose_file: PathBuf,
    env_file: PathBuf,
    env_template: PathBuf,
}

impl ProjectLayout {
    /// Standard layout rooted at `root`.
    pub fn new(root: &Path) -> std::io::Result<Self> {
        let root = std::path::absolute(root)?;
        Ok(Self {
            compose_file: root.join(COMPOSE_FILENAME),
            env_file: root.join(ENV_FILENAME),
            env_template: root.join(ENV_TEMPLATE_FILENAME),
            root,
        })
    }

    /// Replace the compose file path. Relative paths resolve against the root.
    pub fn with_compose_file(mut self, path: &Path) -> Self {
        self.compose_file = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        };
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn compose_file(&self) -> &Path {
        &self.compose_file
    }

    pub fn env_file(&self) -> &Path {
        &self.env_file
    }

    pub fn env_template(&self) -> &Path {
        &self.env_template
    }
}
