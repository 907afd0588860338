// ABOUTME: Minimal view of a compose definition file.
// ABOUTME: Reads the declared service names so targets can be validated before starting.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ComposeFile {
    #[serde(default)]
    services: BTreeMap<String, serde_yaml::Value>,
}

impl ComposeFile {
    pub fn from_yaml(yaml: &str) -> std::result::Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content).map_err(|source| Error::ComposeFile {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Declared service names, sorted.
    pub fn services(&self) -> impl Iterator<Item = &str> {
        self.services.keys().map(String::as_str)
    }

    pub fn declares(&self, service: &str) -> bool {
        self.services.contains_key(service)
    }
}
