// ABOUTME: Version-control boundary used by the update command.
// ABOUTME: Pulls the latest source into the project directory before a rebuild.

use async_trait::async_trait;
use std::path::Path;
use tokio::process::Command;

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("failed to run git: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("`git pull` exited with status {0:?}")]
    PullFailed(Option<i32>),
}

/// Fetches the latest source for a checkout.
#[async_trait]
pub trait SourceControl: Send + Sync {
    async fn pull(&self, dir: &Path) -> Result<(), SourceError>;
}

/// [`SourceControl`] backed by the `git` CLI; output streams to the terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct Git;

#[async_trait]
impl SourceControl for Git {
    async fn pull(&self, dir: &Path) -> Result<(), SourceError> {
        tracing::debug!("running git -C {} pull", dir.display());

        let status = Command::new("git")
            .arg("-C")
            .arg(dir)
            .arg("pull")
            .status()
            .await?;

        if status.success() {
            Ok(())
        } else {
            Err(SourceError::PullFailed(status.code()))
        }
    }
}
