// ABOUTME: Env file scaffolding for new checkouts.
// ABOUTME: Seeds .env from .env.example when the real file is missing.

use std::path::Path;

/// What [`ensure_env_file`] found or did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvFileStatus {
    /// The env file already existed.
    Present,
    /// The env file was missing and has been copied from the template.
    Seeded,
    /// The env file was missing and copying the template failed.
    SeedFailed(String),
    /// Neither the env file nor a template exists.
    Missing,
}

/// Make sure an env file exists at `env_file`, copying `template` if needed.
///
/// Never fails; callers decide how loudly to report each status.
pub fn ensure_env_file(env_file: &Path, template: &Path) -> EnvFileStatus {
    if env_file.exists() {
        return EnvFileStatus::Present;
    }

    if !template.is_file() {
        return EnvFileStatus::Missing;
    }

    match std::fs::copy(template, env_file) {
        Ok(_) => {
            tracing::info!(
                "seeded {} from {}",
                env_file.display(),
                template.display()
            );
            EnvFileStatus::Seeded
        }
        Err(e) => EnvFileStatus::SeedFailed(e.to_string()),
    }
}
