use std::path::PathBuf;
use thiserror::Error;

/// Error types for launcher operations
#[derive(Error, Debug)]
pub enum LauncherError {
    #[error("could not spawn `{command}`: {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("could not resolve script directory: {0}")]
    ScriptPath(#[source] std::io::Error),

    #[error("failed waiting for child process: {0}")]
    WaitFailed(#[source] std::io::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("could not load config file {}: {source}", path.display())]
    ConfigFile {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("supervisor task failed: {0}")]
    Supervisor(String),
}

impl LauncherError {
    /// Check if the process could not be created because its executable is missing
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            LauncherError::SpawnFailed { source, .. }
                if source.kind() == std::io::ErrorKind::NotFound
        )
    }

    /// Check if this error was raised before any child process existed
    pub fn is_launch_failure(&self) -> bool {
        matches!(
            self,
            LauncherError::SpawnFailed { .. } | LauncherError::ScriptPath(_)
        )
    }
}
