use crate::error::LauncherError;
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Directory a relative script path is resolved against
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScriptBase {
    /// Directory containing the running launcher executable
    #[default]
    LauncherDir,
    /// Current working directory of the launcher process
    WorkingDir,
    /// An explicit directory
    Dir(PathBuf),
}

/// Main launcher configuration
#[derive(Debug, Clone, PartialEq, Builder, Serialize, Deserialize)]
#[builder(setter(into, strip_option))]
#[serde(rename_all = "camelCase")]
pub struct LauncherConfig {
    /// Interpreter executable, looked up on `PATH` when it is a bare name
    #[builder(default = "default_interpreter()")]
    #[serde(default = "default_interpreter")]
    pub interpreter: String,

    /// Script handed to the interpreter as its only argument
    #[builder(default = "default_script()")]
    #[serde(default = "default_script")]
    pub script: PathBuf,

    #[builder(default)]
    #[serde(default)]
    pub script_base: ScriptBase,

    /// Name used for the child in completion messages
    #[builder(default = "default_label()")]
    #[serde(default = "default_label")]
    pub label: String,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            interpreter: default_interpreter(),
            script: default_script(),
            script_base: ScriptBase::default(),
            label: default_label(),
        }
    }
}

impl LauncherConfig {
    pub fn builder() -> LauncherConfigBuilder {
        LauncherConfigBuilder::default()
    }

    /// Load a configuration from a JSON file; missing fields take their defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, LauncherError> {
        let path = path.as_ref();
        let config_error = |source: anyhow::Error| LauncherError::ConfigFile {
            path: path.to_path_buf(),
            source,
        };

        let raw = std::fs::read_to_string(path)
            .map_err(|e| config_error(e.into()))?;
        let config: Self = serde_json::from_str(&raw)
            .map_err(|e| config_error(e.into()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration and return errors if invalid
    pub fn validate(&self) -> Result<(), LauncherError> {
        if self.interpreter.trim().is_empty() {
            return Err(LauncherError::Configuration(
                "interpreter must not be empty".to_string(),
            ));
        }

        if self.script.as_os_str().is_empty() {
            return Err(LauncherError::Configuration(
                "script path must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Resolve the script path against the configured base directory.
    ///
    /// Absolute paths are returned unchanged. The file is not required to exist.
    pub fn resolve_script_path(&self) -> Result<PathBuf, LauncherError> {
        if self.script.is_absolute() {
            return Ok(self.script.clone());
        }

        let base = match &self.script_base {
            ScriptBase::LauncherDir => launcher_dir()?,
            ScriptBase::WorkingDir => std::env::current_dir().map_err(LauncherError::ScriptPath)?,
            ScriptBase::Dir(dir) => dir.clone(),
        };

        Ok(base.join(&self.script))
    }
}

fn launcher_dir() -> Result<PathBuf, LauncherError> {
    let exe = std::env::current_exe().map_err(LauncherError::ScriptPath)?;
    exe.parent().map(Path::to_path_buf).ok_or_else(|| {
        LauncherError::ScriptPath(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "launcher executable has no parent directory",
        ))
    })
}

// Default value functions for serde
fn default_interpreter() -> String {
    "python".to_string()
}
fn default_script() -> PathBuf {
    PathBuf::from("izmir_ulasim_main.py")
}
fn default_label() -> String {
    "Python script".to_string()
}
