//! izmir-launcher binary
//!
//! Starts the interpreter on the configured script with inherited standard
//! streams, reports how it ended, and always exits 0 afterwards.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use izmir_launcher::{
    IzmirLauncher, LaunchOutcome, LauncherConfig, PlatformProcessManagerFactory,
    ProcessManagerFactory, ScriptBase,
};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "izmir-launcher")]
#[command(
    author,
    version,
    about = "Run the Izmir transit MCP server script",
    long_about = None
)]
struct Cli {
    /// JSON configuration file; flags below override its values
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Interpreter to run (looked up on PATH)
    #[arg(long, env = "IZMIR_LAUNCHER_INTERPRETER")]
    interpreter: Option<String>,

    /// Script passed to the interpreter
    #[arg(long, env = "IZMIR_LAUNCHER_SCRIPT")]
    script: Option<PathBuf>,

    /// Directory a relative script path is resolved against
    #[arg(long, value_enum)]
    base: Option<BaseArg>,

    /// Resolve a relative script path against this directory
    #[arg(long, value_name = "DIR", conflicts_with = "base")]
    base_dir: Option<PathBuf>,

    /// Name used for the child in completion messages
    #[arg(long)]
    label: Option<String>,

    /// Format of the launcher's own log lines (filtered by RUST_LOG)
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, ValueEnum)]
enum BaseArg {
    LauncherDir,
    WorkingDir,
}

#[derive(Clone, Copy, Debug, PartialEq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

impl Cli {
    fn into_config(self) -> Result<LauncherConfig> {
        let mut config = match &self.config {
            Some(path) => LauncherConfig::from_json_file(path)?,
            None => LauncherConfig::default(),
        };

        // An empty value (e.g. `IZMIR_LAUNCHER_INTERPRETER=`) counts as unset
        if let Some(interpreter) = self.interpreter.filter(|i| !i.trim().is_empty()) {
            config.interpreter = interpreter;
        }
        if let Some(script) = self.script.filter(|s| !s.as_os_str().is_empty()) {
            config.script = script;
        }
        if let Some(dir) = self.base_dir {
            config.script_base = ScriptBase::Dir(dir);
        } else if let Some(base) = self.base {
            config.script_base = match base {
                BaseArg::LauncherDir => ScriptBase::LauncherDir,
                BaseArg::WorkingDir => ScriptBase::WorkingDir,
            };
        }
        if let Some(label) = self.label {
            config.label = label;
        }

        config.validate().context("invalid launcher configuration")?;
        Ok(config)
    }
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_format);

    let config = cli.into_config()?;
    info!(
        "Launching on {} with config: {:?}",
        PlatformProcessManagerFactory::platform_name(),
        config
    );

    let launcher = IzmirLauncher::new(config);
    match launcher.launch().wait().await {
        Ok(LaunchOutcome::Failed(e)) if e.is_launch_failure() => {
            debug!("Child was never started: {e}")
        }
        Ok(outcome) => debug!("Launch finished: {outcome:?}"),
        Err(e) => warn!("Launch supervisor ended abnormally: {e}"),
    }

    // The child's outcome has been reported; it is never our exit status
    Ok(())
}
