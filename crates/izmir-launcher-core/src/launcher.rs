use crate::config::LauncherConfig;
use crate::error::LauncherError;
use crate::process::{ProcessHandle, ProcessId, ProcessLifecycle};
use crate::report::{CompletionHandler, ConsoleReporter};
use crate::state::{LaunchOutcome, LaunchState};
use crate::stdio::{LauncherStdErr, LauncherStdOut};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Starts the configured interpreter on the configured script and reports how it ended.
///
/// The child inherits the launcher's standard streams. Its outcome is reported
/// through a [`CompletionHandler`] and never turned into an error for the caller.
pub struct Launcher<Manager> {
    config: LauncherConfig,
    process_manager: Arc<Manager>,
    handler: Arc<dyn CompletionHandler>,
}

impl<Manager> Clone for Launcher<Manager> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            process_manager: self.process_manager.clone(),
            handler: self.handler.clone(),
        }
    }
}

impl<Manager: ProcessLifecycle + 'static> Launcher<Manager> {
    pub fn new(config: LauncherConfig, process_manager: Arc<Manager>) -> Self {
        let reporter = ConsoleReporter::new(config.label.clone());
        Self::with_handler(config, process_manager, Arc::new(reporter))
    }

    pub fn new_with_buffers(
        config: LauncherConfig,
        process_manager: Arc<Manager>,
        out: LauncherStdOut,
        err: LauncherStdErr,
    ) -> Self {
        let reporter = ConsoleReporter::with_streams(config.label.clone(), out, err);
        Self::with_handler(config, process_manager, Arc::new(reporter))
    }

    pub fn with_handler(
        config: LauncherConfig,
        process_manager: Arc<Manager>,
        handler: Arc<dyn CompletionHandler>,
    ) -> Self {
        Self {
            config,
            process_manager,
            handler,
        }
    }

    pub fn config(&self) -> &LauncherConfig {
        &self.config
    }

    /// Start the child without waiting for it.
    ///
    /// Must be called from within a tokio runtime. Spawn errors are not returned
    /// here; they reach the completion handler like every other outcome.
    pub fn launch(&self) -> LaunchHandle {
        let (state_tx, state_rx) = watch::channel(LaunchState::Starting);
        let task = tokio::spawn(supervise(
            self.config.clone(),
            self.process_manager.clone(),
            self.handler.clone(),
            state_tx,
        ));

        LaunchHandle {
            state: state_rx,
            task,
        }
    }
}

async fn start<Manager: ProcessLifecycle>(
    config: &LauncherConfig,
    manager: &Manager,
) -> Result<Manager::Handle, LauncherError> {
    let script = config.resolve_script_path()?;
    info!(
        "Launching {} with script {}",
        config.interpreter,
        script.display()
    );
    manager
        .spawn_process(&config.interpreter, &[script.into_os_string()])
        .await
}

async fn supervise<Manager: ProcessLifecycle>(
    config: LauncherConfig,
    manager: Arc<Manager>,
    handler: Arc<dyn CompletionHandler>,
    state: watch::Sender<LaunchState>,
) -> LaunchOutcome {
    let outcome = match start(&config, manager.as_ref()).await {
        Ok(mut child) => {
            // pid is only missing once the child has already been reaped
            if let Some(pid) = child.get_pid() {
                state.send_replace(LaunchState::Running { pid });
                debug!("{} running as PID {pid}", child.get_command());
            }

            match child.wait().await {
                Ok(status) => LaunchOutcome::Terminated(status),
                Err(e) => LaunchOutcome::Failed(e),
            }
        }
        Err(e) => LaunchOutcome::Failed(e),
    };

    match &outcome {
        LaunchOutcome::Terminated(status) => {
            debug!("{} terminated with {status}", config.label);
            handler.on_exit(status).await;
        }
        LaunchOutcome::Failed(e) => {
            info!("{} failed: {e}", config.label);
            handler.on_error(e).await;
        }
    }

    state.send_replace(outcome.to_state());
    outcome
}

/// Handle to an in-flight launch
pub struct LaunchHandle {
    state: watch::Receiver<LaunchState>,
    task: JoinHandle<LaunchOutcome>,
}

impl LaunchHandle {
    /// Current state of the launch
    pub fn state(&self) -> LaunchState {
        self.state.borrow().clone()
    }

    /// PID of the child while it is running
    pub fn pid(&self) -> Option<ProcessId> {
        self.state.borrow().pid()
    }

    /// Wait until the launch has left `Starting` and return the state it moved to
    pub async fn started(&mut self) -> LaunchState {
        // A closed channel means the supervisor is gone; report whatever it last published
        let _ = self
            .state
            .wait_for(|state| !matches!(state, LaunchState::Starting))
            .await;
        self.state.borrow().clone()
    }

    /// Wait for the completion handler to have run and return the outcome
    pub async fn wait(self) -> Result<LaunchOutcome, LauncherError> {
        self.task
            .await
            .map_err(|e| LauncherError::Supervisor(e.to_string()))
    }
}
