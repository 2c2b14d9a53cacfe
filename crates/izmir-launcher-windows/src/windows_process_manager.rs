#[cfg(windows)]
mod windows_impl {
    use async_trait::async_trait;
    use izmir_launcher_core::{
        LauncherError, ProcessHandle, ProcessId, ProcessLifecycle, ProcessStatus,
    };
    use std::ffi::OsString;
    use std::process::Stdio;
    use tokio::process::{Child, Command};
    use tracing::{debug, info, warn};

    /// Windows-specific process handle implementation
    pub struct WindowsProcessHandle {
        child: Child,
        command: String,
        args: Vec<OsString>,
    }

    impl WindowsProcessHandle {
        pub fn new(child: Child, command: String, args: Vec<OsString>) -> Self {
            Self {
                child,
                command,
                args,
            }
        }
    }

    #[async_trait]
    impl ProcessHandle for WindowsProcessHandle {
        fn get_pid(&self) -> Option<ProcessId> {
            self.child.id()
        }

        fn get_command(&self) -> &str {
            &self.command
        }

        fn get_args(&self) -> &[OsString] {
            &self.args
        }

        async fn wait(&mut self) -> Result<ProcessStatus, LauncherError> {
            let status = self.child.wait().await.map_err(LauncherError::WaitFailed)?;
            debug!("Windows process {} exited with {status}", self.command);

            // Windows always reports an exit code, TerminateProcess included
            match status.code() {
                Some(code) => Ok(ProcessStatus::Exited(code)),
                None => {
                    warn!("Windows process {} reported no exit code", self.command);
                    Ok(ProcessStatus::Exited(-1))
                }
            }
        }
    }

    /// Windows-specific process manager
    #[derive(Debug, Default)]
    pub struct WindowsProcessManager;

    impl WindowsProcessManager {
        pub fn new() -> Self {
            info!("Initializing Windows process manager");
            Self
        }
    }

    #[async_trait]
    impl ProcessLifecycle for WindowsProcessManager {
        type Handle = WindowsProcessHandle;

        async fn spawn_process(
            &self,
            command: &str,
            args: &[OsString],
        ) -> Result<WindowsProcessHandle, LauncherError> {
            let mut cmd = Command::new(command);
            cmd.args(args)
                .stdin(Stdio::inherit())
                .stdout(Stdio::inherit())
                .stderr(Stdio::inherit());

            let child = cmd.spawn().map_err(|source| LauncherError::SpawnFailed {
                command: command.to_string(),
                source,
            })?;

            if let Some(pid) = child.id() {
                info!(
                    "Spawned Windows process: {} (PID: {}) with args: {:?}",
                    command, pid, args
                );
            }

            Ok(WindowsProcessHandle::new(
                child,
                command.to_string(),
                args.to_vec(),
            ))
        }
    }

}

#[cfg(windows)]
pub use windows_impl::{WindowsProcessHandle, WindowsProcessManager};

// Provide stub implementations for non-Windows systems
#[cfg(not(windows))]
pub struct WindowsProcessHandle;

#[cfg(not(windows))]
#[derive(Debug, Default)]
pub struct WindowsProcessManager;

#[cfg(not(windows))]
impl WindowsProcessManager {
    pub fn new() -> Self {
        Self
    }
}
