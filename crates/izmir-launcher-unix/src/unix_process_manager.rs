#[cfg(unix)]
mod unix_impl {
    use async_trait::async_trait;
    use izmir_launcher_core::{
        LauncherError, ProcessHandle, ProcessId, ProcessLifecycle, ProcessStatus,
    };
    use nix::sys::signal::Signal;
    use std::ffi::OsString;
    use std::os::unix::process::ExitStatusExt;
    use std::process::{ExitStatus, Stdio};
    use tokio::process::{Child, Command};
    use tracing::{debug, info};

    /// Unix-specific process handle implementation
    pub struct UnixProcessHandle {
        child: Child,
        command: String,
        args: Vec<OsString>,
    }

    impl UnixProcessHandle {
        pub fn new(child: Child, command: String, args: Vec<OsString>) -> Self {
            Self {
                child,
                command,
                args,
            }
        }
    }

    #[async_trait]
    impl ProcessHandle for UnixProcessHandle {
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
            debug!(
                "Unix process {} exited with raw status {status}",
                self.command
            );
            Ok(decode_status(status))
        }
    }

    /// Map a raw wait status to an exit code or a named signal
    pub fn decode_status(status: ExitStatus) -> ProcessStatus {
        if let Some(code) = status.code() {
            return ProcessStatus::Exited(code);
        }

        match status.signal() {
            Some(signal) => ProcessStatus::Signaled {
                signal,
                name: Signal::try_from(signal).ok().map(Signal::as_str),
            },
            // wait(2) is never asked for stopped/continued children
            None => ProcessStatus::Exited(status.into_raw()),
        }
    }

    /// Unix-specific process manager
    #[derive(Debug, Default)]
    pub struct UnixProcessManager;

    impl UnixProcessManager {
        pub fn new() -> Self {
            info!("Initializing Unix process manager");
            Self
        }
    }

    #[async_trait]
    impl ProcessLifecycle for UnixProcessManager {
        type Handle = UnixProcessHandle;

        async fn spawn_process(
            &self,
            command: &str,
            args: &[OsString],
        ) -> Result<UnixProcessHandle, LauncherError> {
            let mut cmd = Command::new(command);
            cmd.args(args)
                .stdin(Stdio::inherit())
                .stdout(Stdio::inherit())
                .stderr(Stdio::inherit());

            // The child stays in our process group so terminal signals reach it as well
            let child = cmd.spawn().map_err(|source| LauncherError::SpawnFailed {
                command: command.to_string(),
                source,
            })?;

            if let Some(pid) = child.id() {
                info!(
                    "Spawned Unix process: {} (PID: {}) with args: {:?}",
                    command, pid, args
                );
            }

            Ok(UnixProcessHandle::new(
                child,
                command.to_string(),
                args.to_vec(),
            ))
        }
    }

}

// Re-export the Unix implementation when on Unix systems
#[cfg(unix)]
pub use unix_impl::{UnixProcessHandle, UnixProcessManager, decode_status};

// Provide stub implementations for non-Unix systems
#[cfg(not(unix))]
pub struct UnixProcessHandle;

#[cfg(not(unix))]
#[derive(Debug, Default)]
pub struct UnixProcessManager;

#[cfg(not(unix))]
impl UnixProcessManager {
    pub fn new() -> Self {
        Self
    }
}
