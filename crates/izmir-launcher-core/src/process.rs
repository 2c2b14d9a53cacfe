use crate::error::LauncherError;
use async_trait::async_trait;
use std::ffi::OsString;
use std::fmt;

/// Unique identifier for a process
pub type ProcessId = u32;

/// How a child process ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessStatus {
    /// Process exited on its own with the given exit code
    Exited(i32),
    /// Process was killed by a signal (Unix only)
    Signaled {
        signal: i32,
        name: Option<&'static str>,
    },
}

impl ProcessStatus {
    /// Exit code, if the process exited rather than being signalled
    pub fn code(&self) -> Option<i32> {
        match self {
            ProcessStatus::Exited(code) => Some(*code),
            ProcessStatus::Signaled { .. } => None,
        }
    }

    pub fn success(&self) -> bool {
        self.code() == Some(0)
    }
}

impl fmt::Display for ProcessStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessStatus::Exited(code) => write!(f, "exit code {code}"),
            ProcessStatus::Signaled {
                signal,
                name: Some(name),
            } => write!(f, "signal {signal} ({name})"),
            ProcessStatus::Signaled { signal, name: None } => write!(f, "signal {signal}"),
        }
    }
}

/// Trait representing a handle to a spawned process
#[async_trait]
pub trait ProcessHandle: Send {
    /// Get the process ID (None once the process has been reaped)
    fn get_pid(&self) -> Option<ProcessId>;

    /// Get the command that started this process
    fn get_command(&self) -> &str;

    /// Get the arguments passed to this process
    fn get_args(&self) -> &[OsString];

    /// Wait for the process to exit
    async fn wait(&mut self) -> Result<ProcessStatus, LauncherError>;
}

/// Core trait for starting processes
///
/// Implementations must connect the child's stdin, stdout and stderr to the
/// parent's own streams and must not check that `command` exists beforehand;
/// a missing executable is reported as [`LauncherError::SpawnFailed`].
#[async_trait]
pub trait ProcessLifecycle: Send + Sync {
    /// The type of process handle this lifecycle manager produces
    type Handle: ProcessHandle + 'static;

    /// Spawn a new process with the given command and arguments
    async fn spawn_process(
        &self,
        command: &str,
        args: &[OsString],
    ) -> Result<Self::Handle, LauncherError>;
}

/// Factory trait for creating platform-specific process managers
pub trait ProcessManagerFactory {
    /// The type of process manager this factory creates
    type Manager: ProcessLifecycle;

    /// Create a process manager for the current platform
    fn create_process_manager() -> Self::Manager;

    /// Get the platform name for logging and debugging
    fn platform_name() -> &'static str;
}
