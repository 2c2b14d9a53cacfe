use crate::error::LauncherError;
use crate::process::{ProcessId, ProcessStatus};

/// Observable lifecycle of a single launch
///
/// `Starting -> Running -> Terminated` or `Starting -> Failed`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchState {
    Starting,
    Running { pid: ProcessId },
    Terminated(ProcessStatus),
    /// Carries the rendered error; the error value itself lives in [`LaunchOutcome`]
    Failed(String),
}

impl LaunchState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, LaunchState::Terminated(_) | LaunchState::Failed(_))
    }

    pub fn pid(&self) -> Option<ProcessId> {
        match self {
            LaunchState::Running { pid } => Some(*pid),
            _ => None,
        }
    }
}

/// Final result of a launch, produced exactly once by the supervisor
#[derive(Debug)]
pub enum LaunchOutcome {
    Terminated(ProcessStatus),
    Failed(LauncherError),
}

impl LaunchOutcome {
    pub fn status(&self) -> Option<&ProcessStatus> {
        match self {
            LaunchOutcome::Terminated(status) => Some(status),
            LaunchOutcome::Failed(_) => None,
        }
    }

    pub fn error(&self) -> Option<&LauncherError> {
        match self {
            LaunchOutcome::Terminated(_) => None,
            LaunchOutcome::Failed(error) => Some(error),
        }
    }

    pub(crate) fn to_state(&self) -> LaunchState {
        match self {
            LaunchOutcome::Terminated(status) => LaunchState::Terminated(status.clone()),
            LaunchOutcome::Failed(error) => LaunchState::Failed(error.to_string()),
        }
    }
}
