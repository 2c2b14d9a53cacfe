use crate::error::LauncherError;
use crate::process::ProcessStatus;
use crate::stdio::{LauncherStdErr, LauncherStdOut};
use async_trait::async_trait;
use tracing::warn;

/// Receives the single completion notification of a launch.
///
/// For any launch exactly one of the two methods is called, exactly once.
#[async_trait]
pub trait CompletionHandler: Send + Sync {
    /// The child ran and terminated
    async fn on_exit(&self, status: &ProcessStatus);

    /// The child could not be started, or could not be waited on
    async fn on_error(&self, error: &LauncherError);
}

/// Default handler: reports the outcome on the launcher's own stdout/stderr
#[derive(Clone)]
pub struct ConsoleReporter {
    label: String,
    out: LauncherStdOut,
    err: LauncherStdErr,
}

impl ConsoleReporter {
    pub fn new(label: impl Into<String>) -> Self {
        Self::with_streams(label, LauncherStdOut::stdout(), LauncherStdErr::stderr())
    }

    pub fn with_streams(
        label: impl Into<String>,
        out: LauncherStdOut,
        err: LauncherStdErr,
    ) -> Self {
        Self {
            label: label.into(),
            out,
            err,
        }
    }

    fn exit_message(&self, status: &ProcessStatus) -> String {
        match status {
            ProcessStatus::Exited(0) => format!("{} finished successfully.", self.label),
            ProcessStatus::Exited(code) => format!("{} exited with code {code}", self.label),
            signaled => format!("{} was terminated by {signaled}", self.label),
        }
    }
}

#[async_trait]
impl CompletionHandler for ConsoleReporter {
    async fn on_exit(&self, status: &ProcessStatus) {
        let message = self.exit_message(status);
        let written = if status.success() {
            self.out.print(&message).await
        } else {
            self.err.print(&message).await
        };

        if let Err(e) = written {
            warn!("Could not write exit diagnostic: {e}");
        }
    }

    async fn on_error(&self, error: &LauncherError) {
        let message = format!("Failed to start {}: {error}", self.label);
        if let Err(e) = self.err.print(&message).await {
            warn!("Could not write launch failure diagnostic: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stdio::CaptureBuffer;

    fn capture_reporter() -> (ConsoleReporter, CaptureBuffer, CaptureBuffer) {
        let out = CaptureBuffer::new();
        let err = CaptureBuffer::new();
        let reporter = ConsoleReporter::with_streams(
            "Python script",
            LauncherStdOut::new(Box::new(out.clone())),
            LauncherStdErr::new(Box::new(err.clone())),
        );
        (reporter, out, err)
    }

    #[tokio::test]
    async fn test_success_goes_to_stdout_only() {
        let (reporter, out, err) = capture_reporter();
        reporter.on_exit(&ProcessStatus::Exited(0)).await;
        assert_eq!(out.contents(), "Python script finished successfully.\n");
        assert!(err.contents().is_empty());
    }

    #[tokio::test]
    async fn test_nonzero_exit_names_the_code() {
        for code in [1, 2, 127, 255, -1] {
            let (reporter, out, err) = capture_reporter();
            reporter.on_exit(&ProcessStatus::Exited(code)).await;
            assert_eq!(
                err.contents(),
                format!("Python script exited with code {code}\n")
            );
            assert!(out.contents().is_empty());
        }
    }

    #[tokio::test]
    async fn test_signal_is_reported_as_error() {
        let (reporter, out, err) = capture_reporter();
        reporter
            .on_exit(&ProcessStatus::Signaled {
                signal: 9,
                name: Some("SIGKILL"),
            })
            .await;
        assert_eq!(
            err.contents(),
            "Python script was terminated by signal 9 (SIGKILL)\n"
        );
        assert!(out.contents().is_empty());
    }

    #[tokio::test]
    async fn test_launch_failure_includes_cause() {
        let (reporter, out, err) = capture_reporter();
        let error = LauncherError::SpawnFailed {
            command: "python".to_string(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        reporter.on_error(&error).await;

        let written = err.contents();
        assert!(written.starts_with("Failed to start Python script: "));
        assert!(written.contains("`python`"));
        assert_eq!(written.lines().count(), 1);
        assert!(out.contents().is_empty());
    }
}
