//! Izmir launcher - run the transit MCP server script under a Python interpreter
//!
//! The platform-specific process manager is selected at compile time; everything
//! else lives in `izmir-launcher-core` and is re-exported from here.

use std::sync::Arc;

// Re-export core functionality
pub use izmir_launcher_core::*;

#[cfg(not(any(unix, windows)))]
compile_error!("Unsupported platform: only Unix and Windows are currently supported");

/// Platform-independent factory that selects the appropriate implementation at compile time
pub struct PlatformProcessManagerFactory;

impl ProcessManagerFactory for PlatformProcessManagerFactory {
    #[cfg(unix)]
    type Manager = izmir_launcher_unix::UnixProcessManager;

    #[cfg(windows)]
    type Manager = izmir_launcher_windows::WindowsProcessManager;

    fn create_process_manager() -> Self::Manager {
        #[cfg(unix)]
        return izmir_launcher_unix::UnixProcessManagerFactory::create_process_manager();

        #[cfg(windows)]
        return izmir_launcher_windows::WindowsProcessManagerFactory::create_process_manager();
    }

    fn platform_name() -> &'static str {
        #[cfg(unix)]
        return izmir_launcher_unix::UnixProcessManagerFactory::platform_name();

        #[cfg(windows)]
        return izmir_launcher_windows::WindowsProcessManagerFactory::platform_name();
    }
}

pub type PlatformProcessManager = <PlatformProcessManagerFactory as ProcessManagerFactory>::Manager;

/// High-level launcher bound to the current platform's process manager
#[derive(Clone)]
pub struct IzmirLauncher {
    inner: Launcher<PlatformProcessManager>,
}

impl IzmirLauncher {
    /// Create a launcher that reports on the real stdout/stderr
    pub fn new(config: LauncherConfig) -> Self {
        Self {
            inner: Launcher::new(config, Self::manager()),
        }
    }

    /// Create a launcher that writes its completion messages to the given sinks
    pub fn new_with_buffers(
        config: LauncherConfig,
        out: LauncherStdOut,
        err: LauncherStdErr,
    ) -> Self {
        Self {
            inner: Launcher::new_with_buffers(config, Self::manager(), out, err),
        }
    }

    /// Create a launcher with a custom completion handler
    pub fn with_handler(config: LauncherConfig, handler: Arc<dyn CompletionHandler>) -> Self {
        Self {
            inner: Launcher::with_handler(config, Self::manager(), handler),
        }
    }

    fn manager() -> Arc<PlatformProcessManager> {
        Arc::new(PlatformProcessManagerFactory::create_process_manager())
    }

    pub fn config(&self) -> &LauncherConfig {
        self.inner.config()
    }

    /// Start the child and return immediately
    pub fn launch(&self) -> LaunchHandle {
        self.inner.launch()
    }

    /// Start the child and wait until its outcome has been reported
    pub async fn run(&self) -> Result<LaunchOutcome, LauncherError> {
        self.launch().wait().await
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::io::Write;

    struct Fixture {
        dir: tempfile::TempDir,
        out: CaptureBuffer,
        err: CaptureBuffer,
    }

    impl Fixture {
        fn new(script_body: &str) -> Self {
            let dir = tempfile::tempdir().unwrap();
            let mut file = std::fs::File::create(dir.path().join("stub.sh")).unwrap();
            writeln!(file, "{script_body}").unwrap();
            Self {
                dir,
                out: CaptureBuffer::new(),
                err: CaptureBuffer::new(),
            }
        }

        fn launcher(&self, interpreter: &str) -> IzmirLauncher {
            let config = LauncherConfig::builder()
                .interpreter(interpreter)
                .script("stub.sh")
                .script_base(ScriptBase::Dir(self.dir.path().to_path_buf()))
                .build()
                .unwrap();
            IzmirLauncher::new_with_buffers(
                config,
                LauncherStdOut::new(Box::new(self.out.clone())),
                LauncherStdErr::new(Box::new(self.err.clone())),
            )
        }
    }

    #[test]
    fn test_platform_detection() {
        assert_eq!(PlatformProcessManagerFactory::platform_name(), "Unix");
        let _process_manager = PlatformProcessManagerFactory::create_process_manager();
    }

    #[tokio::test]
    async fn test_successful_child_reports_on_stdout() {
        let fixture = Fixture::new("exit 0");
        let outcome = fixture.launcher("sh").run().await.unwrap();

        assert_eq!(outcome.status(), Some(&ProcessStatus::Exited(0)));
        assert_eq!(
            fixture.out.contents(),
            "Python script finished successfully.\n"
        );
        assert!(fixture.err.contents().is_empty());
    }

    #[tokio::test]
    async fn test_failing_child_reports_code_on_stderr() {
        let fixture = Fixture::new("exit 2");
        let outcome = fixture.launcher("sh").run().await.unwrap();

        assert_eq!(outcome.status(), Some(&ProcessStatus::Exited(2)));
        assert_eq!(fixture.err.contents(), "Python script exited with code 2\n");
        assert!(fixture.out.contents().is_empty());
    }

    #[tokio::test]
    async fn test_missing_interpreter_reports_launch_failure() {
        let fixture = Fixture::new("exit 0");
        let outcome = fixture
            .launcher("izmir-launcher-no-such-interpreter")
            .run()
            .await
            .unwrap();

        assert!(outcome.error().is_some_and(LauncherError::is_not_found));
        let err = fixture.err.contents();
        assert!(err.starts_with("Failed to start Python script: "));
        assert_eq!(err.lines().count(), 1);
        assert!(!err.contains("exited with code"));
        assert!(fixture.out.contents().is_empty());
    }

    #[tokio::test]
    async fn test_launch_exposes_running_pid() {
        let fixture = Fixture::new("sleep 1");
        let mut handle = fixture.launcher("sh").launch();

        let state = handle.started().await;
        assert!(state.pid().is_some());

        let outcome = handle.wait().await.unwrap();
        assert!(outcome.status().is_some_and(ProcessStatus::success));
    }
}
