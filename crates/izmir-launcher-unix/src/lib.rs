mod unix_process_manager;

#[cfg(unix)]
use izmir_launcher_core::ProcessManagerFactory;

pub use unix_process_manager::{UnixProcessHandle, UnixProcessManager};

#[cfg(unix)]
pub use unix_process_manager::decode_status;

pub struct UnixProcessManagerFactory;

#[cfg(unix)]
impl ProcessManagerFactory for UnixProcessManagerFactory {
    type Manager = UnixProcessManager;

    fn create_process_manager() -> UnixProcessManager {
        UnixProcessManager::new()
    }

    fn platform_name() -> &'static str {
        "Unix"
    }
}
