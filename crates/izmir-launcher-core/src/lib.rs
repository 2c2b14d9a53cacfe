//! Izmir launcher core - platform-independent launcher abstractions
//!
//! This crate holds the configuration, error types, process traits and the
//! generic [`Launcher`] shared by the platform-specific process managers.

pub mod config;
pub mod error;
mod launcher;
pub mod process;
mod report;
mod state;
mod stdio;

pub use config::*;
pub use error::*;
pub use launcher::{LaunchHandle, Launcher};
pub use process::*;
pub use report::{CompletionHandler, ConsoleReporter};
pub use state::{LaunchOutcome, LaunchState};
pub use stdio::{CaptureBuffer, LauncherStdErr, LauncherStdOut};
