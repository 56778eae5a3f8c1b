//! UI layer for the desktop GUI: the job-posting form and its result modal.

pub mod app;

pub use app::{JobGuardApp, StartupConfig};
