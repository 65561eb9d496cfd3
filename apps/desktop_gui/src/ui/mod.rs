//! UI layer for the console: app shell and badge theme.

pub mod app;
pub mod theme;

pub use app::{AgentConsoleApp, StartupConfig};
