//! Backend-to-UI events for the desktop GUI controller.

use client_core::Settlement;

pub enum UiEvent {
    Info(String),
    /// The worker could not start; no request will ever settle.
    BackendFailed(String),
    Settled(Settlement),
}

/// Turns a raw worker startup failure into something an operator can act on.
pub fn classify_backend_failure(message: &str) -> String {
    let lower = message.to_ascii_lowercase();
    if lower.contains("failed to build runtime") {
        "Backend worker startup failure; verify local app environment and relaunch.".to_string()
    } else if lower.contains("http client") || lower.contains("tls") {
        "Could not initialise the HTTP client; check TLS/proxy settings and relaunch.".to_string()
    } else {
        format!("Backend error: {message}")
    }
}
