//! Intent handling for the console: owns the session and turns UI actions
//! into backend commands and backend events into session transitions.

use client_core::{Session, SettleOutcome, TransportError};
use crossbeam_channel::Sender;
use shared::domain::QueryMode;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{classify_backend_failure, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;

pub struct ConsoleController {
    session: Session,
    cmd_tx: Sender<BackendCommand>,
    status: String,
    backend_failure: Option<String>,
}

impl ConsoleController {
    pub fn new(cmd_tx: Sender<BackendCommand>, initial_user_id: Option<String>) -> Self {
        Self {
            session: Session::with_user_id(initial_user_id.unwrap_or_default()),
            cmd_tx,
            status: "Ready".to_string(),
            backend_failure: None,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn backend_failure(&self) -> Option<&str> {
        self.backend_failure.as_deref()
    }

    pub fn edit_user_id(&mut self, raw: String) {
        if raw != self.session.user_id() {
            self.session.set_user_id(raw);
        }
    }

    pub fn select_mode(&mut self, mode: QueryMode) {
        self.session.select_mode(mode);
    }

    /// Requests the active mode for the id currently in the input field.
    pub fn submit(&mut self) {
        self.request(self.session.mode());
    }

    pub fn request(&mut self, mode: QueryMode) {
        let raw = self.session.user_id().to_string();
        let ticket = match self.session.begin(mode, &raw) {
            Ok(ticket) => ticket,
            Err(err) => {
                self.status = err.to_string();
                return;
            }
        };

        self.status = format!(
            "Loading {} for {}...",
            mode.label().to_ascii_lowercase(),
            ticket.user_id()
        );
        let cmd = BackendCommand::for_ticket(ticket);
        if let Err(cmd) = dispatch_backend_command(&self.cmd_tx, cmd, &mut self.status) {
            let reason = self.status.clone();
            self.session
                .settle(cmd.into_ticket(), Err(TransportError::Network(reason)));
        }
    }

    pub fn apply(&mut self, event: UiEvent) {
        match event {
            UiEvent::Info(message) => {
                self.status = message;
            }
            UiEvent::BackendFailed(message) => {
                let message = classify_backend_failure(&message);
                self.status = message.clone();
                self.backend_failure = Some(message);
            }
            UiEvent::Settled(settlement) => {
                let mode = settlement.ticket.mode();
                let user_id = settlement.ticket.user_id().to_string();
                match self.session.settle_with(settlement) {
                    SettleOutcome::Applied => {
                        self.status = match self.session.error() {
                            Some(error) => error.to_string(),
                            None => format!(
                                "Loaded {} for {user_id}",
                                mode.label().to_ascii_lowercase()
                            ),
                        };
                    }
                    SettleOutcome::Stale => {
                        tracing::debug!(?mode, %user_id, "ignored superseded response");
                    }
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../tests/console_tests.rs"]
mod tests;
