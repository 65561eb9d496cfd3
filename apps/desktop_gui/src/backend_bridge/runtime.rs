//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::{AgentApi, ClientConfig, HttpAgentClient, Settlement};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

/// Starts the worker thread. Each command runs as its own task, so a later
/// request may settle before an earlier one; the session sorts that out.
pub fn launch(config: ClientConfig, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::BackendFailed(format!(
                    "backend worker startup failure: failed to build runtime: {err}"
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        let api_url = config.base_url.to_string();
        let client: Arc<dyn AgentApi> = match HttpAgentClient::new(config) {
            Ok(client) => Arc::new(client),
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::BackendFailed(format!(
                    "backend worker startup failure: {err}"
                )));
                tracing::error!("failed to build agent client: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let _ = ui_tx.try_send(UiEvent::Info(format!("Connected to {api_url}")));
            tracing::info!(%api_url, "backend worker ready");

            while let Ok(cmd) = cmd_rx.recv() {
                let cmd_name = cmd.name();
                let ticket = cmd.into_ticket();
                let client = client.clone();
                let ui_tx = ui_tx.clone();
                tokio::spawn(async move {
                    let outcome = ticket.execute(client.as_ref()).await;
                    let seq = ticket.seq();
                    if ui_tx
                        .try_send(UiEvent::Settled(Settlement { ticket, outcome }))
                        .is_err()
                    {
                        tracing::warn!(command = cmd_name, seq, "ui event queue unavailable; dropping settlement");
                    }
                });
            }
            tracing::info!("ui command queue closed; backend worker exiting");
        });
    });
}
