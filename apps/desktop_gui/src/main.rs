mod backend_bridge;
mod controller;
mod ui;

use anyhow::Context as _;
use clap::Parser;
use client_core::{load_config, normalize_base_url};
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::{commands::BackendCommand, runtime};
use crate::controller::events::UiEvent;
use crate::ui::{AgentConsoleApp, StartupConfig};

#[derive(Debug, Parser)]
#[command(name = "agent_console", about = "Desktop console for the recommendation agent")]
struct Args {
    /// Base URL of the agent service, e.g. http://localhost:8000
    #[arg(long, env = "AGENT_API_URL")]
    api_url: Option<String>,
    /// Prefills the user id field.
    #[arg(long)]
    user_id: Option<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let mut config = load_config().context("failed to load client configuration")?;
    if let Some(raw) = args.api_url.as_deref() {
        config.base_url = normalize_base_url(raw).context("invalid --api-url")?;
    }
    tracing::info!(api_url = %config.base_url, "starting agent console");

    let startup = StartupConfig {
        api_url: config.base_url.to_string(),
        user_id: args.user_id,
    };

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    runtime::launch(config, cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("AI Recommendation Agent")
            .with_inner_size([960.0, 760.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "AI Recommendation Agent",
        options,
        Box::new(|_cc| Ok(Box::new(AgentConsoleApp::new(cmd_tx, ui_rx, startup)))),
    )
    .map_err(|err| anyhow::anyhow!("agent console exited with error: {err}"))
}
