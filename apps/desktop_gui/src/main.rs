use std::{path::PathBuf, sync::Arc};

use anyhow::Context;
use clap::Parser;
use client_core::{
    load_settings, DashboardController, DashboardSettings, MockRecordSource, RecordSource,
};
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

mod backend_bridge;
mod controller;
mod ui;

use backend_bridge::commands::BackendCommand;
use controller::events::UiEvent;
use ui::DashboardApp;

#[derive(Parser, Debug)]
#[command(about = "Paginated, searchable user dashboard")]
struct Args {
    /// Settings file; defaults to ./dashboard.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed for generated ages.
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    latency_ms: Option<u64>,
    /// Make the first fetch of this batch fail.
    #[arg(long)]
    fail_on_batch: Option<usize>,
}

impl Args {
    fn apply(&self, mut settings: DashboardSettings) -> DashboardSettings {
        if let Some(seed) = self.seed {
            settings.seed = Some(seed);
        }
        if let Some(latency_ms) = self.latency_ms {
            settings.latency_ms = latency_ms;
        }
        if let Some(cursor) = self.fail_on_batch {
            settings.fail_on_batch = Some(cursor);
        }
        settings
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let settings = args.apply(
        load_settings(args.config.as_deref()).context("failed to load dashboard settings")?,
    );

    let source: Arc<dyn RecordSource> = Arc::new(MockRecordSource::from_settings(&settings));
    let controller = DashboardController::mount(&settings, source);

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(16);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(64);
    backend_bridge::runtime::launch(cmd_rx, ui_tx, controller.source(), settings.latency());

    let app = DashboardApp::new(cmd_tx, ui_rx, controller);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("User Dashboard")
            .with_inner_size([960.0, 760.0])
            .with_min_inner_size([480.0, 420.0]),
        ..Default::default()
    };
    eframe::run_native(
        "User Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(app))),
    )
    .map_err(|err| anyhow::anyhow!("dashboard window failed: {err}"))
}
