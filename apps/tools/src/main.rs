use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    card::EMAIL_SLOT_CHARS, load_settings, render_card, view::END_OF_RECORDS_NOTICE,
    DashboardController, DashboardSettings, LoadOutcome, MockRecordSource,
};
use serde::Serialize;
use shared::domain::UserRecord;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
struct Cli {
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    seed: Option<u64>,
    /// Simulated fetch latency; the dashboard default is 500.
    #[arg(long)]
    latency_ms: Option<u64>,
    /// Make the first fetch of this batch fail.
    #[arg(long)]
    fail_on_batch: Option<usize>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Mount the dashboard, load batches, and print the filtered cards.
    List {
        /// Manual "Load More" requests after the automatic first load.
        #[arg(long, default_value_t = 0)]
        batches: usize,
        /// Keep loading until nothing remains.
        #[arg(long)]
        all: bool,
        #[arg(long, default_value = "")]
        query: String,
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Serialize)]
struct ListReport<'a> {
    loaded: usize,
    matched: usize,
    has_more: bool,
    error: Option<&'a str>,
    records: Vec<&'a UserRecord>,
}

/// Automatic first load, then up to `batches` manual ones (or all of them).
async fn run_session(
    controller: &mut DashboardController,
    batches: usize,
    all: bool,
) {
    if controller.needs_initial_load() {
        controller.load_next_batch().await;
    }

    let mut requested = 0;
    while all || requested < batches {
        requested += 1;
        match controller.load_next_batch().await {
            LoadOutcome::Loaded { .. } => {}
            LoadOutcome::Failed => {
                tracing::warn!(requested, "load failed; stopping");
                break;
            }
            LoadOutcome::Skipped => break,
        }
    }
}

fn apply_cli(cli: &Cli, mut settings: DashboardSettings) -> DashboardSettings {
    if let Some(seed) = cli.seed {
        settings.seed = Some(seed);
    }
    if let Some(latency_ms) = cli.latency_ms {
        settings.latency_ms = latency_ms;
    }
    if let Some(cursor) = cli.fail_on_batch {
        settings.fail_on_batch = Some(cursor);
    }
    settings
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();
    let settings = apply_cli(
        &cli,
        load_settings(cli.config.as_deref()).context("failed to load dashboard settings")?,
    );

    let source = Arc::new(MockRecordSource::from_settings(&settings));
    let mut controller = DashboardController::mount(&settings, source);

    match cli.command {
        Command::List {
            batches,
            all,
            ref query,
            json,
        } => {
            run_session(&mut controller, batches, all).await;
            controller.set_search_query(query.clone());
            let view = controller.view();

            if json {
                let report = ListReport {
                    loaded: view.loaded,
                    matched: view.matched(),
                    has_more: controller.state().has_more,
                    error: view.error_banner,
                    records: view.records.clone(),
                };
                println!("{}", serde_json::to_string_pretty(&report)?);
                return Ok(());
            }

            if let Some(message) = view.error_banner {
                println!("! {message}");
            }
            for record in &view.records {
                println!("{}", render_card(record).to_line(EMAIL_SLOT_CHARS));
            }
            println!(
                "loaded={} matched={} has_more={}",
                view.loaded,
                view.matched(),
                controller.state().has_more
            );
            if view.show_end_notice {
                println!("{END_OF_RECORDS_NOTICE}");
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::error::FETCH_FAILURE_MESSAGE;

    fn mounted(settings: &DashboardSettings) -> DashboardController {
        let source = Arc::new(MockRecordSource::from_settings(settings));
        DashboardController::mount(settings, source)
    }

    #[tokio::test(start_paused = true)]
    async fn session_runs_automatic_then_manual_loads() {
        let mut controller = mounted(&DashboardSettings {
            seed: Some(4),
            ..DashboardSettings::default()
        });
        run_session(&mut controller, 2, false).await;
        assert_eq!(controller.state().loaded_records.len(), 30);
        assert!(controller.state().has_more);
    }

    #[tokio::test(start_paused = true)]
    async fn all_flag_drains_the_source() {
        let mut controller = mounted(&DashboardSettings {
            total_records: 45,
            seed: Some(4),
            ..DashboardSettings::default()
        });
        run_session(&mut controller, 0, true).await;
        assert_eq!(controller.state().loaded_records.len(), 45);
        assert!(controller.view().show_end_notice);
    }

    #[test]
    fn cli_overrides_seed_and_latency() {
        let cli = Cli::parse_from([
            "tools",
            "--seed",
            "3",
            "--latency-ms",
            "0",
            "list",
            "--all",
        ]);
        let settings = apply_cli(&cli, DashboardSettings::default());
        assert_eq!(settings.seed, Some(3));
        assert_eq!(settings.latency_ms, 0);
        assert_eq!(settings.fail_on_batch, None);
        assert!(matches!(cli.command, Command::List { all: true, .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn fail_on_batch_from_settings_stops_the_session() {
        let from_file = DashboardSettings {
            fail_on_batch: Some(1),
            ..DashboardSettings::default()
        };
        let cli = Cli::parse_from(["tools", "list", "--batches", "3"]);
        let settings = apply_cli(&cli, from_file);
        assert_eq!(settings.fail_on_batch, Some(1));

        let mut controller = mounted(&settings);
        run_session(&mut controller, 3, false).await;
        assert_eq!(controller.state().loaded_records.len(), 10);
        assert_eq!(controller.view().error_banner, Some(FETCH_FAILURE_MESSAGE));
    }

    #[test]
    fn fail_on_batch_flag_overrides_settings() {
        let cli = Cli::parse_from(["tools", "--fail-on-batch", "4", "list"]);
        let settings = apply_cli(&cli, DashboardSettings::default());
        assert_eq!(settings.fail_on_batch, Some(4));
    }
}
