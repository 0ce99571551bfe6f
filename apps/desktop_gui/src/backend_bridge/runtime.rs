//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread, time::Duration};

use client_core::{fetch_with_latency, RecordSource};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorCategory, UiErrorContext, UiEvent};

pub fn launch(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    source: Arc<dyn RecordSource>,
    latency: Duration,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::new(
                    UiErrorCategory::Startup,
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        let _ = ui_tx.try_send(UiEvent::BackendReady);
        serve_commands(&runtime, &cmd_rx, &ui_tx, source.as_ref(), latency);
        tracing::info!("backend worker stopped");
    })
}

/// Handles commands one at a time until the UI side hangs up.
fn serve_commands(
    runtime: &tokio::runtime::Runtime,
    cmd_rx: &Receiver<BackendCommand>,
    ui_tx: &Sender<UiEvent>,
    source: &dyn RecordSource,
    latency: Duration,
) {
    while let Ok(cmd) = cmd_rx.recv() {
        tracing::debug!(command = cmd.name(), "backend received command");
        let event = match cmd {
            BackendCommand::FetchBatch(request) => {
                match runtime.block_on(fetch_with_latency(source, request, latency)) {
                    Ok(records) => UiEvent::BatchLoaded {
                        cursor: request.cursor,
                        records,
                    },
                    Err(error) => UiEvent::BatchFailed {
                        cursor: request.cursor,
                        error,
                    },
                }
            }
        };
        if ui_tx.send(event).is_err() {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use client_core::{BatchRequest, MockRecordSource};
    use crossbeam_channel::bounded;

    #[test]
    fn worker_answers_fetch_with_matching_batch() {
        let (cmd_tx, cmd_rx) = bounded(4);
        let (ui_tx, ui_rx) = bounded(4);
        let source: Arc<dyn RecordSource> = Arc::new(MockRecordSource::generate(30, Some(5)));
        let handle = launch(cmd_rx, ui_tx, source, Duration::ZERO);

        assert!(matches!(ui_rx.recv().expect("ready"), UiEvent::BackendReady));
        cmd_tx
            .send(BackendCommand::FetchBatch(BatchRequest {
                cursor: 2,
                batch_size: 10,
            }))
            .expect("queue command");

        match ui_rx.recv().expect("batch event") {
            UiEvent::BatchLoaded { cursor, records } => {
                assert_eq!(cursor, 2);
                let ids: Vec<i64> = records.iter().map(|r| r.id.0).collect();
                assert_eq!(ids, (21..=30).collect::<Vec<_>>());
            }
            _ => panic!("expected BatchLoaded"),
        }

        drop(cmd_tx);
        handle.join().expect("worker exits");
    }

    #[test]
    fn worker_reports_fetch_failure() {
        let (cmd_tx, cmd_rx) = bounded(4);
        let (ui_tx, ui_rx) = bounded(4);
        let source: Arc<dyn RecordSource> =
            Arc::new(MockRecordSource::generate(30, Some(5)).fail_on_batch(0));
        let handle = launch(cmd_rx, ui_tx, source, Duration::ZERO);

        assert!(matches!(ui_rx.recv().expect("ready"), UiEvent::BackendReady));
        cmd_tx
            .send(BackendCommand::FetchBatch(BatchRequest {
                cursor: 0,
                batch_size: 10,
            }))
            .expect("queue command");
        assert!(matches!(
            ui_rx.recv().expect("batch event"),
            UiEvent::BatchFailed { cursor: 0, .. }
        ));

        drop(cmd_tx);
        handle.join().expect("worker exits");
    }
}
