//! Applies backend events to the dashboard controller.

use client_core::{DashboardController, LoadOutcome};

use crate::controller::events::UiEvent;

pub fn apply_ui_event(
    controller: &mut DashboardController,
    event: UiEvent,
    status: &mut String,
) -> Option<LoadOutcome> {
    match event {
        UiEvent::BackendReady => {
            *status = "Backend worker ready".to_string();
            None
        }
        UiEvent::BatchLoaded { cursor, records } => {
            let outcome = controller.complete_load(cursor, Ok(records));
            if matches!(outcome, LoadOutcome::Loaded { .. }) {
                let view = controller.view();
                *status = format!("Loaded {} records", view.loaded);
            }
            Some(outcome)
        }
        UiEvent::BatchFailed { cursor, error } => {
            *status = format!("Last load failed: {error}");
            Some(controller.complete_load(cursor, Err(error)))
        }
        UiEvent::Error(err) => {
            tracing::error!(context = ?err.context(), "{}", err.message());
            if err.blocks_loading() {
                controller.abort_load(err.message());
            }
            *status = err.message().to_string();
            None
        }
    }
}
