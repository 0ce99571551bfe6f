//! Load/filter state machine behind the user dashboard.

use std::{sync::Arc, time::Duration};

use shared::{
    domain::UserRecord,
    error::{FetchError, FETCH_FAILURE_MESSAGE},
};
use tracing::{debug, info, warn};

use crate::{
    config::DashboardSettings,
    source::{fetch_with_latency, RecordSource},
    view::{derive_view, DashboardView},
};

/// Slice boundaries for one fetch: `[cursor * batch_size, cursor * batch_size + batch_size)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchRequest {
    pub cursor: usize,
    pub batch_size: usize,
}

impl BatchRequest {
    pub fn start(&self) -> usize {
        self.cursor.saturating_mul(self.batch_size)
    }

    pub fn end(&self) -> usize {
        self.start().saturating_add(self.batch_size)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    Idle { has_more: bool },
    Loading,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded { appended: usize },
    Failed,
    /// A load was already in flight or nothing remains.
    Skipped,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardState {
    pub loaded_records: Vec<UserRecord>,
    pub loading: bool,
    pub error: Option<String>,
    pub search_query: String,
    pub batch_cursor: usize,
    pub has_more: bool,
}

/// Sole owner and mutator of [`DashboardState`].
#[derive(Clone)]
pub struct DashboardController {
    state: DashboardState,
    source: Arc<dyn RecordSource>,
    batch_size: usize,
    total_records: usize,
    latency: Duration,
}

impl DashboardController {
    /// The record total behind `has_more` is read from `source`, the same
    /// provider every batch is fetched from.
    pub fn mount(settings: &DashboardSettings, source: Arc<dyn RecordSource>) -> Self {
        let batch_size = settings.batch_size.max(1);
        let total_records = source.total_records();
        let mut controller = Self {
            state: DashboardState::default(),
            source,
            batch_size,
            total_records,
            latency: settings.latency(),
        };
        controller.state.has_more = controller.remaining_after(0);
        info!(
            batch_size,
            total_records,
            latency_ms = settings.latency_ms,
            "dashboard mounted"
        );
        controller
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    /// Shared handle for workers that fetch on the controller's behalf.
    pub fn source(&self) -> Arc<dyn RecordSource> {
        Arc::clone(&self.source)
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }

    pub fn view(&self) -> DashboardView<'_> {
        derive_view(&self.state)
    }

    pub fn phase(&self) -> LoadPhase {
        if self.state.loading {
            LoadPhase::Loading
        } else if self.state.error.is_some() {
            LoadPhase::Error
        } else {
            LoadPhase::Idle {
                has_more: self.state.has_more,
            }
        }
    }

    /// True until the first batch has been requested for this mount.
    pub fn needs_initial_load(&self) -> bool {
        self.state.batch_cursor == 0
            && !self.state.loading
            && self.state.error.is_none()
            && self.state.has_more
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.state.search_query = query.into();
    }

    /// First half of a load: flips to loading and hands out the slice to fetch.
    /// Returns `None` while a fetch is in flight or once the source is exhausted.
    pub fn begin_load(&mut self) -> Option<BatchRequest> {
        if self.state.loading {
            debug!(cursor = self.state.batch_cursor, "load already in flight");
            return None;
        }
        if !self.state.has_more {
            debug!(cursor = self.state.batch_cursor, "no records remain");
            return None;
        }

        self.state.loading = true;
        self.state.error = None;
        let request = BatchRequest {
            cursor: self.state.batch_cursor,
            batch_size: self.batch_size,
        };
        debug!(cursor = request.cursor, start = request.start(), "batch load started");
        Some(request)
    }

    /// Second half of a load. Applies the whole outcome in one step; a
    /// failure leaves records and cursor exactly as they were.
    pub fn complete_load(
        &mut self,
        cursor: usize,
        result: Result<Vec<UserRecord>, FetchError>,
    ) -> LoadOutcome {
        if !self.state.loading || cursor != self.state.batch_cursor {
            warn!(
                cursor,
                expected = self.state.batch_cursor,
                loading = self.state.loading,
                "ignoring stale batch completion"
            );
            return LoadOutcome::Skipped;
        }

        let outcome = match result {
            Ok(batch) => {
                let appended = batch.len();
                self.state.loaded_records.extend(batch);
                self.state.batch_cursor += 1;
                self.state.has_more = self.remaining_after(self.state.batch_cursor);
                debug!(
                    cursor = self.state.batch_cursor,
                    appended,
                    loaded = self.state.loaded_records.len(),
                    has_more = self.state.has_more,
                    "batch load finished"
                );
                LoadOutcome::Loaded { appended }
            }
            Err(err) => {
                warn!(cursor, "batch load failed: {err}");
                self.state.error = Some(err.user_message().to_string());
                LoadOutcome::Failed
            }
        };
        self.state.loading = false;
        outcome
    }

    /// Marks the in-flight load as failed without a fetch result, e.g. when
    /// the request could not be handed to a worker.
    pub fn abort_load(&mut self, reason: &str) {
        if self.state.loading {
            warn!(cursor = self.state.batch_cursor, "batch load aborted: {reason}");
            self.state.loading = false;
            self.state.error = Some(FETCH_FAILURE_MESSAGE.to_string());
        }
    }

    /// Full load cycle driven inline: begin, simulated latency, fetch, complete.
    pub async fn load_next_batch(&mut self) -> LoadOutcome {
        let Some(request) = self.begin_load() else {
            return LoadOutcome::Skipped;
        };
        let source = Arc::clone(&self.source);
        let result = fetch_with_latency(source.as_ref(), request, self.latency).await;
        self.complete_load(request.cursor, result)
    }

    fn remaining_after(&self, cursor: usize) -> bool {
        cursor.saturating_mul(self.batch_size) < self.total_records
    }
}

#[cfg(test)]
#[path = "tests/dashboard_tests.rs"]
mod tests;
