//! UI/backend events and error modeling for the dashboard controller.

use shared::{domain::UserRecord, error::FetchError};

pub enum UiEvent {
    BackendReady,
    BatchLoaded {
        cursor: usize,
        records: Vec<UserRecord>,
    },
    BatchFailed {
        cursor: usize,
        error: FetchError,
    },
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Queue,
    Startup,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    LoadBatch,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn new(
        category: UiErrorCategory,
        context: UiErrorContext,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            context,
            message: message.into(),
        }
    }

    /// Startup and queue failures mean no fetch can complete on its own.
    pub fn blocks_loading(&self) -> bool {
        matches!(
            self.category,
            UiErrorCategory::Startup | UiErrorCategory::Queue
        )
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
