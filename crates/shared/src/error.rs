use thiserror::Error;

/// Message shown to the user whenever a batch cannot be retrieved.
pub const FETCH_FAILURE_MESSAGE: &str = "Failed to fetch data. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("injected failure for batch {cursor}")]
    Injected { cursor: usize },
    #[error("record source unavailable: {0}")]
    Unavailable(String),
}

impl FetchError {
    /// The only text that ever reaches the view; details stay in the logs.
    pub fn user_message(&self) -> &'static str {
        FETCH_FAILURE_MESSAGE
    }
}
