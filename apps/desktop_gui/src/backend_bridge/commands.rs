//! Backend commands queued from UI to backend worker.

use client_core::BatchRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendCommand {
    FetchBatch(BatchRequest),
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::FetchBatch(_) => "fetch_batch",
        }
    }
}
