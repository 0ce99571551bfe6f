use std::{
    sync::atomic::{AtomicBool, Ordering},
    time::Duration,
};

use async_trait::async_trait;
use rand::{rngs::StdRng, Rng, SeedableRng};
use shared::{domain::UserRecord, error::FetchError};
use tracing::{debug, warn};

use crate::{config::DashboardSettings, dashboard::BatchRequest};

const MIN_AGE: u32 = 20;
const MAX_AGE_EXCLUSIVE: u32 = 70;

/// Provider of user records, fetched one batch at a time.
#[async_trait]
pub trait RecordSource: Send + Sync {
    async fn fetch_batch(&self, request: BatchRequest) -> Result<Vec<UserRecord>, FetchError>;
    fn total_records(&self) -> usize;
}

/// In-memory dataset standing in for a paginated user API.
pub struct MockRecordSource {
    records: Vec<UserRecord>,
    fail_on_batch: Option<usize>,
    failure_spent: AtomicBool,
}

impl MockRecordSource {
    /// Ids run `1..=total` in order; ages are drawn from `[20, 69]`.
    pub fn generate(total: usize, seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let records = (1..=total as i64)
            .map(|i| {
                UserRecord::new(
                    i,
                    format!("User {i}"),
                    format!("user{i}@example.com"),
                    rng.gen_range(MIN_AGE..MAX_AGE_EXCLUSIVE),
                )
            })
            .collect();
        Self::from_records(records)
    }

    /// Size, seed and injected failure all come from `settings`.
    pub fn from_settings(settings: &DashboardSettings) -> Self {
        let source = Self::generate(settings.total_records, settings.seed);
        match settings.fail_on_batch {
            Some(cursor) => source.fail_on_batch(cursor),
            None => source,
        }
    }

    pub fn from_records(records: Vec<UserRecord>) -> Self {
        Self {
            records,
            fail_on_batch: None,
            failure_spent: AtomicBool::new(false),
        }
    }

    /// The first fetch of batch `cursor` fails; any retry succeeds.
    pub fn fail_on_batch(mut self, cursor: usize) -> Self {
        self.fail_on_batch = Some(cursor);
        self
    }

    pub fn records(&self) -> &[UserRecord] {
        &self.records
    }

    fn slice(&self, request: BatchRequest) -> &[UserRecord] {
        let start = request.start().min(self.records.len());
        let end = request.end().min(self.records.len());
        &self.records[start..end]
    }
}

#[async_trait]
impl RecordSource for MockRecordSource {
    async fn fetch_batch(&self, request: BatchRequest) -> Result<Vec<UserRecord>, FetchError> {
        if self.fail_on_batch == Some(request.cursor)
            && !self.failure_spent.swap(true, Ordering::SeqCst)
        {
            return Err(FetchError::Injected {
                cursor: request.cursor,
            });
        }
        Ok(self.slice(request).to_vec())
    }

    fn total_records(&self) -> usize {
        self.records.len()
    }
}

/// Simulated network round trip: suspend for `latency`, then fetch.
pub async fn fetch_with_latency(
    source: &dyn RecordSource,
    request: BatchRequest,
    latency: Duration,
) -> Result<Vec<UserRecord>, FetchError> {
    if !latency.is_zero() {
        tokio::time::sleep(latency).await;
    }
    match source.fetch_batch(request).await {
        Ok(records) => {
            debug!(
                cursor = request.cursor,
                fetched = records.len(),
                "fetched record batch"
            );
            Ok(records)
        }
        Err(err) => {
            warn!(cursor = request.cursor, "record batch fetch failed: {err}");
            Err(err)
        }
    }
}
