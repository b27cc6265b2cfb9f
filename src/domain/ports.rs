use crate::domain::model::{InsertOutcome, ManufacturerRecord};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Chat-style completion backend. `Ok(None)` means the backend had no
/// reply; implementations may be no-ops when credentials are missing.
#[async_trait]
pub trait ModelClient: Send + Sync {
    async fn complete(&self, system: &str, user: &str) -> Result<Option<String>>;
}

/// Backing store for manufacturer records.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Case-insensitive substring match on both fields.
    async fn query(&self, api_name: &str, country: &str) -> Result<Vec<ManufacturerRecord>>;

    /// Persist records tagged with the given provenance label and an
    /// insert timestamp.
    async fn insert_records(
        &self,
        records: &[ManufacturerRecord],
        source_label: &str,
    ) -> Result<InsertOutcome>;
}
