use crate::domain::model::{InsertOutcome, ManufacturerRecord};
use crate::domain::ports::RecordStore;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Composes a primary store with a delegate: every operation tries the
/// primary first and falls back on any failure, so callers see a single
/// store that only errors when both paths are dead.
///
/// With no primary configured, operations go straight to the delegate.
pub struct FallbackStore {
    primary: Option<Box<dyn RecordStore>>,
    delegate: Box<dyn RecordStore>,
}

impl FallbackStore {
    pub fn new(primary: Option<Box<dyn RecordStore>>, delegate: Box<dyn RecordStore>) -> Self {
        Self { primary, delegate }
    }
}

#[async_trait]
impl RecordStore for FallbackStore {
    async fn query(&self, api_name: &str, country: &str) -> Result<Vec<ManufacturerRecord>> {
        if let Some(primary) = &self.primary {
            match primary.query(api_name, country).await {
                Ok(records) => return Ok(records),
                Err(e) => {
                    tracing::warn!("💾 Primary store query failed, falling back: {}", e);
                }
            }
        }
        self.delegate.query(api_name, country).await
    }

    async fn insert_records(
        &self,
        records: &[ManufacturerRecord],
        source_label: &str,
    ) -> Result<InsertOutcome> {
        if let Some(primary) = &self.primary {
            match primary.insert_records(records, source_label).await {
                Ok(outcome) => return Ok(outcome),
                Err(e) => {
                    tracing::warn!("💾 Primary store insert failed, falling back: {}", e);
                }
            }
        }
        self.delegate.insert_records(records, source_label).await
    }
}
