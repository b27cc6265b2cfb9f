use crate::domain::model::{InsertOutcome, ManufacturerRecord};
use crate::domain::ports::RecordStore;
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::Mutex;

/// In-process record store. The delegate path when no REST backend is
/// configured, and the injected collaborator in tests.
#[derive(Clone, Default)]
pub struct MemoryRecordStore {
    records: Arc<Mutex<Vec<ManufacturerRecord>>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<ManufacturerRecord>) -> Self {
        Self {
            records: Arc::new(Mutex::new(records)),
        }
    }

    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.lock().await.is_empty()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn query(&self, api_name: &str, country: &str) -> Result<Vec<ManufacturerRecord>> {
        let api_lower = api_name.to_lowercase();
        let country_lower = country.to_lowercase();

        let records = self.records.lock().await;
        Ok(records
            .iter()
            .filter(|record| {
                record.api_name.to_lowercase().contains(&api_lower)
                    && record.country.to_lowercase().contains(&country_lower)
            })
            .cloned()
            .collect())
    }

    async fn insert_records(
        &self,
        records: &[ManufacturerRecord],
        source_label: &str,
    ) -> Result<InsertOutcome> {
        let imported_at = Utc::now();
        let stamped: Vec<ManufacturerRecord> = records
            .iter()
            .cloned()
            .map(|record| record.stamped(source_label, imported_at))
            .collect();

        let mut store = self.records.lock().await;
        store.extend(stamped.iter().cloned());

        Ok(InsertOutcome {
            inserted: stamped.len(),
            rows: stamped,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Affirmation;

    fn record(api_name: &str, manufacturer: &str, country: &str) -> ManufacturerRecord {
        ManufacturerRecord {
            api_name: api_name.to_string(),
            manufacturer: manufacturer.to_string(),
            country: country.to_string(),
            usdmf: Affirmation::No,
            cep: Affirmation::No,
            source_name: String::new(),
            source_url: String::new(),
            source_file: None,
            imported_at: None,
        }
    }

    #[tokio::test]
    async fn test_query_matches_substrings_case_insensitively() {
        let store = MemoryRecordStore::with_records(vec![
            record("Metformin HCl", "Acme Pharma", "India (West)"),
            record("Metformin", "Zenith Labs", "Germany"),
            record("Atorvastatin", "Acme Pharma", "India"),
        ]);

        let results = store.query("metformin", "india").await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].manufacturer, "Acme Pharma");
    }

    #[tokio::test]
    async fn test_insert_stamps_provenance_and_persists() {
        let store = MemoryRecordStore::new();
        let outcome = store
            .insert_records(
                &[record("Metformin", "Acme Pharma", "India")],
                "groq_discovery",
            )
            .await
            .unwrap();

        assert_eq!(outcome.inserted, 1);
        assert_eq!(outcome.rows[0].source_file.as_deref(), Some("groq_discovery"));
        assert!(outcome.rows[0].imported_at.is_some());
        assert_eq!(store.len().await, 1);
    }
}
