use crate::domain::model::{InsertOutcome, ManufacturerRecord};
use crate::domain::ports::RecordStore;
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use std::time::Duration;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);
const SELECT_COLUMNS: &str = "api_name,manufacturer,country,usdmf,cep,source_name,source_url";

/// Record store backed by a Supabase-style REST interface.
///
/// Queries use `ilike` pattern filters on api_name and country; inserts
/// ask for `return=representation` so the stored rows come back.
pub struct RestRecordStore {
    client: Client,
    base_url: String,
    api_key: String,
    table: String,
    timeout: Duration,
}

impl RestRecordStore {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        table: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            table: table.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, self.table)
    }
}

#[async_trait]
impl RecordStore for RestRecordStore {
    async fn query(&self, api_name: &str, country: &str) -> Result<Vec<ManufacturerRecord>> {
        let api_name_filter = format!("ilike.*{}*", api_name);
        let country_filter = format!("ilike.*{}*", country);

        let response = self
            .client
            .get(self.table_url())
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Accept", "application/json")
            .query(&[
                ("select", SELECT_COLUMNS),
                ("api_name", api_name_filter.as_str()),
                ("country", country_filter.as_str()),
            ])
            .timeout(self.timeout)
            .send()
            .await?
            .error_for_status()?;

        let records: Vec<ManufacturerRecord> = response.json().await?;
        tracing::debug!("💾 Store query returned {} record(s)", records.len());
        Ok(records)
    }

    async fn insert_records(
        &self,
        records: &[ManufacturerRecord],
        source_label: &str,
    ) -> Result<InsertOutcome> {
        if records.is_empty() {
            return Ok(InsertOutcome::default());
        }

        let imported_at = Utc::now();
        let payload: Vec<ManufacturerRecord> = records
            .iter()
            .cloned()
            .map(|record| record.stamped(source_label, imported_at))
            .collect();

        let response = self
            .client
            .post(self.table_url())
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Prefer", "return=representation")
            .timeout(self.timeout)
            .json(&payload)
            .send()
            .await?
            .error_for_status()?;

        let rows: Vec<ManufacturerRecord> = response.json().await?;
        tracing::info!("💾 Inserted {} record(s) into '{}'", rows.len(), self.table);

        // Backend may be configured to swallow the representation; echo
        // the submitted rows so callers still see what was stored.
        if rows.is_empty() {
            return Ok(InsertOutcome {
                inserted: payload.len(),
                rows: payload,
            });
        }

        Ok(InsertOutcome {
            inserted: rows.len(),
            rows,
        })
    }
}
