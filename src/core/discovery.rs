use crate::core::parser::ResponseParser;
use crate::core::planner::QueryPlanner;
use crate::core::trust::TrustPolicy;
use crate::domain::model::{DiscoveryResult, ManufacturerRecord};
use crate::domain::ports::{ModelClient, RecordStore};
use std::time::Duration;

/// Provenance label attached to every record this pipeline inserts.
pub const SOURCE_LABEL: &str = "groq_discovery";

const DEFAULT_REQUEST_DELAY: Duration = Duration::from_secs(1);

/// Drives the end-to-end discovery flow: snapshot the store, plan
/// batches, query the model until one batch yields fresh data, persist,
/// and re-snapshot.
///
/// Best-effort by design: the only caller-visible failure is input
/// validation. Store and model errors degrade to empty results.
pub struct DiscoveryService {
    store: Box<dyn RecordStore>,
    model: Box<dyn ModelClient>,
    trust: TrustPolicy,
    request_delay: Duration,
}

impl DiscoveryService {
    pub fn new(store: Box<dyn RecordStore>, model: Box<dyn ModelClient>) -> Self {
        Self {
            store,
            model,
            trust: TrustPolicy::default(),
            request_delay: DEFAULT_REQUEST_DELAY,
        }
    }

    pub fn with_trust_policy(mut self, trust: TrustPolicy) -> Self {
        self.trust = trust;
        self
    }

    pub fn with_request_delay(mut self, delay: Duration) -> Self {
        self.request_delay = delay;
        self
    }

    pub async fn discover(&self, api_name: &str, country: &str) -> DiscoveryResult {
        let api_name = api_name.trim();
        let country = country.trim();

        if api_name.is_empty() || country.is_empty() {
            return DiscoveryResult::validation_failure(
                "API name and country are required for discovery.",
            );
        }

        tracing::info!("🔍 Discovering manufacturers of '{}' in '{}'", api_name, country);

        let existing_records = self.fetch_existing(api_name, country).await;
        let skip_list = QueryPlanner::skip_list_from(&existing_records);
        let batches = QueryPlanner::partition(&skip_list);
        tracing::debug!(
            "{} known manufacturer(s), {} batch(es) planned",
            skip_list.len(),
            batches.len()
        );

        let mut discovered = Vec::new();
        for batch in &batches {
            discovered.extend(self.discover_batch(api_name, country, batch).await);
            if !discovered.is_empty() {
                break; // stop once we find fresh data
            }
        }

        let (new_records, inserted_count) = if discovered.is_empty() {
            (Vec::new(), 0)
        } else {
            match self.store.insert_records(&discovered, SOURCE_LABEL).await {
                Ok(outcome) => (outcome.rows, outcome.inserted),
                Err(e) => {
                    tracing::warn!("💾 Insert failed, reporting zero new records: {}", e);
                    (Vec::new(), 0)
                }
            }
        };

        tracing::info!("✅ Discovery complete: {} new record(s)", inserted_count);

        let all_records = self.fetch_existing(api_name, country).await;

        DiscoveryResult {
            success: true,
            error: None,
            existing_records,
            new_records,
            all_records,
            inserted_count,
        }
    }

    async fn fetch_existing(&self, api_name: &str, country: &str) -> Vec<ManufacturerRecord> {
        match self.store.query(api_name, country).await {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!("💾 Store query failed, treating as empty: {}", e);
                Vec::new()
            }
        }
    }

    /// One model round trip. Any failure counts as "this batch found
    /// nothing" and never aborts the overall run.
    async fn discover_batch(
        &self,
        api_name: &str,
        country: &str,
        batch: &[String],
    ) -> Vec<ManufacturerRecord> {
        // small delay to avoid hammering the model API
        tokio::time::sleep(self.request_delay).await;

        let trusted = self.trust.domains_sorted();
        let (system, user) = QueryPlanner::build_prompt(api_name, country, batch, &trusted);

        let reply = match self.model.complete(&system, &user).await {
            Ok(Some(text)) => text,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!("📡 Model call failed, skipping batch: {}", e);
                return Vec::new();
            }
        };

        let records = ResponseParser::new(&self.trust).parse(&reply, api_name, country, batch);
        tracing::debug!("📡 Batch yielded {} record(s)", records.len());
        records
    }
}
