use crate::domain::model::ManufacturerRecord;
use std::collections::BTreeSet;

/// Maximum manufacturer names per discovery batch.
pub const BATCH_SIZE: usize = 30;

/// Only this many names are spelled out in the prompt's exclusion clause;
/// the full batch still drives deduplication in the parser.
pub const PROMPT_SKIP_LIMIT: usize = 10;

/// Plans model invocations: derives the skip list from known records,
/// partitions it into bounded batches and renders the prompt.
pub struct QueryPlanner;

impl QueryPlanner {
    /// Case-folded, deduplicated, sorted manufacturer names already known
    /// for this (ingredient, country) pair.
    pub fn skip_list_from(records: &[ManufacturerRecord]) -> Vec<String> {
        let names: BTreeSet<String> = records
            .iter()
            .map(|record| record.manufacturer.trim().to_lowercase())
            .filter(|name| !name.is_empty())
            .collect();
        names.into_iter().collect()
    }

    /// Chunks of at most `BATCH_SIZE` covering the whole skip list. An
    /// empty skip list still yields one empty batch so discovery runs once
    /// with no exclusions.
    pub fn partition(skip_list: &[String]) -> Vec<Vec<String>> {
        if skip_list.is_empty() {
            return vec![Vec::new()];
        }
        skip_list
            .chunks(BATCH_SIZE)
            .map(|chunk| chunk.to_vec())
            .collect()
    }

    /// Deterministic (system, user) prompt pair for one batch.
    pub fn build_prompt(
        api_name: &str,
        country: &str,
        batch: &[String],
        trusted_domains: &[String],
    ) -> (String, String) {
        let skip_clause = if batch.is_empty() {
            "None".to_string()
        } else {
            batch
                .iter()
                .take(PROMPT_SKIP_LIMIT)
                .cloned()
                .collect::<Vec<_>>()
                .join(", ")
        };
        let trusted_clause = trusted_domains.join(", ");

        let system = "You are a pharmaceutical data extraction expert. \
                      Return only valid markdown tables."
            .to_string();

        let user = format!(
            r#"You are a pharmaceutical business intelligence expert. Identify legitimate API manufacturers for "{api_name}" located in "{country}".

Skip these known manufacturers: {skip_clause}

Requirements:
- Provide only manufacturers that produce the API (not formulations) and operate in {country}.
- Verify each manufacturer using information from trusted public sources ({trusted_clause}). If no trusted citation exists, exclude the manufacturer.
- Return results as a markdown table with columns:
  | manufacturers | country | usdmf | cep | source_name | source_url |
- Provide HTTPS URLs pointing directly to the evidence page. Prefer regulatory listings or manufacturer catalogs.
- usdmf/cep should be "Yes"/"No"/"Unknown".
- Do not include duplicate manufacturers or any entry from the skip list.
"#
        );

        (system, user)
    }
}
