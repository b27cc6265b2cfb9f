use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Regulatory filing status as reported by a source.
///
/// `Unknown` never comes out of the response parser (unconfirmed values
/// collapse to `No`), but rows already stored with "Unknown" still
/// round-trip through the record store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum Affirmation {
    Yes,
    #[default]
    No,
    Unknown,
}

impl Affirmation {
    /// Collapse a raw table cell: only an affirmative "yes"/"t" counts.
    pub fn from_cell(cell: &str) -> Self {
        match cell.trim().to_lowercase().as_str() {
            "yes" | "t" => Affirmation::Yes,
            _ => Affirmation::No,
        }
    }
}

impl From<String> for Affirmation {
    fn from(value: String) -> Self {
        let trimmed = value.trim();
        if trimmed.eq_ignore_ascii_case("yes") {
            Affirmation::Yes
        } else if trimmed.eq_ignore_ascii_case("unknown") {
            Affirmation::Unknown
        } else {
            Affirmation::No
        }
    }
}

/// One manufacturer claim: who makes the ingredient, where, and the
/// evidence backing it. Immutable once persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManufacturerRecord {
    pub api_name: String,
    pub manufacturer: String,
    pub country: String,
    #[serde(default)]
    pub usdmf: Affirmation,
    #[serde(default)]
    pub cep: Affirmation,
    #[serde(default)]
    pub source_name: String,
    #[serde(default)]
    pub source_url: String,

    // Set by the store at insert time, absent on freshly parsed records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imported_at: Option<DateTime<Utc>>,
}

impl ManufacturerRecord {
    /// Tag the record with its provenance label and insert timestamp.
    pub fn stamped(mut self, source_label: &str, imported_at: DateTime<Utc>) -> Self {
        self.source_file = Some(source_label.to_string());
        self.imported_at = Some(imported_at);
        self
    }
}

/// What a store's insert reports back: the count and the rows as persisted
/// (the backend's representation when it returns one, else the submitted
/// records echoed).
#[derive(Debug, Clone, Default)]
pub struct InsertOutcome {
    pub inserted: usize,
    pub rows: Vec<ManufacturerRecord>,
}

/// Response envelope of one `discover` call. Never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct DiscoveryResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub existing_records: Vec<ManufacturerRecord>,
    pub new_records: Vec<ManufacturerRecord>,
    pub all_records: Vec<ManufacturerRecord>,
    pub inserted_count: usize,
}

impl DiscoveryResult {
    pub fn validation_failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(message.into()),
            existing_records: Vec::new(),
            new_records: Vec::new(),
            all_records: Vec::new(),
            inserted_count: 0,
        }
    }
}
