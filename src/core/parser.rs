use crate::core::trust::TrustPolicy;
use crate::domain::model::{Affirmation, ManufacturerRecord};
use std::collections::HashSet;

/// Turns the model's semi-structured reply into manufacturer records.
///
/// The reply is untrusted free text that should contain a pipe-delimited
/// markdown table but may be truncated, reordered or padded with prose.
/// Every extraction step fails soft: a malformed row is dropped, never
/// fatal to the batch.
pub struct ResponseParser<'a> {
    trust: &'a TrustPolicy,
}

impl<'a> ResponseParser<'a> {
    pub fn new(trust: &'a TrustPolicy) -> Self {
        Self { trust }
    }

    /// Expected column order: manufacturer, country, usdmf, cep,
    /// source_name, source_url. Row order is preserved in the output.
    pub fn parse(
        &self,
        markdown: &str,
        api_name: &str,
        country: &str,
        skip_batch: &[String],
    ) -> Vec<ManufacturerRecord> {
        let mut manufacturers = Vec::new();
        let skip: HashSet<String> = skip_batch.iter().map(|name| name.to_lowercase()).collect();
        let country_lower = country.to_lowercase();

        for line in markdown.lines() {
            if !line.contains('|')
                || line.to_lowercase().starts_with("| manufacturers")
                || line.starts_with("|---")
            {
                continue;
            }

            let raw_parts: Vec<&str> = line.split('|').map(str::trim).collect();
            // drop leading/trailing blanks caused by table edges
            let parts = &raw_parts[1..raw_parts.len() - 1];
            if parts.len() < 6 {
                continue;
            }

            let manufacturer = parts[0];
            if skip.contains(&manufacturer.to_lowercase()) {
                continue;
            }

            let source_url = parts[5];
            if !self.trust.is_trusted_source(source_url) {
                continue;
            }

            // Substring match on purpose: "India" also matches
            // "India (West)". See DESIGN.md for the known looseness.
            let row_country = parts[1];
            if !row_country.to_lowercase().contains(&country_lower) {
                continue;
            }

            manufacturers.push(ManufacturerRecord {
                api_name: api_name.to_string(),
                manufacturer: manufacturer.to_string(),
                country: row_country.to_string(),
                usdmf: Affirmation::from_cell(parts[2]),
                cep: Affirmation::from_cell(parts[3]),
                source_name: parts[4].to_string(),
                source_url: source_url.to_string(),
                source_file: None,
                imported_at: None,
            });
        }

        manufacturers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(markdown: &str, country: &str, skip: &[&str]) -> Vec<ManufacturerRecord> {
        let trust = TrustPolicy::default();
        let parser = ResponseParser::new(&trust);
        let skip: Vec<String> = skip.iter().map(|name| name.to_string()).collect();
        parser.parse(markdown, "Metformin", country, &skip)
    }

    const WELL_FORMED: &str = "\
Here are the manufacturers I found:

| manufacturers | country | usdmf | cep | source_name | source_url |
|---|---|---|---|---|---|
| Acme Pharma | India | Yes | No | PharmaCompass | https://www.pharmacompass.com/acme |
| Zenith Labs | India (West) | t | yes | Orange Book | https://orangebook.fda.gov/zenith |
";

    #[test]
    fn test_parses_well_formed_table() {
        let records = parse(WELL_FORMED, "India", &[]);
        assert_eq!(records.len(), 2);

        assert_eq!(records[0].manufacturer, "Acme Pharma");
        assert_eq!(records[0].api_name, "Metformin");
        assert_eq!(records[0].country, "India");
        assert_eq!(records[0].usdmf, Affirmation::Yes);
        assert_eq!(records[0].cep, Affirmation::No);
        assert_eq!(records[0].source_name, "PharmaCompass");

        // "t" and "yes" both count as affirmed
        assert_eq!(records[1].usdmf, Affirmation::Yes);
        assert_eq!(records[1].cep, Affirmation::Yes);
        assert_eq!(records[1].country, "India (West)");
    }

    #[test]
    fn test_parse_is_idempotent() {
        let first = parse(WELL_FORMED, "India", &[]);
        let second = parse(WELL_FORMED, "India", &[]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_skip_batch_excludes_exact_case_folded_match() {
        let records = parse(WELL_FORMED, "India", &["acme pharma"]);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].manufacturer, "Zenith Labs");

        // substring is not enough for exclusion
        let records = parse(WELL_FORMED, "India", &["acme"]);
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_untrusted_source_dropped() {
        let markdown = "\
| manufacturers | country | usdmf | cep | source_name | source_url |
| Acme Pharma | India | Yes | No | Blog | https://random-blog.com/acme |
| Zenith Labs | India | Yes | No | Orange Book | http://orangebook.fda.gov/zenith |
| Solid Meds | India | Yes | No | Orange Book | https://orangebook.fda.gov/solid |
";
        let records = parse(markdown, "India", &[]);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].manufacturer, "Solid Meds");
    }

    #[test]
    fn test_country_substring_filter_is_loose() {
        let markdown = "\
| manufacturers | country | usdmf | cep | source_name | source_url |
| Acme Pharma | India (West) | Yes | No | PharmaOffer | https://pharmaoffer.com/a |
| Prairie Chem | Indiana-based | Yes | No | PharmaOffer | https://pharmaoffer.com/b |
| Alpen Labs | Switzerland | Yes | No | PharmaOffer | https://pharmaoffer.com/c |
";
        let records = parse(markdown, "India", &[]);
        // "Indiana-based" passes the substring check; only a genuinely
        // different country is dropped.
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].country, "India (West)");
        assert_eq!(records[1].country, "Indiana-based");
    }

    #[test]
    fn test_too_few_columns_skipped() {
        let markdown = "\
| manufacturers | country | usdmf | cep | source_name | source_url |
| Acme Pharma | India | Yes |
| Zenith Labs | India | Yes | No | Orange Book | https://orangebook.fda.gov/z |
";
        let records = parse(markdown, "India", &[]);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].manufacturer, "Zenith Labs");
    }

    #[test]
    fn test_header_and_separator_rows_skipped() {
        let markdown = "\
| Manufacturers | Country | USDMF | CEP | Source_Name | Source_URL |
|---|---|---|---|---|---|
|--- | --- | --- | --- | --- | ---|
";
        assert!(parse(markdown, "India", &[]).is_empty());
    }

    #[test]
    fn test_empty_document_and_prose_only() {
        assert!(parse("", "India", &[]).is_empty());
        assert!(parse("No manufacturers could be verified.", "India", &[]).is_empty());
        // prose containing a stray pipe must not panic or produce rows
        assert!(parse("either A | or B, hard to say", "India", &[]).is_empty());
    }

    #[test]
    fn test_extra_columns_tolerated() {
        let markdown = "\
| Acme Pharma | India | Yes | No | Orange Book | https://orangebook.fda.gov/a | stray note |
";
        let records = parse(markdown, "India", &[]);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].source_url, "https://orangebook.fda.gov/a");
    }
}
