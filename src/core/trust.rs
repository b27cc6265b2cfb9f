use std::collections::HashSet;
use url::Url;

/// Hosts that count as authoritative evidence for manufacturer claims:
/// regulatory agencies and industry directories.
const DEFAULT_TRUSTED_DOMAINS: &[&str] = &[
    "pharmacompass.com",
    "pharmaoffer.com",
    "orangebook.fda.gov",
    "fda.gov",
    "ema.europa.eu",
    "cdsco.gov.in",
    "who.int",
    "dcat.org",
    "scrip.pharmaintelligence.informa.com",
];

/// Decides whether a cited evidence URL counts as trustworthy. Purely
/// syntactic: no network access, deterministic given the allowlist.
#[derive(Debug, Clone)]
pub struct TrustPolicy {
    domains: HashSet<String>,
}

impl Default for TrustPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_TRUSTED_DOMAINS.iter().map(|domain| domain.to_string()))
    }
}

impl TrustPolicy {
    pub fn new(domains: impl IntoIterator<Item = String>) -> Self {
        Self {
            domains: domains
                .into_iter()
                .map(|domain| domain.to_lowercase())
                .collect(),
        }
    }

    pub fn with_extra_domains(mut self, extra: impl IntoIterator<Item = String>) -> Self {
        self.domains
            .extend(extra.into_iter().map(|domain| domain.to_lowercase()));
        self
    }

    /// True iff the URL is https and its host equals a trusted domain or
    /// is a subdomain of one (suffix match on `.<domain>`).
    pub fn is_trusted_source(&self, url: &str) -> bool {
        let trimmed = url.trim();
        if trimmed.is_empty() {
            return false;
        }

        let parsed = match Url::parse(trimmed) {
            Ok(parsed) => parsed,
            Err(_) => return false,
        };

        // Url lowercases the scheme during parsing, so "HTTPS://" passes.
        if parsed.scheme() != "https" {
            return false;
        }

        let host = match parsed.host_str() {
            Some(host) => host.to_lowercase(),
            None => return false,
        };

        self.domains
            .iter()
            .any(|trusted| host == *trusted || host.ends_with(&format!(".{}", trusted)))
    }

    /// Allowlist in deterministic order, for prompt construction.
    pub fn domains_sorted(&self) -> Vec<String> {
        let mut domains: Vec<String> = self.domains.iter().cloned().collect();
        domains.sort();
        domains
    }
}
