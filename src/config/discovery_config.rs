use crate::utils::error::{DiscoveryError, Result};
use crate::utils::validation::{validate_positive_number, validate_range};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Optional tuning file for a discovery run. Every field has a built-in
/// default, so an absent file or empty section is fine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    pub model: Option<ModelSection>,
    pub store: Option<StoreSection>,
    pub trust: Option<TrustSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelSection {
    pub name: Option<String>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub request_delay_ms: Option<u64>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreSection {
    pub table: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrustSection {
    pub extra_domains: Option<Vec<String>>,
}

impl DiscoveryConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(DiscoveryError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| DiscoveryError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replace `${VAR_NAME}` placeholders with environment values.
    /// Unresolved placeholders are left as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        if let Some(model) = &self.model {
            if let Some(temperature) = model.temperature {
                validate_range("model.temperature", temperature, 0.0, 2.0)?;
            }
            if let Some(max_tokens) = model.max_tokens {
                validate_positive_number("model.max_tokens", max_tokens as usize, 1)?;
            }
            if let Some(timeout) = model.timeout_seconds {
                validate_range("model.timeout_seconds", timeout, 1, 300)?;
            }
        }

        if let Some(store) = &self.store {
            if let Some(timeout) = store.timeout_seconds {
                validate_range("store.timeout_seconds", timeout, 1, 300)?;
            }
        }

        Ok(())
    }

    pub fn model_name(&self) -> Option<&str> {
        self.model.as_ref().and_then(|model| model.name.as_deref())
    }

    pub fn temperature(&self) -> Option<f32> {
        self.model.as_ref().and_then(|model| model.temperature)
    }

    pub fn max_tokens(&self) -> Option<u32> {
        self.model.as_ref().and_then(|model| model.max_tokens)
    }

    pub fn request_delay(&self) -> Option<Duration> {
        self.model
            .as_ref()
            .and_then(|model| model.request_delay_ms)
            .map(Duration::from_millis)
    }

    pub fn model_timeout(&self) -> Option<Duration> {
        self.model
            .as_ref()
            .and_then(|model| model.timeout_seconds)
            .map(Duration::from_secs)
    }

    pub fn store_timeout(&self) -> Option<Duration> {
        self.store
            .as_ref()
            .and_then(|store| store.timeout_seconds)
            .map(Duration::from_secs)
    }

    pub fn table(&self) -> Option<&str> {
        self.store.as_ref().and_then(|store| store.table.as_deref())
    }

    pub fn extra_domains(&self) -> Vec<String> {
        self.trust
            .as_ref()
            .and_then(|trust| trust.extra_domains.clone())
            .unwrap_or_default()
    }
}
