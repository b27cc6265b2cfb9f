use std::env;

pub const DEFAULT_TABLE: &str = "API_manufacturers";

/// Connection settings read from the environment. Every credential is
/// optional: a missing one disables the corresponding adapter instead of
/// failing startup.
#[derive(Debug, Clone)]
pub struct Settings {
    pub groq_api_key: Option<String>,
    pub supabase_url: Option<String>,
    pub supabase_key: Option<String>,
    pub supabase_table: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            groq_api_key: None,
            supabase_url: None,
            supabase_key: None,
            supabase_table: DEFAULT_TABLE.to_string(),
        }
    }
}

fn non_empty(var: &str) -> Option<String> {
    env::var(var).ok().filter(|value| !value.trim().is_empty())
}

impl Settings {
    pub fn from_env() -> Self {
        Self {
            groq_api_key: non_empty("GROQ_API_KEY"),
            supabase_url: non_empty("SUPABASE_URL")
                .map(|url| url.trim_end_matches('/').to_string()),
            // service key wins over the anon key when both are present
            supabase_key: non_empty("SUPABASE_SERVICE_KEY").or_else(|| non_empty("SUPABASE_ANON_KEY")),
            supabase_table: non_empty("SUPABASE_MANUFACTURERS_TABLE")
                .unwrap_or_else(|| DEFAULT_TABLE.to_string()),
        }
    }

    pub fn supabase_configured(&self) -> bool {
        self.supabase_url.is_some() && self.supabase_key.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // one test so the env mutations cannot race each other
    #[test]
    fn test_from_env_capability_gating() {
        env::remove_var("GROQ_API_KEY");
        env::remove_var("SUPABASE_URL");
        env::remove_var("SUPABASE_SERVICE_KEY");
        env::remove_var("SUPABASE_ANON_KEY");
        env::remove_var("SUPABASE_MANUFACTURERS_TABLE");

        let settings = Settings::from_env();
        assert!(settings.groq_api_key.is_none());
        assert!(!settings.supabase_configured());
        assert_eq!(settings.supabase_table, DEFAULT_TABLE);

        env::set_var("SUPABASE_URL", "https://example.supabase.co/");
        env::set_var("SUPABASE_ANON_KEY", "anon-key");
        let settings = Settings::from_env();
        assert!(settings.supabase_configured());
        // trailing slash is trimmed
        assert_eq!(
            settings.supabase_url.as_deref(),
            Some("https://example.supabase.co")
        );
        assert_eq!(settings.supabase_key.as_deref(), Some("anon-key"));

        // service key wins over anon key
        env::set_var("SUPABASE_SERVICE_KEY", "service-key");
        let settings = Settings::from_env();
        assert_eq!(settings.supabase_key.as_deref(), Some("service-key"));

        env::remove_var("SUPABASE_URL");
        env::remove_var("SUPABASE_SERVICE_KEY");
        env::remove_var("SUPABASE_ANON_KEY");
    }
}
