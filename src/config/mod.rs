pub mod discovery_config;
pub mod settings;

#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{validate_non_empty_string, Validate};
#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "manufacturer-discovery")]
#[command(about = "Discover API manufacturers for an ingredient/country pair")]
pub struct CliConfig {
    /// Active Pharmaceutical Ingredient to search for
    #[arg(long)]
    pub api_name: String,

    /// Country the manufacturers must operate in
    #[arg(long)]
    pub country: String,

    /// Optional TOML tuning file
    #[arg(long)]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("api_name", &self.api_name)?;
        validate_non_empty_string("country", &self.country)?;
        Ok(())
    }
}
