pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{FallbackStore, GroqClient, MemoryRecordStore, NullModelClient, RestRecordStore};
pub use core::discovery::{DiscoveryService, SOURCE_LABEL};
pub use core::parser::ResponseParser;
pub use core::planner::QueryPlanner;
pub use core::trust::TrustPolicy;
pub use domain::model::{Affirmation, DiscoveryResult, InsertOutcome, ManufacturerRecord};
pub use domain::ports::{ModelClient, RecordStore};
pub use utils::error::{DiscoveryError, Result};
