pub mod discovery;
pub mod parser;
pub mod planner;
pub mod trust;

pub use crate::domain::model::{DiscoveryResult, ManufacturerRecord};
pub use crate::domain::ports::{ModelClient, RecordStore};
pub use crate::utils::error::Result;
