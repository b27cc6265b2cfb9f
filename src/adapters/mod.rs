// Adapters layer: concrete implementations for external systems (model client, record store).

pub mod fallback;
pub mod groq;
pub mod memory;
pub mod rest_store;

pub use fallback::FallbackStore;
pub use groq::{GroqClient, NullModelClient};
pub use memory::MemoryRecordStore;
pub use rest_store::RestRecordStore;
