use thiserror::Error;

#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid config value for {field}: '{value}' - {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Record store error: {message}")]
    StoreError { message: String },

    #[error("Model call failed: {message}")]
    ModelError { message: String },
}

pub type Result<T> = std::result::Result<T, DiscoveryError>;
