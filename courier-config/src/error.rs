// Error types for settings loading

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing configuration key: {0}")]
    Missing(String),

    #[error("Invalid value for {key}: {reason}")]
    Invalid { key: String, reason: String },

    #[error("Failed to load .env file: {0}")]
    Dotenv(#[from] dotenvy::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
