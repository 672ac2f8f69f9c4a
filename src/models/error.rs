use thiserror::Error;

use super::ActivityType;

#[derive(Error, Debug)]
pub enum ProjectorError {
    #[error("Activity row not found: {0}")]
    RowNotFound(u64),

    #[error("Activity type already used by another row: {0}")]
    DuplicateActivityType(ActivityType),

    #[error("Activity table must keep at least {min} row(s)")]
    MinimumRows { min: usize },

    #[error("Invalid value for {field}: {message}")]
    InvalidInput { field: String, message: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl From<config::ConfigError> for ProjectorError {
    fn from(err: config::ConfigError) -> Self {
        ProjectorError::ConfigError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ProjectorError>;
