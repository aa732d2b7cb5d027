// Error Taxonomy
// Input gating, profile construction and config failures

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DetectionError {
    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedProfileError {
    #[error("Profile has an empty name")]
    EmptyName,
    #[error("Profile '{profile}' has no entries for category '{category}'")]
    EmptyCategory {
        profile: String,
        category: &'static str,
    },
    #[error("Profile '{profile}' category '{category}' has an invalid pattern: {message}")]
    InvalidPattern {
        profile: String,
        category: &'static str,
        message: String,
    },
    #[error("Duplicate profile code '{0}'")]
    DuplicateCode(String),
    #[error("Profile registry is empty")]
    EmptyRegistry,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}
