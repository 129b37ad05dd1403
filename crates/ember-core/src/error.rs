//! Configuration errors.

use thiserror::Error;

/// Errors raised while loading or validating an [`EnhancementConfig`](crate::EnhancementConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}
