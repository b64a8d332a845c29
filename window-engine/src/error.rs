//! Error types for the window engine.
//!
//! Registry and gesture operations never fail: unknown ids and duplicate
//! registrations are silent no-ops reported through return values. Errors
//! only arise while loading configuration.

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

pub type Result<T, E = ConfigError> = std::result::Result<T, E>;
