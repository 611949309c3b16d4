use thiserror::Error;

/// Application-level error type.
///
/// The aggregation engine itself never returns errors: missing references
/// and absent metric values are `None`, empty inputs yield empty outputs.
/// These variants cover the boundaries around it (configuration, query
/// validation, lookups by ID).
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("{0}")]
    Validation(String),

    #[error("{0} not found")]
    NotFound(String),
}
