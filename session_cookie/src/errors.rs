use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CookieError {
    /// The configured SameSite value is not one of "", "lax", "strict" or "none"
    #[error("Invalid value for SameSite: {0:?}")]
    InvalidSameSite(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Cookie options are not initialized, call init() first")]
    NotInitialized,

    #[error("Header error: {0}")]
    Header(String),
}
