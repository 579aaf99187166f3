use thiserror::Error;

/// Errors that can occur while building the client or talking to the recipe API
#[derive(Error, Debug)]
pub enum FoodyError {
    /// HTTP transport failed (connect, read, timeout, body decoding)
    #[error("Failed to fetch recipes: {0}")]
    FetchError(#[from] reqwest::Error),

    /// Response body was not valid recipe JSON
    #[error("Failed to decode response: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Base URL could not be joined with the endpoint path
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Builder configuration error
    #[error("Builder error: {0}")]
    BuilderError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),

    /// Response carried no body where one was required
    #[error("Response body is missing")]
    MissingBody,
}
