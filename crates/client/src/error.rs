//! Catalog client errors.

use local_market_core::DefinitionError;
use thiserror::Error;

/// Errors that can occur when fetching from the catalog API.
///
/// Callers treat every variant as "definition unavailable".
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("Catalog API returned {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Start of the response body.
        body: String,
    },

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A fetched custom-product definition failed validation.
    #[error("Invalid custom product definition: {0}")]
    InvalidDefinition(#[from] DefinitionError),

    /// Endpoint URL could not be built.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}
