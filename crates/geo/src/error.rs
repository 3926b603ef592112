//! Typed error enum for the geospatial client.

use thiserror::Error;

/// Errors from geospatial service operations.
#[derive(Debug, Error)]
pub enum GeoError {
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),
    #[error("HTTP status {code}: {body}")]
    HttpStatus { code: u16, body: String },
    #[error("JSON parse error in {context}: {source}")]
    JsonParse {
        context: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("authentication failed: {0}")]
    Auth(String),
    #[error("missing field in response: {0}")]
    MissingField(&'static str),
    #[error("client initialization failed: {0}")]
    ClientInit(String),
}

impl GeoError {
    /// Whether the failure originated on the remote service rather than in
    /// this process. Handlers map these to an upstream-error status.
    #[must_use]
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Self::HttpRequest(_) | Self::HttpStatus { .. } | Self::JsonParse { .. }
        )
    }
}
