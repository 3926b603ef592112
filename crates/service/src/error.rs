//! Typed error enum for the service layer.
//!
//! Unifies geospatial and document-store failures into a single error type,
//! enabling the HTTP layer to map validation errors, not-found conditions,
//! and upstream failures to distinct status codes instead of downcasting
//! opaque boxes.

use crownwatch_core::CoreError;
use crownwatch_geo::GeoError;
use crownwatch_store::StoreError;
use thiserror::Error;

/// Service-layer error unifying geospatial, store, and validation failures.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Geospatial expression service call failed.
    #[error("geospatial service: {0}")]
    Geo(#[from] GeoError),

    /// Document-store call failed.
    #[error("document store: {0}")]
    Store(#[from] StoreError),

    /// Caller provided invalid input (missing date, empty globalId).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Requested data does not exist (no image, no crowns for the date).
    #[error("not found: {0}")]
    NotFound(String),

    /// Upstream answered successfully but with a shape we cannot use.
    #[error("unexpected upstream response: {0}")]
    UnexpectedResponse(String),

    /// Serialization/deserialization failed in the service layer.
    #[error("serialization: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ServiceError {
    /// Whether this error originated on a remote backend.
    #[must_use]
    pub fn is_upstream(&self) -> bool {
        match self {
            Self::Geo(e) => e.is_upstream(),
            Self::Store(e) => e.is_upstream(),
            Self::UnexpectedResponse(_) => true,
            _ => false,
        }
    }

    /// Whether this error represents a not-found condition.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl From<CoreError> for ServiceError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Serialization(e) => Self::Serialization(e),
            other => Self::InvalidInput(other.to_string()),
        }
    }
}
