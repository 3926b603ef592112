//! Gateway configuration loaded from the environment at boot.
//!
//! Every variable here is required; a missing one fails startup with a
//! [`CoreError::MissingEnv`] naming it, rather than surfacing later as a
//! mid-request failure.

use crate::error::{CoreError, Result};

/// Process-wide, read-only configuration shared by all services.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Base URL of the geospatial expression service.
    pub geo_service_url: String,
    /// Service-account identifier for the geospatial backend.
    pub geo_service_account: String,
    /// Path to the service-account key JSON.
    pub geo_service_account_json: String,
    /// Project the geospatial calls are scoped to.
    pub geo_project_id: String,
    /// Asset ID of the satellite image archive.
    pub image_collection: String,
    /// Asset ID of the crown-geometry feature collection.
    pub crowns: String,
    /// Asset ID of the observation-label feature collection.
    pub labels: String,
    /// Base URL of the document database.
    pub docstore_url: String,
    /// Path to the document-store credentials file.
    pub docstore_credentials: String,
    /// Origins allowed by the CORS gate.
    pub cors_origins: Vec<String>,
}

impl GatewayConfig {
    /// Reads the full configuration from the environment.
    ///
    /// # Errors
    /// Returns [`CoreError::MissingEnv`] for the first unset variable.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            geo_service_url: required("GEO_SERVICE_URL")?,
            geo_service_account: required("GEO_SERVICE_ACCOUNT")?,
            geo_service_account_json: required("GEO_SERVICE_ACCOUNT_JSON")?,
            geo_project_id: required("GEO_PROJECT_ID")?,
            image_collection: required("IMAGE_COLLECTION")?,
            crowns: required("CROWNS")?,
            labels: required("LABELS")?,
            docstore_url: required("DOCSTORE_URL")?,
            docstore_credentials: required("DOCSTORE_CREDENTIALS")?,
            cors_origins: parse_origins(&required("CORS_ORIGINS")?),
        })
    }
}

fn required(var: &'static str) -> Result<String> {
    match std::env::var(var) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(CoreError::MissingEnv(var)),
    }
}

/// Splits the comma-separated allow-list, dropping empty entries so a
/// trailing comma does not admit the empty origin.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',').map(str::trim).filter(|o| !o.is_empty()).map(ToOwned::to_owned).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_origins_splits_and_trims() {
        let origins = parse_origins("https://app.example.org, http://localhost:5173");
        assert_eq!(origins, vec!["https://app.example.org", "http://localhost:5173"]);
    }

    #[test]
    fn parse_origins_drops_empty_entries() {
        assert_eq!(parse_origins("https://app.example.org,"), vec!["https://app.example.org"]);
        assert!(parse_origins("").is_empty());
    }

    #[test]
    fn required_rejects_missing_var() {
        assert!(matches!(
            required("CROWNWATCH_TEST_REQUIRED_71231"),
            Err(CoreError::MissingEnv("CROWNWATCH_TEST_REQUIRED_71231"))
        ));
    }
}
