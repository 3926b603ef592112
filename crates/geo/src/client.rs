use serde_json::Value;

use crownwatch_core::{THUMBNAIL_BANDS, THUMBNAIL_MAX, THUMBNAIL_MIN};

use crate::error::GeoError;
use crate::expr::Expr;

/// Rendering parameters for a minted thumbnail URL.
#[derive(Debug, Clone)]
pub struct ThumbnailParams {
    pub bands: Vec<String>,
    pub min: u8,
    pub max: u8,
    pub dimension: u32,
}

impl ThumbnailParams {
    /// Fixed 3-band RGB mapping with the full 0–255 stretch.
    #[must_use]
    pub fn rgb(dimension: u32) -> Self {
        Self {
            bands: THUMBNAIL_BANDS.iter().map(|b| (*b).to_owned()).collect(),
            min: THUMBNAIL_MIN,
            max: THUMBNAIL_MAX,
            dimension,
        }
    }
}

/// Client for the geospatial expression service.
///
/// Authentication happens once at startup via [`GeoClient::authenticate`];
/// if the service-account exchange fails the client keeps working
/// project-scoped and unauthenticated, matching the platform's anonymous
/// fallback.
pub struct GeoClient {
    client: reqwest::Client,
    base_url: String,
    project_id: String,
    service_account: String,
    key_path: String,
    token: Option<String>,
}

impl std::fmt::Debug for GeoClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeoClient")
            .field("base_url", &self.base_url)
            .field("project_id", &self.project_id)
            .field("service_account", &self.service_account)
            .field("token", &self.token.as_ref().map(|_| "***"))
            .finish_non_exhaustive()
    }
}

impl GeoClient {
    /// Creates an unauthenticated client.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built (TLS backend failure).
    pub fn new(
        base_url: &str,
        project_id: &str,
        service_account: &str,
        key_path: &str,
    ) -> Result<Self, GeoError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .map_err(|e| GeoError::ClientInit(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            project_id: project_id.to_owned(),
            service_account: service_account.to_owned(),
            key_path: key_path.to_owned(),
            token: None,
        })
    }

    /// Exchanges the service-account key for a bearer token.
    ///
    /// A failed exchange is not fatal: the client falls back to the
    /// project-scoped anonymous session and logs the reason at warn level.
    pub async fn authenticate(&mut self) {
        match self.request_token().await {
            Ok(token) => {
                tracing::info!(account = %self.service_account, "geospatial service authenticated");
                self.token = Some(token);
            },
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    project = %self.project_id,
                    "service-account auth failed, continuing with anonymous project session"
                );
                self.token = None;
            },
        }
    }

    async fn request_token(&self) -> Result<String, GeoError> {
        let key: Value = {
            let raw = tokio::fs::read_to_string(&self.key_path)
                .await
                .map_err(|e| GeoError::Auth(format!("cannot read key file: {e}")))?;
            serde_json::from_str(&raw).map_err(|e| GeoError::Auth(format!("invalid key file: {e}")))?
        };

        let response = self
            .client
            .post(format!("{}/v1/token", self.base_url))
            .json(&serde_json::json!({
                "serviceAccount": self.service_account,
                "key": key,
                "project": self.project_id,
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| "could not read body".to_owned());
            return Err(GeoError::HttpStatus { code: status.as_u16(), body });
        }

        let body: Value = response.json().await?;
        body.get("accessToken")
            .and_then(Value::as_str)
            .map(ToOwned::to_owned)
            .ok_or(GeoError::MissingField("accessToken"))
    }

    /// Evaluates an expression graph on the remote service and returns the
    /// resulting JSON value.
    ///
    /// # Errors
    /// Returns an error if the request fails, the service answers with a
    /// non-success status, or the body is not JSON.
    pub async fn compute(&self, expr: Expr) -> Result<Value, GeoError> {
        let response = self
            .post_json(
                "/v1/value:compute",
                &serde_json::json!({
                    "expression": expr.into_value(),
                    "project": self.project_id,
                }),
            )
            .await?;
        Ok(response)
    }

    /// Mints a thumbnail URL for a single-image expression.
    ///
    /// # Errors
    /// Returns an error on request/status failure or when the response
    /// carries no URL.
    pub async fn thumbnail_url(
        &self,
        image: Expr,
        params: &ThumbnailParams,
    ) -> Result<String, GeoError> {
        let response = self
            .post_json(
                "/v1/thumbnails",
                &serde_json::json!({
                    "expression": image.into_value(),
                    "bands": params.bands,
                    "min": params.min,
                    "max": params.max,
                    "dimensions": params.dimension,
                    "project": self.project_id,
                }),
            )
            .await?;
        response
            .get("url")
            .and_then(Value::as_str)
            .map(ToOwned::to_owned)
            .ok_or(GeoError::MissingField("url"))
    }

    async fn post_json(&self, path: &str, body: &Value) -> Result<Value, GeoError> {
        let mut request = self.client.post(format!("{}{path}", self.base_url)).json(body);
        if let Some(ref token) = self.token {
            request = request.header("Authorization", format!("Bearer {token}"));
        }
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| "could not read body".to_owned());
            return Err(GeoError::HttpStatus { code: status.as_u16(), body });
        }

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| GeoError::JsonParse {
            context: format!("{path} response"),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn test_client(server: &MockServer) -> GeoClient {
        GeoClient::new(&server.uri(), "eco-project", "svc@eco-project", "/nonexistent/key.json")
            .unwrap()
    }

    #[tokio::test]
    async fn compute_sends_expression_and_project() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/value:compute"))
            .and(body_partial_json(serde_json::json!({ "project": "eco-project" })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "type": "Image" })),
            )
            .mount(&server)
            .await;

        let client = test_client(&server);
        let result =
            client.compute(Expr::image_collection("archive/images").first()).await.unwrap();
        assert_eq!(result["type"], "Image");
    }

    #[tokio::test]
    async fn compute_surfaces_upstream_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/value:compute"))
            .respond_with(ResponseTemplate::new(500).set_body_string("evaluation failed"))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let err = client.compute(Expr::feature_collection("assets/crowns")).await.unwrap_err();
        match err {
            GeoError::HttpStatus { code, body } => {
                assert_eq!(code, 500);
                assert_eq!(body, "evaluation failed");
            },
            other => panic!("expected HttpStatus, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn thumbnail_url_extracts_minted_url() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/thumbnails"))
            .and(body_partial_json(serde_json::json!({
                "bands": ["b1", "b2", "b3"],
                "min": 0,
                "max": 255,
                "dimensions": 1024,
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "url": "https://tiles.example.org/thumb/abc123"
            })))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let url = client
            .thumbnail_url(
                Expr::image_collection("archive/images").first(),
                &ThumbnailParams::rgb(1024),
            )
            .await
            .unwrap();
        assert_eq!(url, "https://tiles.example.org/thumb/abc123");
    }

    #[tokio::test]
    async fn thumbnail_without_url_is_missing_field() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/thumbnails"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let err = client
            .thumbnail_url(
                Expr::image_collection("archive/images").first(),
                &ThumbnailParams::rgb(512),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, GeoError::MissingField("url")));
    }

    #[tokio::test]
    async fn failed_auth_falls_back_to_anonymous() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/value:compute"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "size": 0 })),
            )
            .mount(&server)
            .await;

        // Key file does not exist, so the token exchange never happens.
        let mut client = test_client(&server);
        client.authenticate().await;
        let result =
            client.compute(Expr::feature_collection("assets/crowns").size()).await.unwrap();
        assert_eq!(result["size"], 0);
    }

    #[tokio::test]
    async fn successful_auth_attaches_bearer_token() {
        let server = MockServer::start().await;
        let key_file = std::env::temp_dir().join("crownwatch-geo-test-key.json");
        std::fs::write(&key_file, "{\"private_key\": \"stub\"}").unwrap();

        Mock::given(method("POST"))
            .and(path("/v1/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "accessToken": "tok-123"
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v1/value:compute"))
            .and(header("Authorization", "Bearer tok-123"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "size": 3 })),
            )
            .mount(&server)
            .await;

        let mut client = GeoClient::new(
            &server.uri(),
            "eco-project",
            "svc@eco-project",
            key_file.to_str().unwrap(),
        )
        .unwrap();
        client.authenticate().await;
        let result =
            client.compute(Expr::feature_collection("assets/crowns").size()).await.unwrap();
        assert_eq!(result["size"], 3);

        std::fs::remove_file(&key_file).ok();
    }
}
