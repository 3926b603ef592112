use serde::Deserialize;
use serde_json::Value;

use crate::error::StoreError;

/// A stored document: server-assigned ID plus its field map.
#[derive(Debug, Clone, Deserialize)]
pub struct Document {
    pub id: String,
    pub fields: Value,
}

impl Document {
    /// String value of a field, if present and non-null.
    #[must_use]
    pub fn str_field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(Value::as_str)
    }
}

/// Client for the document database.
///
/// Credentials are loaded once at construction; the store mints document IDs
/// itself, so this client never generates identifiers locally.
pub struct DocStore {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl std::fmt::Debug for DocStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocStore")
            .field("base_url", &self.base_url)
            .field("token", &"***")
            .finish_non_exhaustive()
    }
}

impl DocStore {
    /// Creates a client from the credentials file at `credentials_path`.
    ///
    /// # Errors
    /// Returns an error if the credentials file is unreadable or carries no
    /// token, or if the HTTP client cannot be built.
    pub fn new(base_url: &str, credentials_path: &str) -> Result<Self, StoreError> {
        let raw = std::fs::read_to_string(credentials_path)
            .map_err(|e| StoreError::Credentials(format!("cannot read credentials file: {e}")))?;
        let creds: Value = serde_json::from_str(&raw)
            .map_err(|e| StoreError::Credentials(format!("invalid credentials file: {e}")))?;
        let token = creds
            .get("token")
            .and_then(Value::as_str)
            .ok_or_else(|| StoreError::Credentials("credentials file has no token".to_owned()))?
            .to_owned();

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| StoreError::ClientInit(e.to_string()))?;
        Ok(Self { client, base_url: base_url.trim_end_matches('/').to_owned(), token })
    }

    /// All documents in `collection` whose `field` equals `value`.
    ///
    /// # Errors
    /// Returns an error on request/status failure or a malformed response.
    pub async fn query_equal(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> Result<Vec<Document>, StoreError> {
        let path = format!("/v1/{collection}:query");
        let body = self
            .send(self.client.post(format!("{}{path}", self.base_url)).json(
                &serde_json::json!({
                    "where": { "field": field, "op": "==", "value": value },
                }),
            ))
            .await?;

        let documents = body
            .get("documents")
            .cloned()
            .ok_or(StoreError::MissingField("documents"))?;
        serde_json::from_value(documents).map_err(|e| StoreError::JsonParse {
            context: format!("{path} documents"),
            source: e,
        })
    }

    /// Merge-upserts the document `doc_id` in `collection`.
    ///
    /// Fields present in `fields` overwrite; fields absent are left alone.
    ///
    /// # Errors
    /// Returns an error on request or status failure.
    pub async fn set_merge(
        &self,
        collection: &str,
        doc_id: &str,
        fields: &Value,
    ) -> Result<(), StoreError> {
        self.send(
            self.client
                .patch(format!("{}/v1/{collection}/{doc_id}", self.base_url))
                .query(&[("merge", "true")])
                .json(fields),
        )
        .await?;
        Ok(())
    }

    /// Creates a child document with a store-generated ID under
    /// `{collection}/{parent_id}/{subcollection}` and returns that ID.
    ///
    /// # Errors
    /// Returns an error on request/status failure or when the response
    /// carries no ID.
    pub async fn add_document(
        &self,
        collection: &str,
        parent_id: &str,
        subcollection: &str,
        fields: &Value,
    ) -> Result<String, StoreError> {
        let body = self
            .send(
                self.client
                    .post(format!(
                        "{}/v1/{collection}/{parent_id}/{subcollection}",
                        self.base_url
                    ))
                    .json(fields),
            )
            .await?;
        body.get("id")
            .and_then(Value::as_str)
            .map(ToOwned::to_owned)
            .ok_or(StoreError::MissingField("id"))
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Value, StoreError> {
        let response = request
            .header("Authorization", format!("Bearer {}", self.token))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| "could not read body".to_owned());
            return Err(StoreError::HttpStatus { code: status.as_u16(), body });
        }

        let text = response.text().await?;
        if text.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| StoreError::JsonParse {
            context: "document store response".to_owned(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{body_partial_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn write_credentials() -> std::path::PathBuf {
        let path = std::env::temp_dir().join("crownwatch-store-test-creds.json");
        std::fs::write(&path, "{\"token\": \"store-tok\"}").unwrap();
        path
    }

    fn test_store(server: &MockServer) -> DocStore {
        let creds = write_credentials();
        DocStore::new(&server.uri(), creds.to_str().unwrap()).unwrap()
    }

    #[test]
    fn new_rejects_missing_credentials_file() {
        let err = DocStore::new("http://localhost:1", "/nonexistent/creds.json").unwrap_err();
        assert!(matches!(err, StoreError::Credentials(_)));
    }

    #[tokio::test]
    async fn query_equal_sends_filter_and_parses_documents() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/plants:query"))
            .and(header("Authorization", "Bearer store-tok"))
            .and(body_partial_json(serde_json::json!({
                "where": { "field": "date", "op": "==", "value": "2024_05_17" },
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "documents": [
                    { "id": "tree-1_2024-05-17", "fields": { "globalId": "tree-1" } },
                    { "id": "tree-2_2024-05-17", "fields": { "globalId": "tree-2" } },
                ]
            })))
            .mount(&server)
            .await;

        let store = test_store(&server);
        let docs = store.query_equal("plants", "date", "2024_05_17").await.unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].str_field("globalId"), Some("tree-1"));
    }

    #[tokio::test]
    async fn set_merge_patches_with_merge_flag() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/v1/plants/tree-1_2024-05-17"))
            .and(query_param("merge", "true"))
            .and(body_partial_json(serde_json::json!({ "globalId": "tree-1" })))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let store = test_store(&server);
        store
            .set_merge(
                "plants",
                "tree-1_2024-05-17",
                &serde_json::json!({ "globalId": "tree-1", "date": "2024-05-17" }),
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn add_document_returns_store_minted_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/plants/tree-1_2024-05-17/observations"))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(serde_json::json!({ "id": "obs-8842" })),
            )
            .mount(&server)
            .await;

        let store = test_store(&server);
        let id = store
            .add_document(
                "plants",
                "tree-1_2024-05-17",
                "observations",
                &serde_json::json!({ "leafing": "Fully Leafed" }),
            )
            .await
            .unwrap();
        assert_eq!(id, "obs-8842");
    }

    #[tokio::test]
    async fn upstream_failure_surfaces_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/plants:query"))
            .respond_with(ResponseTemplate::new(503).set_body_string("store unavailable"))
            .mount(&server)
            .await;

        let store = test_store(&server);
        let err = store.query_equal("plants", "date", "2024_05_17").await.unwrap_err();
        assert!(err.is_upstream());
        assert!(matches!(err, StoreError::HttpStatus { code: 503, .. }));
    }
}
