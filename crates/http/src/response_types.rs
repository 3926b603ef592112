//! Response types (Serialize)

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ObservationCreatedResponse {
    pub success: bool,
    pub parent_id: String,
    pub observation_id: String,
}

#[derive(Debug, Serialize)]
pub struct GlobalIdsResponse {
    pub date: String,
    pub global_ids: Vec<String>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
#[non_exhaustive]
pub struct ReadinessResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

#[derive(Debug, Serialize)]
#[non_exhaustive]
pub struct VersionResponse {
    pub version: &'static str,
}
