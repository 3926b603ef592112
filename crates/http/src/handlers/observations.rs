use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;

use crownwatch_core::ObservationInput;

use crate::AppState;
use crate::api_error::ApiError;
use crate::query_types::DateQuery;
use crate::response_types::{GlobalIdsResponse, ObservationCreatedResponse};

/// POST /observations — persist a field observation.
///
/// Merge-upserts the parent plant record, then creates a new auto-ID child
/// observation. A body that fails to deserialize is a 400 like any other
/// invalid input. Pre-flight OPTIONS never reaches this handler; the CORS
/// layer answers it.
pub async fn add_observation(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ObservationInput>, JsonRejection>,
) -> Result<(StatusCode, Json<ObservationCreatedResponse>), ApiError> {
    let Json(input) = payload?;
    let receipt = state.observations.submit(&input).await?;
    Ok((
        StatusCode::CREATED,
        Json(ObservationCreatedResponse {
            success: true,
            parent_id: receipt.parent_id,
            observation_id: receipt.observation_id,
        }),
    ))
}

/// GET /get-globalids-by-date — globalId values of every plant record
/// matching `date`, with a count.
pub async fn get_globalids_by_date(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DateQuery>,
) -> Result<Json<GlobalIdsResponse>, ApiError> {
    let date = query.require_date()?;
    let global_ids = state.observations.global_ids_by_date(date).await?;
    let count = global_ids.len();
    Ok(Json(GlobalIdsResponse { date: date.to_owned(), global_ids, count }))
}
