use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use serde_json::Value;

use crate::AppState;
use crate::api_error::ApiError;
use crate::query_types::DateQuery;

/// GET /crowns — styled crown features for `date`.
///
/// Crowns with a plant record on that date get the blue observed style,
/// the rest the red missing style; an empty result is a 404, never an
/// empty 200.
pub async fn get_crowns(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DateQuery>,
) -> Result<Json<Value>, ApiError> {
    let date = query.require_date()?;
    let styled = state.crowns.styled_crowns(date).await?;
    Ok(Json(styled))
}
