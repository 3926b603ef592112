use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::Value;

use crate::AppState;
use crate::api_error::ApiError;
use crate::query_types::{DateQuery, RenderQuery};

/// GET /image — full metadata of the archive image matching `date`.
pub async fn get_image(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DateQuery>,
) -> Result<Json<Value>, ApiError> {
    let date = query.require_date()?;
    let info = state.images.image_info(date).await?;
    Ok(Json(info))
}

/// GET /render-image — 302 redirect to a freshly minted thumbnail URL.
pub async fn render_image(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RenderQuery>,
) -> Result<Response, ApiError> {
    let date = query.require_date()?;
    let url = state.images.thumbnail_url(date, query.max_size).await?;
    // Plain 302, the status the client app expects from this route.
    Ok((StatusCode::FOUND, [(header::LOCATION, url)]).into_response())
}
