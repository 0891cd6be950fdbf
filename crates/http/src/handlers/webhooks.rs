use axum::{
    Json,
    extract::{Query, State, rejection::{JsonRejection, QueryRejection}},
    http::HeaderMap,
};
use std::sync::Arc;

use coachdb_core::{StaffUpdate, StaffUpdateRecord, StaffUpdateResponse};

use crate::AppState;
use crate::api_error::ApiError;
use crate::auth::require_api_key;
use crate::query_types::StaffUpdatesQuery;

/// The key is checked before the body is parsed.
pub async fn staff_update(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Result<Json<StaffUpdate>, JsonRejection>,
) -> Result<Json<StaffUpdateResponse>, ApiError> {
    require_api_key(&headers, state.webhook_key.as_deref())?;
    let Json(update) = body?;
    let response = state.services.staff_updates.apply(&update).await?;
    Ok(Json(response))
}

pub async fn recent_staff_updates(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    query: Result<Query<StaffUpdatesQuery>, QueryRejection>,
) -> Result<Json<Vec<StaffUpdateRecord>>, ApiError> {
    require_api_key(&headers, state.webhook_key.as_deref())?;
    let Query(query) = query?;
    Ok(Json(state.services.staff_updates.recent(query.capped_limit()).await?))
}
