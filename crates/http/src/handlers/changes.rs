use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use std::sync::Arc;

use coachdb_core::ChangeReport;

use crate::AppState;
use crate::api_error::ApiError;
use crate::query_types::ChangesQuery;

pub async fn get_changes(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ChangesQuery>, QueryRejection>,
) -> Result<Json<ChangeReport>, ApiError> {
    let Query(ChangesQuery { from, to }) = query?;
    Ok(Json(state.services.changes.diff(from, to).await?))
}
