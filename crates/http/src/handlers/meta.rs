use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use std::sync::Arc;

use coachdb_core::{Conference, DbStats, SERVICE_NAME, SeasonYears};

use crate::AppState;
use crate::api_error::ApiError;
use crate::query_types::YearQuery;
use crate::response_types::RootResponse;

pub async fn root() -> Json<RootResponse> {
    Json(RootResponse { status: "ok", service: SERVICE_NAME, version: env!("CARGO_PKG_VERSION") })
}

pub async fn health() -> &'static str {
    "ok"
}

pub async fn stats(
    State(state): State<Arc<AppState>>,
    query: Result<Query<YearQuery>, QueryRejection>,
) -> Result<Json<DbStats>, ApiError> {
    let Query(query) = query?;
    Ok(Json(state.services.catalog.stats(query.year).await?))
}

pub async fn years(State(state): State<Arc<AppState>>) -> Result<Json<SeasonYears>, ApiError> {
    Ok(Json(state.services.catalog.years().await?))
}

pub async fn conferences(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Conference>>, ApiError> {
    Ok(Json(state.services.catalog.conferences().await?))
}
