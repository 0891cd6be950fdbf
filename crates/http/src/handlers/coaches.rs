use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
};
use std::sync::Arc;

use coachdb_core::{CareerStint, Coach, CoachQuery, SearchHit, SearchQuery};

use crate::AppState;
use crate::api_error::ApiError;

pub async fn list_coaches(
    State(state): State<Arc<AppState>>,
    query: Result<Query<CoachQuery>, QueryRejection>,
) -> Result<Json<Vec<Coach>>, ApiError> {
    let Query(query) = query?;
    Ok(Json(state.services.catalog.coaches(query).await?))
}

pub async fn get_coach(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Coach>, ApiError> {
    state
        .services
        .catalog
        .coach(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("coach", id))
}

pub async fn coach_history(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<Coach>>, ApiError> {
    state
        .services
        .catalog
        .coach_history(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("coach", id))
}

pub async fn coach_career(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<CareerStint>>, ApiError> {
    state
        .services
        .catalog
        .coach_career(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("coach", id))
}

pub async fn search(
    State(state): State<Arc<AppState>>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Json<Vec<SearchHit>>, ApiError> {
    let Query(query) = query?;
    Ok(Json(state.services.catalog.search(query).await?))
}
