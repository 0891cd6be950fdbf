use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
};
use std::sync::Arc;

use coachdb_core::{
    Coach, ConferenceSalaryQuery, ConferenceSalaryStats, SalaryQuery, SalaryRow, SchoolDetail,
    SchoolQuery, SchoolSummary,
};

use crate::AppState;
use crate::api_error::ApiError;
use crate::query_types::YearQuery;

pub async fn list_schools(
    State(state): State<Arc<AppState>>,
    query: Result<Query<SchoolQuery>, QueryRejection>,
) -> Result<Json<Vec<SchoolSummary>>, ApiError> {
    let Query(query) = query?;
    Ok(Json(state.services.catalog.schools(query).await?))
}

pub async fn get_school(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    query: Result<Query<YearQuery>, QueryRejection>,
) -> Result<Json<SchoolDetail>, ApiError> {
    let Query(query) = query?;
    state
        .services
        .catalog
        .school(&slug, query.year)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("school", &slug))
}

pub async fn school_staff(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    query: Result<Query<YearQuery>, QueryRejection>,
) -> Result<Json<Vec<Coach>>, ApiError> {
    let Query(query) = query?;
    state
        .services
        .catalog
        .school_staff(&slug, query.year)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("school", &slug))
}

pub async fn list_salaries(
    State(state): State<Arc<AppState>>,
    query: Result<Query<SalaryQuery>, QueryRejection>,
) -> Result<Json<Vec<SalaryRow>>, ApiError> {
    let Query(query) = query?;
    Ok(Json(state.services.catalog.salaries(query).await?))
}

pub async fn salaries_by_conference(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ConferenceSalaryQuery>, QueryRejection>,
) -> Result<Json<Vec<ConferenceSalaryStats>>, ApiError> {
    let Query(query) = query?;
    Ok(Json(state.services.catalog.conference_salaries(query).await?))
}
