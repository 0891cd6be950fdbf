use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
    response::{IntoResponse, Response},
};
use serde_json::{Map, Value};
use std::sync::Arc;

use crate::AppState;
use crate::api_error::ApiError;
use crate::query_types::{SlotFilter, YrQuery};

/// Offensive staff by slot label, for the call-sheet integration.
///
/// JSON is `{"OC": name, ...}`. With `format=text` each slot is an
/// `OC: name` line, or just the name when one `position` is requested.
/// Unknown schools and unmatched slots produce empty output, not 404.
pub async fn yr_coaches(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    query: Result<Query<YrQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(query) = query?;
    let text = query.wants_text();

    match query.slot_filter() {
        SlotFilter::All => {
            let slots = state.services.catalog.staff_lookup(&slug, query.year, None).await?;
            if text {
                let lines: Vec<String> =
                    slots.iter().map(|(slot, name)| format!("{}: {name}", slot.label())).collect();
                return Ok(lines.join("\n").into_response());
            }
            let map: Map<String, Value> = slots
                .into_iter()
                .map(|(slot, name)| (slot.label().to_owned(), Value::String(name)))
                .collect();
            Ok(Json(Value::Object(map)).into_response())
        },
        SlotFilter::One { label, slot } => {
            let name = match slot {
                Some(slot) => state
                    .services
                    .catalog
                    .staff_lookup(&slug, query.year, Some(slot))
                    .await?
                    .into_iter()
                    .next()
                    .map(|(_, name)| name),
                None => None,
            };
            if text {
                return Ok(name.unwrap_or_default().into_response());
            }
            let mut map = Map::new();
            if let Some(name) = name {
                map.insert(label, Value::String(name));
            }
            Ok(Json(Value::Object(map)).into_response())
        },
    }
}
