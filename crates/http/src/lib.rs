//! HTTP API server for coachdb.
//!
//! Every route except `/` is served both at `/x` and `/api/x`.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(unreachable_pub, reason = "pub items are re-exported")]
#![allow(clippy::absolute_paths, reason = "Explicit paths for clarity")]
#![allow(missing_debug_implementations, reason = "Internal types")]
#![allow(clippy::missing_docs_in_private_items, reason = "Internal crate")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]
#![allow(clippy::min_ident_chars, reason = "Short closure params are idiomatic")]
#![allow(clippy::exhaustive_structs, reason = "HTTP types are stable")]
#![allow(clippy::single_call_fn, reason = "Helper functions improve readability")]

pub mod api_error;
mod auth;
mod handlers;
mod query_types;
mod response_types;
#[cfg(test)]
mod tests;

use axum::{
    Router,
    routing::{MethodRouter, get, post},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use coachdb_service::Services;

pub use response_types::RootResponse;

/// Shared application state for all HTTP handlers.
pub struct AppState {
    pub services: Services,
    /// Shared secret for the webhook routes. `None` disables them.
    pub webhook_key: Option<String>,
}

impl AppState {
    pub fn new(services: Services, webhook_key: Option<String>) -> Self {
        Self { services, webhook_key }
    }
}

type AppRouter = Router<Arc<AppState>>;

fn route_both(router: AppRouter, path: &str, handler: MethodRouter<Arc<AppState>>) -> AppRouter {
    router.route(path, handler.clone()).route(&format!("/api{path}"), handler)
}

pub fn create_router(state: Arc<AppState>) -> Router {
    let routes: [(&str, MethodRouter<Arc<AppState>>); 18] = [
        ("/health", get(handlers::meta::health)),
        ("/stats", get(handlers::meta::stats)),
        ("/years", get(handlers::meta::years)),
        ("/conferences", get(handlers::meta::conferences)),
        ("/coaches", get(handlers::coaches::list_coaches)),
        ("/coaches/{id}", get(handlers::coaches::get_coach)),
        ("/coaches/{id}/history", get(handlers::coaches::coach_history)),
        ("/coaches/{id}/career", get(handlers::coaches::coach_career)),
        ("/schools", get(handlers::schools::list_schools)),
        ("/schools/{slug}", get(handlers::schools::get_school)),
        ("/schools/{slug}/staff", get(handlers::schools::school_staff)),
        ("/salaries", get(handlers::schools::list_salaries)),
        ("/salaries/by-conference", get(handlers::schools::salaries_by_conference)),
        ("/search", get(handlers::coaches::search)),
        ("/changes", get(handlers::changes::get_changes)),
        ("/yr/{slug}/coaches", get(handlers::yr::yr_coaches)),
        ("/webhooks/staff-update", post(handlers::webhooks::staff_update)),
        ("/webhooks/staff-updates", get(handlers::webhooks::recent_staff_updates)),
    ];

    let router = routes
        .into_iter()
        .fold(Router::new().route("/", get(handlers::meta::root)), |router, (path, handler)| {
            route_both(router, path, handler)
        });

    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);

    router.layer(cors).layer(TraceLayer::new_for_http()).with_state(state)
}
