//! Router tests driven through `tower::ServiceExt::oneshot`.

mod route_tests;

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use coachdb_core::{NewCoach, NewSalary, SalarySource};
use coachdb_service::Services;
use coachdb_storage::Storage;
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

use crate::{AppState, create_router};

pub const TEST_KEY: &str = "test-webhook-key";

#[expect(clippy::unwrap_used, reason = "test code")]
fn seed_coach(storage: &Storage, school_id: i64, name: &str, position: &str, year: i32) -> i64 {
    storage
        .insert_coach(&NewCoach {
            name: name.to_owned(),
            school_id,
            position: Some(position.to_owned()),
            is_head_coach: position == "Head Coach",
            year,
            scraped_at: None,
        })
        .unwrap()
}

/// Georgia over two seasons.
///
/// 2024: Smart (HC), Monken (OC). 2025: Smart (HC, paid), Bobo (OC), Hartley (TE).
#[expect(clippy::unwrap_used, reason = "test code")]
pub fn create_test_app(webhook_key: Option<&str>) -> (Router, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let storage = Storage::new(&temp_dir.path().join("test.db")).unwrap();

    let (georgia, _) = storage.ensure_school("Georgia", Some("SEC")).unwrap();
    seed_coach(&storage, georgia, "Kirby Smart", "Head Coach", 2024);
    seed_coach(&storage, georgia, "Todd Monken", "Offensive Coordinator", 2024);
    let smart = seed_coach(&storage, georgia, "Kirby Smart", "Head Coach", 2025);
    seed_coach(&storage, georgia, "Mike Bobo", "Offensive Coordinator", 2025);
    seed_coach(&storage, georgia, "Todd Hartley", "Tight Ends", 2025);
    storage
        .insert_salary(&NewSalary {
            coach_id: smart,
            year: 2025,
            total_pay: Some(13_282_580),
            school_pay: Some(13_282_580),
            max_bonus: None,
            bonuses_paid: None,
            buyout: None,
            source: SalarySource::UsaToday,
            source_date: Some("2025-10-01".to_owned()),
        })
        .unwrap();

    let state = AppState::new(Services::new(storage), webhook_key.map(str::to_owned));
    (create_router(Arc::new(state)), temp_dir)
}

#[expect(clippy::unwrap_used, reason = "test code")]
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, body.to_vec())
}

#[expect(clippy::unwrap_used, reason = "test code")]
pub async fn get(app: &Router, uri: &str) -> (StatusCode, Vec<u8>) {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

#[expect(clippy::unwrap_used, reason = "test code")]
pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let (status, body) = get(app, uri).await;
    (status, serde_json::from_slice(&body).unwrap())
}
