#![expect(clippy::unwrap_used, reason = "test code")]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::json;

use super::{create_test_app, get, get_json};

#[tokio::test]
async fn root_and_health() {
    let (app, _temp_dir) = create_test_app(None);

    let (status, body) = get_json(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "Coach Database API");

    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"ok");
}

#[tokio::test]
async fn api_prefix_serves_the_same_data() {
    let (app, _temp_dir) = create_test_app(None);

    let (_, plain) = get_json(&app, "/coaches").await;
    let (status, prefixed) = get_json(&app, "/api/coaches").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(plain, prefixed);
    // latest season only, head coach first
    assert_eq!(plain.as_array().unwrap().len(), 3);
    assert_eq!(plain[0]["name"], "Kirby Smart");
    assert_eq!(plain[0]["total_pay"], 13_282_580);
}

#[tokio::test]
async fn coaches_filter_by_position_category() {
    let (app, _temp_dir) = create_test_app(None);

    let (status, rows) = get_json(&app, "/coaches?category=tight_ends").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(rows.as_array().unwrap().len(), 1);
    assert_eq!(rows[0]["name"], "Todd Hartley");
    assert_eq!(rows[0]["category"], "tight_ends");

    let (_, all) = get_json(&app, "/coaches").await;
    assert_eq!(all[0]["category"], "head_coach");

    let (status, _) = get_json(&app, "/coaches?category=waterboy").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn years_and_stats_default_to_latest_season() {
    let (app, _temp_dir) = create_test_app(None);

    let (_, years) = get_json(&app, "/years").await;
    assert_eq!(years, json!({"years": [2025, 2024], "latest": 2025}));

    let (_, stats) = get_json(&app, "/api/stats").await;
    assert_eq!(stats["year"], 2025);
    assert_eq!(stats["head_coaches"], 1);
    assert_eq!(stats["assistants"], 2);

    let (_, stats) = get_json(&app, "/stats?year=2024").await;
    assert_eq!(stats["assistants"], 1);
}

#[tokio::test]
async fn missing_rows_are_404_with_json_error() {
    let (app, _temp_dir) = create_test_app(None);

    for uri in ["/coaches/9999", "/coaches/9999/career", "/schools/nowhere", "/api/schools/nowhere/staff"] {
        let (status, body) = get_json(&app, uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert!(body["error"].is_string(), "{uri}");
    }
}

#[tokio::test]
async fn school_detail_and_staff() {
    let (app, _temp_dir) = create_test_app(None);

    let (status, school) = get_json(&app, "/schools/georgia").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(school["year"], 2025);
    assert_eq!(school["staff"].as_array().unwrap().len(), 3);

    let (_, staff) = get_json(&app, "/schools/georgia/staff?year=2024").await;
    assert_eq!(staff.as_array().unwrap().len(), 2);

    let (_, schools) = get_json(&app, "/schools?conference=SEC").await;
    assert_eq!(schools[0]["head_coach"], "Kirby Smart");
}

#[tokio::test]
async fn salary_views_by_buyout_and_conference() {
    let (app, _temp_dir) = create_test_app(None);

    let (status, by_buyout) = get_json(&app, "/salaries?sort=buyout").await;
    assert_eq!(status, StatusCode::OK);
    // the seeded salary has no buyout
    assert!(by_buyout.as_array().unwrap().is_empty());

    let (status, conferences) = get_json(&app, "/api/salaries/by-conference?power_four=true").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(conferences.as_array().unwrap().len(), 1);
    assert_eq!(conferences[0]["conference"], "SEC");
    assert_eq!(conferences[0]["power_four"], true);
    assert_eq!(conferences[0]["avg_pay"], 13_282_580);
    assert_eq!(conferences[0]["top_paid"][0]["coach_name"], "Kirby Smart");

    let (status, _) = get_json(&app, "/salaries?sort=biggest").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn short_search_and_bad_query_are_400() {
    let (app, _temp_dir) = create_test_app(None);

    let (status, body) = get_json(&app, "/search?q=a").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, _) = get_json(&app, "/coaches?limit=lots").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, hits) = get_json(&app, "/search?q=bobo").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(hits[0]["name"], "Mike Bobo");
}

#[tokio::test]
async fn changes_report_between_seasons() {
    let (app, _temp_dir) = create_test_app(None);

    let (status, report) = get_json(&app, "/changes?from=2024&to=2025").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!((report["from"].as_i64(), report["to"].as_i64()), (Some(2024), Some(2025)));
    let hires: Vec<&str> =
        report["new_hires"].as_array().unwrap().iter().map(|r| r["name"].as_str().unwrap()).collect();
    assert!(hires.contains(&"Mike Bobo") && hires.contains(&"Todd Hartley"));
    assert_eq!(report["departures"][0]["name"], "Todd Monken");
    // Georgia is SEC
    assert_eq!(report["departures"][0]["alert"], true);

    let (status, _) = get_json(&app, "/changes?from=2024").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn yr_lookup_json_and_text() {
    let (app, _temp_dir) = create_test_app(None);

    let (_, all) = get_json(&app, "/yr/georgia/coaches").await;
    assert_eq!(all, json!({"OC": "Mike Bobo", "TE": "Todd Hartley"}));

    let (_, text) = get(&app, "/yr/georgia/coaches?format=text").await;
    assert_eq!(String::from_utf8(text).unwrap(), "OC: Mike Bobo\nTE: Todd Hartley");

    let (_, one) = get(&app, "/yr/georgia/coaches?position=te&format=text").await;
    assert_eq!(one, b"Todd Hartley");

    let (_, one) = get_json(&app, "/yr/georgia/coaches?position=OC").await;
    assert_eq!(one, json!({"OC": "Mike Bobo"}));

    let (_, none) = get_json(&app, "/yr/georgia/coaches?position=WR").await;
    assert_eq!(none, json!({}));

    let (status, unknown) = get_json(&app, "/yr/atlantis/coaches").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(unknown, json!({}));

    let (_, old) = get_json(&app, "/yr/georgia/coaches?year=2024").await;
    assert_eq!(old, json!({"OC": "Todd Monken"}));
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let (app, _temp_dir) = create_test_app(None);
    let request = Request::get("/health").header("origin", "https://example.test").body(Body::empty()).unwrap();

    let response = tower::ServiceExt::oneshot(app, request).await.unwrap();

    assert_eq!(response.headers()["access-control-allow-origin"], "*");
}
