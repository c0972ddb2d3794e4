//! Integration tests for the dashboard API router.
//!
//! Every test drives the router in-process with `oneshot` against an
//! in-memory backend, with tokio's clock paused so idle budgets can be
//! crossed instantly.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use dockdash_common::types::{ContainerId, ContainerOverview};
use dockdash_runtime::backend::InMemoryBackend;
use dockdash_runtime::backend::memory::Operation;
use dockdash_runtime::engine::Engine;
use dockdash_server::create_router;
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

const BUDGET: Duration = Duration::from_secs(300);

struct Harness {
    backend: Arc<InMemoryBackend>,
    app: Router,
    _static_dir: TempDir,
}

fn harness() -> Harness {
    harness_with_budget(BUDGET)
}

fn harness_with_budget(budget: Duration) -> Harness {
    let backend = Arc::new(InMemoryBackend::new());
    backend.add_container("c1", "web", "nginx:alpine", false);
    backend.add_container("c2", "db", "postgres:16", false);

    let static_dir = TempDir::new().expect("tempdir");
    std::fs::write(
        static_dir.path().join("index.html"),
        "<!doctype html><title>dockdash</title>",
    )
    .expect("write index");

    let engine = Arc::new(Engine::new(backend.clone(), budget));
    let app = create_router(engine, static_dir.path());
    Harness {
        backend,
        app,
        _static_dir: static_dir,
    }
}

async fn send(app: &Router, method: Method, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, json)
}

async fn list(app: &Router) -> Vec<ContainerOverview> {
    let (status, json) = send(app, Method::GET, "/api/containers").await;
    assert_eq!(status, StatusCode::OK);
    serde_json::from_value(json).expect("container list")
}

fn row<'a>(rows: &'a [ContainerOverview], id: &str) -> &'a ContainerOverview {
    rows.iter()
        .find(|r| r.id.as_str() == id)
        .expect("container listed")
}

// ============================================================================
// Listing
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_list_stopped_containers_have_no_timer() {
    let h = harness();

    let (status, json) = send(&h.app, Method::GET, "/api/containers").await;

    assert_eq!(status, StatusCode::OK);
    let rows = json.as_array().expect("array");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["id"], "c1");
    assert_eq!(rows[0]["name"], "web");
    assert_eq!(rows[0]["image"], "nginx:alpine");
    assert_eq!(rows[0]["status"], "Created");
    assert!(rows[0]["remainingTime"].is_null());
}

#[tokio::test(start_paused = true)]
async fn test_list_adopts_already_running_container() {
    let h = harness();
    h.backend.add_container("c3", "cache", "redis:7", true);

    let rows = list(&h.app).await;

    assert_eq!(row(&rows, "c3").remaining_time, Some(300));
    assert_eq!(row(&rows, "c1").remaining_time, None);
}

#[tokio::test(start_paused = true)]
async fn test_list_failure_is_500_with_error_body() {
    let h = harness();
    h.backend.fail(Operation::List);

    let (status, json) = send(&h.app, Method::GET, "/api/containers").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "failed to list containers");
}

// ============================================================================
// Start / stop
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_start_schedules_full_budget() {
    let h = harness();

    let (status, json) = send(&h.app, Method::POST, "/api/containers/c1/start").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "container started");

    let rows = list(&h.app).await;
    let c1 = row(&rows, "c1");
    assert!(c1.status.contains("Up"));
    assert_eq!(c1.remaining_time, Some(300));
}

#[tokio::test(start_paused = true)]
async fn test_stop_clears_timer() {
    let h = harness();
    let _ = send(&h.app, Method::POST, "/api/containers/c1/start").await;

    let (status, json) = send(&h.app, Method::POST, "/api/containers/c1/stop").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "container stopped");

    let rows = list(&h.app).await;
    assert_eq!(row(&rows, "c1").remaining_time, None);

    tokio::time::sleep(BUDGET * 2).await;
    assert_eq!(h.backend.calls(Operation::Stop, &ContainerId::new("c1")), 1);
}

#[tokio::test(start_paused = true)]
async fn test_start_unknown_container_is_500() {
    let h = harness();

    let (status, json) = send(&h.app, Method::POST, "/api/containers/ghost/start").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "failed to start container");
}

#[tokio::test(start_paused = true)]
async fn test_stop_failure_is_500_and_keeps_timer() {
    let h = harness();
    let _ = send(&h.app, Method::POST, "/api/containers/c1/start").await;
    h.backend.fail(Operation::Stop);

    let (status, json) = send(&h.app, Method::POST, "/api/containers/c1/stop").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "failed to stop container");
    let rows = list(&h.app).await;
    assert_eq!(row(&rows, "c1").remaining_time, Some(300));
}

#[tokio::test(start_paused = true)]
async fn test_start_resets_countdown() {
    let h = harness();
    let _ = send(&h.app, Method::POST, "/api/containers/c1/start").await;
    tokio::time::sleep(Duration::from_secs(240)).await;

    let _ = send(&h.app, Method::POST, "/api/containers/c1/start").await;
    tokio::time::sleep(Duration::from_secs(240)).await;

    let rows = list(&h.app).await;
    assert_eq!(row(&rows, "c1").remaining_time, Some(60));
}

// ============================================================================
// Settings
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_settings_report_configured_budget() {
    let h = harness_with_budget(Duration::from_secs(60));

    let (status, json) = send(&h.app, Method::GET, "/api/settings").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["idleBudget"], 60);

    let _ = send(&h.app, Method::POST, "/api/containers/c1/start").await;
    let rows = list(&h.app).await;
    assert_eq!(row(&rows, "c1").remaining_time, Some(60));
}

#[tokio::test(start_paused = true)]
async fn test_settings_default_budget() {
    let h = harness();

    let (_, json) = send(&h.app, Method::GET, "/api/settings").await;

    assert_eq!(json["idleBudget"], 300);
}

// ============================================================================
// Auto-stop end to end
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_idle_container_is_stopped_exactly_once() {
    let h = harness();
    let c1 = ContainerId::new("c1");

    let _ = send(&h.app, Method::POST, "/api/containers/c1/start").await;
    let rows = list(&h.app).await;
    assert_eq!(row(&rows, "c1").remaining_time, Some(300));
    assert!(row(&rows, "c1").status.contains("Up"));

    tokio::time::sleep(BUDGET + Duration::from_secs(1)).await;

    assert_eq!(h.backend.calls(Operation::Stop, &c1), 1);
    let rows = list(&h.app).await;
    let c1_row = row(&rows, "c1");
    assert_eq!(c1_row.remaining_time, None);
    assert!(!c1_row.is_running());

    tokio::time::sleep(BUDGET * 2).await;
    assert_eq!(h.backend.calls(Operation::Stop, &c1), 1);
}

// ============================================================================
// Logs
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_logs_returns_joined_lines() {
    let h = harness();
    let c2 = ContainerId::new("c2");
    h.backend.push_log(&c2, "ready to accept connections").unwrap();
    h.backend.push_log(&c2, "checkpoint complete").unwrap();

    let (status, json) = send(&h.app, Method::GET, "/api/containers/c2/logs").await;

    assert_eq!(status, StatusCode::OK);
    let logs = json["logs"].as_str().expect("logs string");
    let lines: Vec<_> = logs.split('\n').collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with("ready to accept connections"));
    assert!(lines[1].ends_with("checkpoint complete"));
}

#[tokio::test(start_paused = true)]
async fn test_logs_are_limited_to_last_hundred_lines() {
    let h = harness();
    let c2 = ContainerId::new("c2");
    for i in 0..150 {
        h.backend.push_log(&c2, &format!("line {i}")).unwrap();
    }

    let (_, json) = send(&h.app, Method::GET, "/api/containers/c2/logs").await;

    let logs = json["logs"].as_str().expect("logs string");
    assert_eq!(logs.lines().count(), 100);
    assert!(logs.lines().next().unwrap().ends_with("line 50"));
}

#[tokio::test(start_paused = true)]
async fn test_logs_failure_is_500() {
    let h = harness();
    h.backend.fail(Operation::Logs);

    let (status, json) = send(&h.app, Method::GET, "/api/containers/c2/logs").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "failed to fetch container logs");
}

// ============================================================================
// Static UI
// ============================================================================

#[tokio::test]
async fn test_root_serves_index() {
    let h = harness();

    let response = h
        .app
        .clone()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert!(String::from_utf8_lossy(&body).contains("<title>dockdash</title>"));
}

#[tokio::test]
async fn test_unknown_path_falls_back_to_index() {
    let h = harness();

    let response = h
        .app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/containers/c1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_cors_headers_present() {
    let h = harness();

    let response = h
        .app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/containers")
                .header("origin", "http://localhost:5173")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(
        response
            .headers()
            .contains_key("access-control-allow-origin")
    );
}
