use std::sync::Arc;

use gamemood_mcp::GameMoodMcpHandler;
use gamemood_mcp::http::{AppState, DEFAULT_MAX_BODY_BYTES, router};
use metrics_exporter_prometheus::PrometheusBuilder;
use serde_json::json;

async fn spawn_app() -> String {
    let handler = GameMoodMcpHandler::new(None);
    // Recorder handle without installing it globally.
    let metrics = PrometheusBuilder::new().build_recorder().handle();
    let state = Arc::new(AppState {
        service: handler.service().clone(),
        metrics,
    });
    let app = router(state, handler, DEFAULT_MAX_BODY_BYTES);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app.into_make_service())
            .await
            .expect("serve");
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn health_reports_readiness() {
    let base = spawn_app().await;
    let resp = reqwest::get(format!("{base}/health")).await.expect("get");
    assert_eq!(resp.status().as_u16(), 200);
    let body: serde_json::Value = resp.json().await.expect("json");
    assert_eq!(body["ready"], true);
    assert_eq!(body["analyzer_configured"], false);
}

#[tokio::test]
async fn metrics_endpoint_is_prometheus_text() {
    let base = spawn_app().await;
    let resp = reqwest::get(format!("{base}/metrics")).await.expect("get");
    assert_eq!(resp.status().as_u16(), 200);
    let content_type = resp
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/plain"));
}

#[tokio::test]
async fn recommendations_route_ranks_catalog() {
    let base = spawn_app().await;
    let body = json!({
        "mood": {"energy_level": 8, "stress_level": 2, "focus_level": 6,
                 "social_desire": 9, "challenge_seeking": 8,
                 "created_at": "2026-02-10T18:00:00Z"},
        "catalog": [
            {"title": "Journey", "mood_tags": ["meditative", "solo"],
             "ideal_energy_range": {"min": 1, "max": 4}},
            {"title": "Overcooked 2", "mood_tags": ["social", "energizing", "competitive"],
             "ideal_energy_range": {"min": 6, "max": 10}}
        ]
    });
    let resp = reqwest::Client::new()
        .post(format!("{base}/recommendations"))
        .json(&body)
        .send()
        .await
        .expect("post");
    assert_eq!(resp.status().as_u16(), 200);
    let v: serde_json::Value = resp.json().await.expect("json");
    assert_eq!(v["games"][0]["title"], "Overcooked 2");
    assert_eq!(v["session_context"], "social_connection");
}

#[tokio::test]
async fn streak_route_rejects_bad_day() {
    let base = spawn_app().await;
    let resp = reqwest::Client::new()
        .post(format!("{base}/wellness/streak"))
        .json(&json!({"history": [], "today": "yesterday"}))
        .send()
        .await
        .expect("post");
    assert_eq!(resp.status().as_u16(), 400);
    let text = resp.text().await.expect("text");
    assert!(text.contains("YYYY-MM-DD"));
}

#[tokio::test]
async fn metrics_route_defaults_empty_history() {
    let base = spawn_app().await;
    let resp = reqwest::Client::new()
        .post(format!("{base}/wellness/metrics"))
        .json(&json!({}))
        .send()
        .await
        .expect("post");
    assert_eq!(resp.status().as_u16(), 200);
    let v: serde_json::Value = resp.json().await.expect("json");
    assert_eq!(v["metrics"]["overall_wellness"], 50);
}
