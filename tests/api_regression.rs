//! API Regression Tests
//!
//! In-process tests that build the Axum app via `create_app()` and exercise
//! the dashboard and all /api/v1/* endpoints using
//! `tower::ServiceExt::oneshot()`. No binary spawn, no network port.

use smarttrack::api::{create_app, DashboardState};
use smarttrack::config::NodeConfig;
use smarttrack::types::NodeInfo;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::{DateTime, Local, TimeZone};
use tower::ServiceExt;

/// 2023-11-14 22:13:20 UTC: a multiple of ten seconds.
const EVENT_SECOND: i64 = 1_700_000_000;

fn at(secs: i64) -> DateTime<Local> {
    Local.timestamp_opt(secs, 0).unwrap()
}

fn create_test_state() -> DashboardState {
    DashboardState::new(NodeConfig::default())
        .with_seed(42)
        .with_clock(|| at(EVENT_SECOND + 3))
}

fn app() -> Router {
    create_app(create_test_state())
}

async fn get(app: Router, uri: &str) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
    let resp = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let headers = resp.headers().clone();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec();
    (status, headers, body)
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let (status, _, body) = get(app, uri).await;
    let json = serde_json::from_slice(&body)
        .unwrap_or_else(|e| panic!("{uri} did not return JSON: {e}"));
    (status, json)
}

/// All GET API endpoints should return 200 with no-store caching.
#[tokio::test]
async fn test_v1_get_endpoints_return_200() {
    let endpoints = [
        "/api/v1/refresh",
        "/api/v1/alert",
        "/api/v1/waveforms/ae",
        "/api/v1/waveforms/accel",
        "/api/v1/waveforms/gw",
        "/api/v1/node",
        "/api/v1/config",
    ];

    for endpoint in endpoints {
        let (status, headers, _) = get(app(), endpoint).await;
        assert_eq!(status, StatusCode::OK, "GET {endpoint}");
        assert_eq!(
            headers.get("cache-control").map(|v| v.to_str().unwrap()),
            Some("no-store"),
            "GET {endpoint} must not be cacheable"
        );
    }
}

#[tokio::test]
async fn test_health_is_plain_ok() {
    let (status, json) = get_json(app(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, serde_json::json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_refresh_envelope_and_defaults() {
    let (status, json) = get_json(app(), "/api/v1/refresh").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["meta"]["version"], "1");

    let data = &json["data"];
    assert_eq!(data["controls"]["auto_mode"], "idle");
    assert_eq!(data["controls"]["override"], "auto");
    assert_eq!(data["controls"]["triggered"], false);
    assert_eq!(data["decision"]["severity"], "No Crack");
    assert_eq!(data["decision"]["reason"], "quiet");
    assert_eq!(data["leds"]["green"], true);
    assert_eq!(data["waveforms"].as_array().unwrap().len(), 3);
    assert!(data["alert_notice"].is_null());
}

#[tokio::test]
async fn test_refresh_with_override() {
    let (_, json) = get_json(app(), "/api/v1/refresh?mode=periodic&override=critical").await;
    let data = &json["data"];
    assert_eq!(data["decision"]["severity"], "Critical");
    assert_eq!(data["decision"]["reason"], "override");
    assert_eq!(data["leds"]["red"], true);
    assert_eq!(
        data["alert_notice"],
        "Mock Alert sent: Dashboard + SMS/Email notification"
    );
}

#[tokio::test]
async fn test_trigger_fires_crack_event() {
    let resp = app()
        .oneshot(
            Request::post("/api/v1/trigger?mode=manual-only")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["data"]["controls"]["triggered"], true);
    assert_eq!(json["data"]["decision"]["reason"], "triggered");
    assert_ne!(json["data"]["decision"]["severity"], "No Crack");
}

#[tokio::test]
async fn test_alert_is_bare_payload() {
    let (status, json) = get_json(app(), "/api/v1/alert").await;
    assert_eq!(status, StatusCode::OK);

    let obj = json.as_object().unwrap();
    let mut keys: Vec<_> = obj.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        ["confidence", "gps", "node_id", "severity", "timestamp", "waveform_samples"]
    );
    assert_eq!(json["node_id"], "ANCHOR-001");
    assert_eq!(json["waveform_samples"], 800);
    assert_eq!(
        json["timestamp"],
        at(EVENT_SECOND + 3).format("%Y-%m-%d %H:%M:%S").to_string()
    );
}

#[tokio::test]
async fn test_waveform_endpoint_shape() {
    let (_, json) = get_json(app(), "/api/v1/waveforms/gw?override=major").await;
    let data = &json["data"];
    assert_eq!(data["decision"]["severity"], "Major");
    assert_eq!(data["panel"]["kind"], "GW");
    assert_eq!(data["panel"]["title"], "Guided-Wave UT Echo — Major");
    assert_eq!(data["panel"]["times"].as_array().unwrap().len(), 800);
    assert_eq!(data["panel"]["amplitudes"].as_array().unwrap().len(), 800);
    assert!(data["panel"]["summary"]["rms"].as_f64().unwrap() > 0.0);
}

#[tokio::test]
async fn test_unknown_sensor_is_404() {
    let (status, json) = get_json(app(), "/api/v1/waveforms/temp").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"]["code"], "NOT_FOUND");
    assert_eq!(json["error"]["field"], "kind");
}

#[tokio::test]
async fn test_bad_controls_are_400() {
    for (uri, field) in [
        ("/api/v1/refresh?mode=sometimes", "mode"),
        ("/api/v1/refresh?override=catastrophic", "override"),
        ("/api/v1/alert?mode=always", "mode"),
        ("/api/v1/refresh?trigger=maybe", "trigger"),
        ("/api/v1/waveforms/ae?trigger=2", "trigger"),
    ] {
        let (status, json) = get_json(app(), uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(json["error"]["code"], "BAD_REQUEST", "{uri}");
        assert_eq!(json["error"]["field"], field, "{uri}");
        assert_eq!(json["meta"]["version"], "1", "{uri}");
    }

    let resp = app()
        .oneshot(
            Request::post("/api/v1/trigger?trigger=maybe")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_trigger_query_accepts_common_spellings() {
    for value in ["true", "1", "on", "yes"] {
        let uri = format!("/api/v1/refresh?mode=manual-only&trigger={value}");
        let (status, json) = get_json(app(), &uri).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(json["data"]["controls"]["triggered"], true, "{uri}");
        assert_eq!(json["data"]["decision"]["reason"], "triggered", "{uri}");
    }

    let (_, json) = get_json(app(), "/api/v1/refresh?mode=manual-only&trigger=0").await;
    assert_eq!(json["data"]["decision"]["reason"], "awaiting_trigger");
}

#[tokio::test]
async fn test_node_endpoint_lists_sensors() {
    let (_, json) = get_json(app(), "/api/v1/node").await;
    let data = &json["data"];
    assert_eq!(data["node"]["id"], "ANCHOR-001");
    assert_eq!(data["node"]["edge_cpu"], "Virtual ESP32 / RPi Zero");
    let codes: Vec<_> = data["sensors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["code"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(codes, ["AE", "Accel", "GW"]);
    assert_eq!(data["sensor_notes"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_config_endpoint_reflects_state() {
    let config = NodeConfig {
        node: NodeInfo {
            id: "ANCHOR-314".to_string(),
            ..NodeInfo::default()
        },
        ..NodeConfig::default()
    };
    let app = create_app(DashboardState::new(config).with_seed(1));

    let (_, json) = get_json(app, "/api/v1/config").await;
    assert_eq!(json["data"]["node"]["id"], "ANCHOR-314");
    assert_eq!(json["data"]["simulation"]["periodic_window_secs"], 10);
    assert_eq!(json["data"]["server"]["addr"], "0.0.0.0:8080");
}

#[tokio::test]
async fn test_dashboard_page_renders() {
    let (status, headers, body) = get(app(), "/?mode=periodic").await;
    assert_eq!(status, StatusCode::OK);
    assert!(headers
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("text/html"));

    let page = String::from_utf8(body).unwrap();
    assert!(page.contains("SmartTrack"));
    assert!(page.contains("<option value=\"periodic\" selected>"));
    assert!(page.contains("http-equiv=\"refresh\""));
    assert_eq!(page.matches("<svg").count(), 3);
}

#[tokio::test]
async fn test_dashboard_rejects_bad_mode() {
    let (status, _, _) = get(app(), "/?mode=sometimes").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let (status, _, _) = get(app(), "/api/v1/does-not-exist").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
