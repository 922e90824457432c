//! Router-level API tests
//!
//! Drives the axum router with tower's oneshot, covering the error taxonomy
//! (NotFound, MalformedInput) and the analyze → design → chat flow over the
//! demo analysis.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use eld_common::events::EventBus;
use eld_ds::services::room_detector::RoomDetector;
use eld_ds::{build_router, AppState};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

fn test_app() -> axum::Router {
    // No detector endpoint: every analysis uses the demo fallback
    let state = AppState::new(EventBus::new(16), RoomDetector::new(None, 1));
    build_router(state)
}

fn json_request(method: &str, uri: &str, session: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(session_id) = session {
        builder = builder.header("x-session-id", session_id);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_reports_ok() {
    let app = test_app();
    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "eld-ds");
    assert_eq!(body["active_sessions"], 0);
}

#[tokio::test]
async fn analyze_without_detector_uses_demo_rooms() {
    let app = test_app();
    let response = app
        .oneshot(json_request("POST", "/api/analyze", None, json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["demo_fallback"], true);
    assert_eq!(body["rooms"].as_array().unwrap().len(), 6);
    assert!(body["session_id"].as_str().unwrap().len() > 0);
    assert_eq!(body["summary"]["building_type"], "residential");
}

#[tokio::test]
async fn analyze_rejects_invalid_base64() {
    let app = test_app();
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/analyze",
            None,
            json!({ "image_base64": "not@@base64!!" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn design_requires_known_session() {
    let app = test_app();

    // No session header at all
    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/design", None, json!({ "room_id": "room_1" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Unknown session token
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/design",
            Some("no-such-session"),
            json!({ "room_id": "room_1" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn full_analyze_design_chat_flow() {
    let app = test_app();

    // Analyze bootstraps the session
    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/analyze", Some("flow-session"), json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Generate the kitchen design
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/design",
            Some("flow-session"),
            json!({ "room_id": "room_1" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    // 3 pendants + 1 cove + 20 cans
    assert_eq!(body["design"]["fixtures"].as_array().unwrap().len(), 24);
    assert_eq!(body["design"]["total_cost"], 2450);
    let cost_before = body["design"]["total_cost"].as_u64().unwrap();

    // Chat: add a pendant, design comes back updated
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/chat",
            Some("flow-session"),
            json!({ "room_id": "room_1", "message": "please add one more pendant" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["design"]["total_cost"], cost_before + 150);
    assert_eq!(body["design"]["fixtures"].as_array().unwrap().len(), 25);

    // Chat: informational question returns no design
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/chat",
            Some("flow-session"),
            json!({ "room_id": "room_1", "message": "why this layout?" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["reply"].as_str().unwrap().contains("For this kitchen"));
    assert!(body.get("design").is_none());

    // Stored design is observable and reflects the mutation
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/design/room_1")
                .header("x-session-id", "flow-session")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["design"]["fixtures"].as_array().unwrap().len(), 25);
}

#[tokio::test]
async fn chat_with_empty_message_is_rejected_without_mutation() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/analyze", Some("s-chat"), json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/design",
            Some("s-chat"),
            json!({ "room_id": "room_2" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let fixtures_before = body["design"]["fixtures"].as_array().unwrap().len();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/chat",
            Some("s-chat"),
            json!({ "room_id": "room_2", "message": "   " }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Design untouched
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/design/room_2")
                .header("x-session-id", "s-chat")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(
        body["design"]["fixtures"].as_array().unwrap().len(),
        fixtures_before
    );
}

#[tokio::test]
async fn chat_before_design_is_not_found() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/analyze", Some("s-early"), json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/chat",
            Some("s-early"),
            json!({ "room_id": "room_1", "message": "add a pendant" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn chat_unknown_intent_returns_help() {
    let app = test_app();

    app.clone()
        .oneshot(json_request("POST", "/api/analyze", Some("s-help"), json!({})))
        .await
        .unwrap();
    app.clone()
        .oneshot(json_request(
            "POST",
            "/api/design",
            Some("s-help"),
            json!({ "room_id": "room_4" }),
        ))
        .await
        .unwrap();

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/chat",
            Some("s-help"),
            json!({ "room_id": "room_4", "message": "paint the walls blue" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["reply"]
        .as_str()
        .unwrap()
        .contains("add or remove fixtures"));
    assert!(body.get("design").is_none());
}

#[tokio::test]
async fn batch_design_rejects_non_list_payload() {
    let app = test_app();

    app.clone()
        .oneshot(json_request("POST", "/api/analyze", Some("s-batch"), json!({})))
        .await
        .unwrap();

    // Object instead of list
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/design/batch",
            Some("s-batch"),
            json!({ "room_ids": ["room_1"] }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "BAD_REQUEST");

    // List with a non-string entry
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/design/batch",
            Some("s-batch"),
            json!(["room_1", 7]),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn batch_design_generates_all_rooms() {
    let app = test_app();

    app.clone()
        .oneshot(json_request("POST", "/api/analyze", Some("s-batch-ok"), json!({})))
        .await
        .unwrap();

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/design/batch",
            Some("s-batch-ok"),
            json!(["room_1", "room_3", "room_6"]),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let designs = body["designs"].as_array().unwrap();
    assert_eq!(designs.len(), 3);
    assert_eq!(designs[0]["room_id"], "room_1");
    assert_eq!(designs[1]["room_id"], "room_3");
    assert_eq!(designs[2]["room_id"], "room_6");
}

#[tokio::test]
async fn batch_design_with_unknown_room_stores_nothing() {
    let app = test_app();

    app.clone()
        .oneshot(json_request("POST", "/api/analyze", Some("s-batch-bad"), json!({})))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/design/batch",
            Some("s-batch-bad"),
            json!(["room_1", "room_99"]),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // The valid room in the failed batch was not generated either
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/design/room_1")
                .header("x-session-id", "s-batch-bad")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
