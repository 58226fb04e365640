//! HTTP server setup with Axum

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use super::rest::{practices, stats};
use super::websocket::{handler::ws_handler, state::AppState};

/// Create the Axum router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    // Browser dashboards connect from other origins
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // WebSocket endpoint
        .route("/ws", get(ws_handler))
        // Health check
        .route("/health", get(health_check))
        // REST API endpoints
        .route("/api/stats", get(stats::get_stats))
        .route("/api/practices/:tenant_id/members", get(practices::list_members))
        .route("/api/practices/:tenant_id/events", post(practices::emit_event))
        .layer(cors)
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RelayConfig;
    use crate::relay::{Frame, Relay};
    use crate::types::{RoomKey, TenantId};
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use tokio::sync::mpsc;
    use tower::util::ServiceExt;

    fn app() -> (Router, Arc<Relay>) {
        let relay = Arc::new(Relay::new());
        let state = Arc::new(AppState::new(Arc::clone(&relay), RelayConfig::default()));
        (create_router(state), relay)
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn emit_request(tenant: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(format!("/api/practices/{}/events", tenant))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health_check() {
        let (app, _) = app();

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
    }

    #[tokio::test]
    async fn test_emit_event_delivers_to_room() {
        let (app, relay) = app();
        let (tx, mut rx) = mpsc::channel::<Frame>(4);
        let id = relay.register(Box::new(tx));
        relay
            .join(id, &RoomKey::practice(&TenantId::parse("1").unwrap()))
            .unwrap();

        let response = app
            .oneshot(emit_request(
                "1",
                serde_json::json!({
                    "event": "new-call",
                    "payload": {
                        "id": 42,
                        "callerNumber": "+15550100",
                        "status": "ringing",
                        "startedAt": "2026-01-05T09:30:00Z"
                    }
                }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::ACCEPTED);
        let body = body_json(response).await;
        assert_eq!(body["data"]["delivered"], 1);
        assert_eq!(body["data"]["room"], "practice-1");

        let frame = rx.try_recv().unwrap();
        assert!(frame.contains("\"new-call\""));
    }

    #[tokio::test]
    async fn test_emit_event_rejects_unknown_event() {
        let (app, _) = app();

        let response = app
            .oneshot(emit_request(
                "1",
                serde_json::json!({"event": "salon-booked", "payload": {}}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["code"], "UNKNOWN_EVENT");
    }

    #[tokio::test]
    async fn test_emit_event_rejects_bad_payload() {
        let (app, _) = app();

        let response = app
            .oneshot(emit_request(
                "1",
                serde_json::json!({"event": "patient-checkin", "payload": {"id": 1}}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_members_and_stats() {
        let (app, relay) = app();
        let (tx, _rx) = mpsc::channel::<Frame>(4);
        let id = relay.register(Box::new(tx));
        relay
            .join(id, &RoomKey::practice(&TenantId::parse("7").unwrap()))
            .unwrap();

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/practices/7/members")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["data"]["members"], serde_json::json!([id.0]));

        let response = app
            .oneshot(Request::builder().uri("/api/stats").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let body = body_json(response).await;
        assert_eq!(body["data"]["connections"], 1);
        assert_eq!(body["data"]["rooms"], 1);
    }

    #[tokio::test]
    async fn test_members_rejects_invalid_tenant() {
        let (app, _) = app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/practices/a%20b/members")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
