//! Practice room endpoints

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{ApiError, ApiResponse};
use crate::api::websocket::state::AppState;
use crate::types::{ConnectionId, RelayError, RelayEvent, RoomKey, TenantId};

/// Response for GET /api/practices/:tenant_id/members
#[derive(Debug, Serialize)]
pub struct MembersResponse {
    pub room: RoomKey,
    pub members: Vec<ConnectionId>,
}

/// Body of POST /api/practices/:tenant_id/events
#[derive(Debug, Deserialize)]
pub struct EmitRequest {
    pub event: String,
    #[serde(default)]
    pub payload: Value,
}

/// Response for POST /api/practices/:tenant_id/events
#[derive(Debug, Serialize)]
pub struct EmitResponse {
    pub room: RoomKey,
    pub event: &'static str,
    pub delivered: usize,
}

/// GET /api/practices/:tenant_id/members - Connections currently in the room
pub async fn list_members(
    State(state): State<Arc<AppState>>,
    Path(tenant_id): Path<String>,
) -> impl IntoResponse {
    let tenant = match TenantId::parse(&tenant_id) {
        Ok(tenant) => tenant,
        Err(e) => {
            return (StatusCode::BAD_REQUEST, Json(ApiError::bad_request(e.to_string())))
                .into_response()
        }
    };

    let room = RoomKey::practice(&tenant);
    let members = state.relay.members_of(&room).into_iter().collect();

    Json(ApiResponse::new(
        MembersResponse { room, members },
        state.relay.current_sequence_id(),
    ))
    .into_response()
}

/// POST /api/practices/:tenant_id/events - Emit an event to the room
///
/// The event is validated before anything is sent. Delivery itself is
/// fire-and-forget, so success only means the event was accepted.
pub async fn emit_event(
    State(state): State<Arc<AppState>>,
    Path(tenant_id): Path<String>,
    Json(request): Json<EmitRequest>,
) -> impl IntoResponse {
    let tenant = match TenantId::parse(&tenant_id) {
        Ok(tenant) => tenant,
        Err(e) => {
            return (StatusCode::BAD_REQUEST, Json(ApiError::bad_request(e.to_string())))
                .into_response()
        }
    };

    let event = match RelayEvent::from_parts(&request.event, request.payload) {
        Ok(event) => event,
        Err(e @ RelayError::UnknownEvent(_)) => {
            return (StatusCode::BAD_REQUEST, Json(ApiError::unknown_event(e.to_string())))
                .into_response()
        }
        Err(e) => {
            return (StatusCode::BAD_REQUEST, Json(ApiError::bad_request(e.to_string())))
                .into_response()
        }
    };

    let room = RoomKey::practice(&tenant);
    let delivered = state.relay.emit_to_room(&room, &event);
    tracing::info!(room = %room, event = event.name(), delivered, "event accepted over HTTP");

    (
        StatusCode::ACCEPTED,
        Json(ApiResponse::new(
            EmitResponse {
                room,
                event: event.name(),
                delivered,
            },
            state.relay.current_sequence_id(),
        )),
    )
        .into_response()
}
