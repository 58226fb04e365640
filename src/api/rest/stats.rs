//! Relay statistics endpoint

use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, Json};
use serde::Serialize;

use super::ApiResponse;
use crate::api::websocket::state::AppState;

/// Response for GET /api/stats
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub connections: usize,
    pub rooms: usize,
}

/// GET /api/stats - Live connection and room counts
pub async fn get_stats(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let stats = StatsResponse {
        connections: state.relay.connection_count(),
        rooms: state.relay.room_count(),
    };

    Json(ApiResponse::new(stats, state.relay.current_sequence_id()))
}
