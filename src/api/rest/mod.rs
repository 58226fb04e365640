//! REST API module for HTTP endpoints
//!
//! - `GET /api/stats` - Connection and room counts
//! - `GET /api/practices/:tenant_id/members` - Connections in a practice room
//! - `POST /api/practices/:tenant_id/events` - Emit an event to a practice room

pub mod practices;
pub mod stats;

use serde::Serialize;

/// Standard API response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Current sequence ID for gap detection
    pub sequence_id: u64,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T, sequence_id: u64) -> Self {
        Self { data, sequence_id }
    }
}

/// API error response
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            code: "BAD_REQUEST".to_string(),
        }
    }

    pub fn unknown_event(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            code: "UNKNOWN_EVENT".to_string(),
        }
    }
}
