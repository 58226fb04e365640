//! WebSocket message types exchanged with clients
//!
//! Relay events themselves are defined in [`crate::types::RelayEvent`];
//! this module covers the control traffic around them.

use serde::{Deserialize, Serialize};

use crate::relay::Frame;
use crate::types::{ConnectionId, RoomKey, TenantId};

/// Messages a client may send
#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ClientMessage {
    /// Join the room of a practice
    JoinPractice { room: TenantId },

    /// Leave the room of a practice
    LeavePractice { room: TenantId },

    /// Ping for heartbeat
    Ping,
}

/// Control messages sent by the server
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ServerMessage {
    /// Welcome message sent on connection
    Connected {
        connection_id: ConnectionId,
        current_sequence_id: u64,
    },

    Joined { room: RoomKey },

    Left { room: RoomKey },

    Pong,

    Error { code: String, message: String },
}

impl ServerMessage {
    pub fn error(code: &str, message: impl Into<String>) -> Self {
        ServerMessage::Error {
            code: code.to_string(),
            message: message.into(),
        }
    }

    /// Serialize into an outbound frame
    pub fn to_frame(&self) -> Option<Frame> {
        match serde_json::to_string(self) {
            Ok(json) => Some(json.into()),
            Err(e) => {
                tracing::error!(error = %e, "failed to serialize server message");
                None
            }
        }
    }
}
