//! Data types for the practice relay
//!
//! Connection and room identifiers, the closed set of relay events, and
//! the error types shared by every layer.

mod connection;
mod error;
mod event;
mod room;

pub use connection::{ConnectionId, ConnectionState};
pub use error::{RelayError, TransportError};
pub use event::{
    AppointmentStatus, AppointmentUpdate, CallLog, CallStatus, EventEnvelope, PatientCheckIn,
    RecordId, RelayEvent,
};
pub use room::{RoomKey, TenantId};

/// Result type for relay operations
pub type RelayResult<T> = Result<T, RelayError>;

/// Check if an optional string is empty or absent (for skip_serializing_if)
pub fn is_blank(val: &Option<String>) -> bool {
    val.as_deref().map_or(true, str::is_empty)
}
