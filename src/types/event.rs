//! Relay event types
//!
//! Every event a business service can push to a room is one variant of
//! [`RelayEvent`], with a concrete payload schema. On the wire an event is
//! `{"event": "<name>", "payload": {...}}`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{is_blank, RelayError, RelayResult, RoomKey};

/// Primary key of a domain row. Integer and string keys both occur.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Text(String),
}

impl From<i64> for RecordId {
    fn from(id: i64) -> Self {
        RecordId::Int(id)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        RecordId::Text(id.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Scheduled,
    Confirmed,
    CheckedIn,
    Completed,
    Cancelled,
    NoShow,
}

/// Appointment row after a create, reschedule or status change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentUpdate {
    pub id: RecordId,
    pub patient_name: String,
    pub scheduled_at: DateTime<Utc>,
    pub status: AppointmentStatus,
    #[serde(default, skip_serializing_if = "is_blank")]
    pub provider: Option<String>,
    #[serde(default, skip_serializing_if = "is_blank")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallStatus {
    Ringing,
    InProgress,
    Completed,
    Missed,
    Voicemail,
    Failed,
}

/// Call log row, used by both `new-call` and `call-update`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallLog {
    pub id: RecordId,
    pub caller_number: String,
    pub status: CallStatus,
    pub started_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<u32>,
    #[serde(default, skip_serializing_if = "is_blank")]
    pub summary: Option<String>,
}

/// Patient arrival at the front desk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientCheckIn {
    pub id: RecordId,
    pub patient_name: String,
    pub checked_in_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appointment_id: Option<RecordId>,
}

/// Events that can be emitted to a room
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "payload", rename_all = "kebab-case")]
pub enum RelayEvent {
    AppointmentUpdate(AppointmentUpdate),
    NewCall(CallLog),
    CallUpdate(CallLog),
    PatientCheckin(PatientCheckIn),
}

impl RelayEvent {
    /// Every event name the relay accepts
    pub const NAMES: [&'static str; 4] = [
        "appointment-update",
        "new-call",
        "call-update",
        "patient-checkin",
    ];

    /// Wire name of this event
    pub fn name(&self) -> &'static str {
        match self {
            RelayEvent::AppointmentUpdate(_) => "appointment-update",
            RelayEvent::NewCall(_) => "new-call",
            RelayEvent::CallUpdate(_) => "call-update",
            RelayEvent::PatientCheckin(_) => "patient-checkin",
        }
    }

    /// Build a typed event from an untyped name and payload, validating the
    /// payload against the variant's schema.
    pub fn from_parts(name: &str, payload: Value) -> RelayResult<Self> {
        let parsed = match name {
            "appointment-update" => {
                serde_json::from_value(payload).map(RelayEvent::AppointmentUpdate)
            }
            "new-call" => serde_json::from_value(payload).map(RelayEvent::NewCall),
            "call-update" => serde_json::from_value(payload).map(RelayEvent::CallUpdate),
            "patient-checkin" => serde_json::from_value(payload).map(RelayEvent::PatientCheckin),
            other => return Err(RelayError::UnknownEvent(other.to_string())),
        };

        parsed.map_err(|source| RelayError::InvalidPayload {
            event: name.to_string(),
            source,
        })
    }
}

/// Event wrapper with delivery metadata, serialized once per emit
#[derive(Clone, Debug, Serialize)]
pub struct EventEnvelope<'a> {
    /// Room the event was emitted to
    pub room: &'a RoomKey,

    #[serde(flatten)]
    pub event: &'a RelayEvent,

    /// Monotonically increasing sequence ID for gap detection
    pub sequence_id: u64,

    /// Unix timestamp when the event was emitted
    pub timestamp: i64,
}
