//! Helpers for business services
//!
//! Call these after the domain change has been committed. They never fail:
//! the return value is only the number of clients the event was handed to.

use crate::relay::Relay;
use crate::types::{AppointmentUpdate, CallLog, PatientCheckIn, RelayEvent, RoomKey, TenantId};

/// Broadcast appointment-update to the practice's room
pub fn appointment_updated(relay: &Relay, practice: &TenantId, appointment: AppointmentUpdate) -> usize {
    emit(relay, practice, RelayEvent::AppointmentUpdate(appointment))
}

/// Broadcast new-call to the practice's room
pub fn call_started(relay: &Relay, practice: &TenantId, call: CallLog) -> usize {
    emit(relay, practice, RelayEvent::NewCall(call))
}

/// Broadcast call-update to the practice's room
pub fn call_updated(relay: &Relay, practice: &TenantId, call: CallLog) -> usize {
    emit(relay, practice, RelayEvent::CallUpdate(call))
}

/// Broadcast patient-checkin to the practice's room
pub fn patient_checked_in(relay: &Relay, practice: &TenantId, check_in: PatientCheckIn) -> usize {
    emit(relay, practice, RelayEvent::PatientCheckin(check_in))
}

fn emit(relay: &Relay, practice: &TenantId, event: RelayEvent) -> usize {
    relay.emit_to_room(&RoomKey::practice(practice), &event)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relay::Frame;
    use crate::types::{AppointmentStatus, RecordId};
    use tokio::sync::mpsc;

    #[test]
    fn test_appointment_updated_targets_practice_room() {
        let relay = Relay::new();
        let practice = TenantId::parse("3").unwrap();
        let (tx, mut rx) = mpsc::channel::<Frame>(4);
        let id = relay.register(Box::new(tx));
        relay.join(id, &RoomKey::practice(&practice)).unwrap();

        let delivered = appointment_updated(
            &relay,
            &practice,
            AppointmentUpdate {
                id: RecordId::Int(11),
                patient_name: "Sam Lee".to_string(),
                scheduled_at: "2026-02-01T15:00:00Z".parse().unwrap(),
                status: AppointmentStatus::Confirmed,
                provider: Some("Dr. Ortiz".to_string()),
                notes: None,
            },
        );
        assert_eq!(delivered, 1);

        let frame = rx.try_recv().unwrap();
        let msg: serde_json::Value = serde_json::from_str(&frame).unwrap();
        assert_eq!(msg["event"], "appointment-update");
        assert_eq!(msg["room"], "practice-3");
        assert_eq!(msg["payload"]["status"], "confirmed");
        assert_eq!(msg["payload"]["patientName"], "Sam Lee");
    }

    #[test]
    fn test_helpers_without_listeners() {
        let relay = Relay::new();
        let practice = TenantId::parse("3").unwrap();
        let check_in = PatientCheckIn {
            id: "chk_1".into(),
            patient_name: "Sam Lee".to_string(),
            checked_in_at: chrono::Utc::now(),
            appointment_id: None,
        };
        assert_eq!(patient_checked_in(&relay, &practice, check_in), 0);
    }
}
