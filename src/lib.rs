//! Practice Relay
//!
//! A tenant-scoped realtime event relay. Clients connect over WebSocket and
//! join the rooms of the practices they care about; business services emit
//! typed events (new calls, appointment changes, check-ins) to a practice's
//! room after committing a change.
//!
//! # Features
//!
//! - **Rooms**: one room per tenant, `practice-{id}`, joined and left on request
//! - **Fire-and-forget**: a failing client is dropped, never the emitter's problem
//! - **Typed events**: a closed set of events with validated payloads
//! - **Thread-Safe**: registry and rooms behind a single lock
//!
//! # Modules
//!
//! - `types`: Ids, room keys, events and errors
//! - `relay`: Connection registry, room index and broadcaster
//! - `notify`: Helpers for business services
//! - `api`: HTTP and WebSocket endpoints
//! - `config`: Environment configuration
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use practice_relay::{notify, Relay, TenantId};
//! use practice_relay::types::{CallLog, CallStatus, RecordId};
//!
//! let relay = Arc::new(Relay::new());
//! let practice = TenantId::parse("12").unwrap();
//! notify::call_started(&relay, &practice, CallLog {
//!     id: RecordId::Int(42),
//!     caller_number: "+15550100".to_string(),
//!     status: CallStatus::Ringing,
//!     started_at: chrono::Utc::now(),
//!     duration_seconds: None,
//!     summary: None,
//! });
//! ```

pub mod api;
pub mod config;
pub mod notify;
pub mod relay;
pub mod types;

// Re-export commonly used items at crate root
pub use config::RelayConfig;
pub use relay::{JoinPolicy, Relay, Transport};
pub use types::{ConnectionId, RelayError, RelayEvent, RelayResult, RoomKey, TenantId};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
