//! WebSocket module for tenant-scoped realtime updates
//!
//! Provides the `/ws` endpoint. Clients send `join-practice` /
//! `leave-practice` requests and receive every event emitted to the rooms
//! they are in.
//!
//! ## Features
//! - Per-connection bounded send queue
//! - Heartbeat pings
//! - Sequence ID tracking for gap detection

pub mod events;
pub mod handler;
pub mod state;

pub use handler::ws_handler;
pub use state::AppState;
