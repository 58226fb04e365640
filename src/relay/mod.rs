//! Tenant-scoped realtime relay
//!
//! Three layers, leaf first:
//! - [`ConnectionRegistry`]: live connections and their transport handles
//! - [`RoomIndex`]: room key to member set
//! - [`Relay`]: both of the above behind a single lock, plus
//!   [`Relay::emit_to_room`] for business services
//!
//! The relay knows nothing about WebSockets. A connection is anything that
//! implements [`Transport`]; the WebSocket handler registers the sending
//! half of a bounded channel and drains the other half into the socket.

mod broadcaster;
mod policy;
mod registry;
mod rooms;

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::types::TransportError;

pub use broadcaster::Relay;
pub use policy::{JoinPolicy, OpenJoin, TenantAllowList};
pub use registry::ConnectionRegistry;
pub use rooms::RoomIndex;

/// A serialized outbound message, shared by every recipient of a broadcast
pub type Frame = Arc<str>;

/// Non-blocking delivery of frames to one client.
///
/// `deliver` runs while the relay's lock is held: it must return without
/// blocking and must not call back into the [`Relay`].
pub trait Transport: Send + Sync {
    fn deliver(&self, frame: Frame) -> Result<(), TransportError>;
}

impl Transport for mpsc::Sender<Frame> {
    fn deliver(&self, frame: Frame) -> Result<(), TransportError> {
        self.try_send(frame).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => TransportError::Full,
            mpsc::error::TrySendError::Closed(_) => TransportError::Closed,
        })
    }
}
