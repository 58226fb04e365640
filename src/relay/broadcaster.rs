//! Room event broadcaster
//!
//! [`Relay`] ties the connection registry and the room index together
//! behind one lock and exposes [`Relay::emit_to_room`], the entry point for
//! business services that want to notify a tenant's clients.
//!
//! Delivery is fire-and-forget. A member whose transport rejects a frame is
//! unregistered on the spot and the broadcast carries on with the others;
//! nothing is reported back to the emitter beyond a delivered count.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

use super::{ConnectionRegistry, Frame, JoinPolicy, OpenJoin, RoomIndex, Transport};
use crate::types::{
    ConnectionId, ConnectionState, EventEnvelope, RelayError, RelayEvent, RelayResult, RoomKey,
};

struct RelayInner {
    registry: ConnectionRegistry,
    rooms: RoomIndex,
}

impl RelayInner {
    fn unregister(&mut self, id: ConnectionId) -> bool {
        match self.registry.remove(id) {
            Some(joined) => {
                for room in &joined {
                    self.rooms.leave(id, room);
                }
                true
            }
            None => false,
        }
    }
}

/// Realtime relay: connection registry, room index and broadcaster
pub struct Relay {
    inner: Mutex<RelayInner>,
    sequence_counter: AtomicU64,
    policy: Box<dyn JoinPolicy>,
}

impl Relay {
    /// Create a relay where any connection may join any room
    pub fn new() -> Self {
        Self::with_policy(Box::new(OpenJoin))
    }

    /// Create a relay with a custom join policy
    pub fn with_policy(policy: Box<dyn JoinPolicy>) -> Self {
        Self {
            inner: Mutex::new(RelayInner {
                registry: ConnectionRegistry::new(),
                rooms: RoomIndex::new(),
            }),
            sequence_counter: AtomicU64::new(0),
            policy,
        }
    }

    /// Register a new connection
    pub fn register(&self, transport: Box<dyn Transport>) -> ConnectionId {
        let id = self.inner.lock().registry.register(transport);
        tracing::debug!(connection_id = %id, "connection registered");
        id
    }

    /// Tear down a connection: leave every room and drop its transport.
    ///
    /// Safe to call any number of times; returns true only for the call
    /// that actually performed the transition to `Disconnected`.
    pub fn unregister(&self, id: ConnectionId) -> bool {
        let removed = self.inner.lock().unregister(id);
        if removed {
            tracing::debug!(connection_id = %id, "connection unregistered");
        }
        removed
    }

    pub fn state_of(&self, id: ConnectionId) -> ConnectionState {
        if self.inner.lock().registry.contains(id) {
            ConnectionState::Connected
        } else {
            ConnectionState::Disconnected
        }
    }

    /// Add a connection to a room.
    ///
    /// Returns `Ok(true)` when the connection was newly added, `Ok(false)`
    /// when it was already a member or is no longer connected.
    pub fn join(&self, id: ConnectionId, room: &RoomKey) -> RelayResult<bool> {
        if !self.policy.may_join(id, room) {
            tracing::warn!(connection_id = %id, room = %room, "join denied by policy");
            return Err(RelayError::JoinDenied(room.to_string()));
        }

        let mut inner = self.inner.lock();
        if !inner.registry.record_join(id, room) {
            return Ok(false);
        }
        let added = inner.rooms.join(id, room);
        if added {
            tracing::debug!(connection_id = %id, room = %room, "joined room");
        }
        Ok(added)
    }

    /// Remove a connection from a room. Returns true if it was a member.
    pub fn leave(&self, id: ConnectionId, room: &RoomKey) -> bool {
        let mut inner = self.inner.lock();
        inner.registry.record_leave(id, room);
        let removed = inner.rooms.leave(id, room);
        if removed {
            tracing::debug!(connection_id = %id, room = %room, "left room");
        }
        removed
    }

    /// Current members of a room; empty for unknown rooms
    pub fn members_of(&self, room: &RoomKey) -> BTreeSet<ConnectionId> {
        self.inner.lock().rooms.members_of(room)
    }

    /// Rooms a connection currently belongs to
    pub fn rooms_of(&self, id: ConnectionId) -> Vec<RoomKey> {
        self.inner.lock().registry.rooms_of(id)
    }

    /// Broadcast an event to every current member of `room`.
    ///
    /// Returns the number of members the frame was handed to. Members whose
    /// transport fails are unregistered before this returns.
    pub fn emit_to_room(&self, room: &RoomKey, event: &RelayEvent) -> usize {
        let mut inner = self.inner.lock();
        let RelayInner { registry, rooms } = &mut *inner;

        let Some(members) = rooms.members(room) else {
            tracing::trace!(room = %room, event = event.name(), "emit to empty room");
            return 0;
        };

        let envelope = EventEnvelope {
            room,
            event,
            sequence_id: self.sequence_counter.fetch_add(1, Ordering::SeqCst),
            timestamp: chrono::Utc::now().timestamp(),
        };
        let frame: Frame = match serde_json::to_string(&envelope) {
            Ok(json) => json.into(),
            Err(e) => {
                tracing::error!(room = %room, event = event.name(), error = %e, "failed to serialize event");
                return 0;
            }
        };

        let mut delivered = 0;
        let mut failed = Vec::new();
        for &id in members {
            let result = match registry.transport(id) {
                Some(transport) => transport.deliver(frame.clone()),
                None => Err(crate::types::TransportError::Closed),
            };
            match result {
                Ok(()) => delivered += 1,
                Err(e) => {
                    tracing::warn!(connection_id = %id, room = %room, error = %e, "delivery failed, dropping connection");
                    failed.push(id);
                }
            }
        }

        for id in failed {
            inner.unregister(id);
        }

        tracing::debug!(room = %room, event = event.name(), delivered, "event emitted");
        delivered
    }

    /// Send a frame to a single connection, e.g. a reply to its own request.
    /// A failing transport is unregistered just like during a broadcast.
    pub fn send_to(&self, id: ConnectionId, frame: Frame) -> bool {
        let mut inner = self.inner.lock();
        let result = match inner.registry.transport(id) {
            Some(transport) => transport.deliver(frame),
            None => return false,
        };
        match result {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(connection_id = %id, error = %e, "direct send failed, dropping connection");
                inner.unregister(id);
                false
            }
        }
    }

    /// Get the current sequence ID
    pub fn current_sequence_id(&self) -> u64 {
        self.sequence_counter.load(Ordering::SeqCst)
    }

    pub fn connection_count(&self) -> usize {
        self.inner.lock().registry.len()
    }

    pub fn room_count(&self) -> usize {
        self.inner.lock().rooms.room_count()
    }
}

impl Default for Relay {
    fn default() -> Self {
        Self::new()
    }
}
