//! Connection registry
//!
//! Owns every live connection's transport handle together with the set of
//! rooms it has joined, so a disconnect can purge exactly those rooms.

use std::collections::{BTreeSet, HashMap};

use super::Transport;
use crate::types::{ConnectionId, RoomKey};

struct ConnectionEntry {
    transport: Box<dyn Transport>,
    rooms: BTreeSet<RoomKey>,
}

/// Registry of connected clients, keyed by [`ConnectionId`]
pub struct ConnectionRegistry {
    next_id: u64,
    connections: HashMap<ConnectionId, ConnectionEntry>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            connections: HashMap::new(),
        }
    }

    /// Store a transport and return its freshly assigned id
    pub fn register(&mut self, transport: Box<dyn Transport>) -> ConnectionId {
        let id = ConnectionId(self.next_id);
        self.next_id += 1;
        self.connections.insert(
            id,
            ConnectionEntry {
                transport,
                rooms: BTreeSet::new(),
            },
        );
        id
    }

    /// Drop a connection and hand back the rooms it was a member of.
    /// Returns `None` for ids that are not registered.
    pub fn remove(&mut self, id: ConnectionId) -> Option<BTreeSet<RoomKey>> {
        self.connections.remove(&id).map(|entry| entry.rooms)
    }

    pub fn contains(&self, id: ConnectionId) -> bool {
        self.connections.contains_key(&id)
    }

    pub fn transport(&self, id: ConnectionId) -> Option<&dyn Transport> {
        self.connections.get(&id).map(|entry| entry.transport.as_ref())
    }

    /// Remember that `id` joined `room`. Returns false if `id` is unknown.
    pub fn record_join(&mut self, id: ConnectionId, room: &RoomKey) -> bool {
        match self.connections.get_mut(&id) {
            Some(entry) => {
                entry.rooms.insert(room.clone());
                true
            }
            None => false,
        }
    }

    pub fn record_leave(&mut self, id: ConnectionId, room: &RoomKey) {
        if let Some(entry) = self.connections.get_mut(&id) {
            entry.rooms.remove(room);
        }
    }

    /// Rooms the connection currently belongs to (empty for unknown ids)
    pub fn rooms_of(&self, id: ConnectionId) -> Vec<RoomKey> {
        self.connections
            .get(&id)
            .map(|entry| entry.rooms.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }
}

impl Default for ConnectionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
