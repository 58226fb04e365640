//! Room membership index

use std::collections::{BTreeSet, HashMap};

use crate::types::{ConnectionId, RoomKey};

/// Maps each room to the set of connections currently in it.
///
/// Rooms are created on first join and dropped as soon as their last member
/// leaves, so an absent room and an empty room look the same to callers.
#[derive(Debug, Default)]
pub struct RoomIndex {
    rooms: HashMap<RoomKey, BTreeSet<ConnectionId>>,
}

impl RoomIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a member. Returns true if it was not already present.
    pub fn join(&mut self, id: ConnectionId, room: &RoomKey) -> bool {
        self.rooms.entry(room.clone()).or_default().insert(id)
    }

    /// Remove a member. Returns true if it was present.
    pub fn leave(&mut self, id: ConnectionId, room: &RoomKey) -> bool {
        let Some(members) = self.rooms.get_mut(room) else {
            return false;
        };
        let removed = members.remove(&id);
        if members.is_empty() {
            self.rooms.remove(room);
        }
        removed
    }

    /// Borrow the member set of a room, if it has any members
    pub fn members(&self, room: &RoomKey) -> Option<&BTreeSet<ConnectionId>> {
        self.rooms.get(room)
    }

    /// Snapshot of a room's members; empty for unknown rooms
    pub fn members_of(&self, room: &RoomKey) -> BTreeSet<ConnectionId> {
        self.rooms.get(room).cloned().unwrap_or_default()
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }
}
