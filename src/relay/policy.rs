//! Join authorization

use std::collections::HashSet;

use crate::types::{ConnectionId, RoomKey, TenantId};

/// Decides whether a connection may join a room
pub trait JoinPolicy: Send + Sync {
    fn may_join(&self, connection: ConnectionId, room: &RoomKey) -> bool;
}

/// Any connection may join any tenant's room
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenJoin;

impl JoinPolicy for OpenJoin {
    fn may_join(&self, _connection: ConnectionId, _room: &RoomKey) -> bool {
        true
    }
}

/// Only rooms belonging to a fixed set of tenants may be joined
#[derive(Debug, Clone)]
pub struct TenantAllowList {
    tenants: HashSet<TenantId>,
}

impl TenantAllowList {
    pub fn new(tenants: impl IntoIterator<Item = TenantId>) -> Self {
        Self {
            tenants: tenants.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.tenants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tenants.is_empty()
    }
}

impl JoinPolicy for TenantAllowList {
    fn may_join(&self, _connection: ConnectionId, room: &RoomKey) -> bool {
        room.tenant()
            .map_or(false, |tenant| self.tenants.contains(&tenant))
    }
}
