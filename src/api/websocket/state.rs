//! Shared application state

use std::sync::Arc;

use crate::config::RelayConfig;
use crate::relay::Relay;

/// Shared application state for HTTP and WebSocket handlers
pub struct AppState {
    /// The relay, also held by whatever business services emit events
    pub relay: Arc<Relay>,

    pub config: RelayConfig,
}

impl AppState {
    pub fn new(relay: Arc<Relay>, config: RelayConfig) -> Self {
        Self { relay, config }
    }
}
