//! Error types

/// Errors surfaced by configuration, validation and the HTTP layer.
///
/// Delivery failures never appear here: they are contained inside the
/// broadcaster and handled by unregistering the failing connection.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("unknown event: {0}")]
    UnknownEvent(String),

    #[error("invalid payload for {event}: {source}")]
    InvalidPayload {
        event: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid tenant id: {0:?}")]
    InvalidTenant(String),

    #[error("join denied for room {0}")]
    JoinDenied(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure to hand a frame to a single connection's transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("transport closed")]
    Closed,

    #[error("send queue full")]
    Full,
}
