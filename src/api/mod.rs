//! API module for HTTP and WebSocket endpoints
//!
//! The WebSocket endpoint is where clients listen; the REST endpoints let
//! out-of-process services emit events and inspect rooms.

pub mod http;
pub mod rest;
pub mod websocket;
