//! WebSocket connection handler
//!
//! Each socket is split into a writer task, which drains the connection's
//! outbound queue and sends heartbeats, and a reader task, which applies
//! join/leave requests. Whichever finishes first ends the connection and
//! the relay entry is unregistered.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

use super::events::{ClientMessage, ServerMessage};
use super::state::AppState;
use crate::relay::{Frame, Relay};
use crate::types::{ConnectionId, RoomKey};

/// WebSocket upgrade handler
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Handle an individual WebSocket connection
async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (tx, rx) = mpsc::channel::<Frame>(state.config.send_queue.max(1));
    let relay = Arc::clone(&state.relay);
    let id = relay.register(Box::new(tx));
    tracing::info!(connection_id = %id, "WebSocket client connected");

    let welcome = ServerMessage::Connected {
        connection_id: id,
        current_sequence_id: relay.current_sequence_id(),
    };
    if let Some(frame) = welcome.to_frame() {
        relay.send_to(id, frame);
    }

    let (sink, stream) = socket.split();
    let mut writer = tokio::spawn(write_loop(sink, rx, state.config.heartbeat));
    let mut reader = tokio::spawn(read_loop(stream, id, Arc::clone(&relay)));

    tokio::select! {
        _ = &mut writer => reader.abort(),
        _ = &mut reader => writer.abort(),
    }

    relay.unregister(id);
    tracing::info!(connection_id = %id, "WebSocket client disconnected");
}

/// Forward queued frames to the socket until the relay drops the sender
async fn write_loop(
    mut sink: SplitSink<WebSocket, Message>,
    mut rx: mpsc::Receiver<Frame>,
    heartbeat: Option<Duration>,
) {
    let mut ticker = heartbeat.map(|period| {
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        ticker
    });

    loop {
        tokio::select! {
            frame = rx.recv() => match frame {
                Some(frame) => {
                    if sink.send(Message::Text(frame.to_string())).await.is_err() {
                        break; // Client disconnected
                    }
                }
                None => {
                    // Unregistered by the relay
                    let _ = sink.send(Message::Close(None)).await;
                    break;
                }
            },
            _ = tick(&mut ticker) => {
                if sink.send(Message::Ping(Vec::new())).await.is_err() {
                    break;
                }
            }
        }
    }
}

async fn tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}

/// Apply client requests until the socket closes or errors
async fn read_loop(mut stream: SplitStream<WebSocket>, id: ConnectionId, relay: Arc<Relay>) {
    while let Some(result) = stream.next().await {
        match result {
            Ok(Message::Text(text)) => {
                let reply = dispatch_client_message(&relay, id, &text);
                if let Some(frame) = reply.to_frame() {
                    if !relay.send_to(id, frame) {
                        break;
                    }
                }
            }
            Ok(Message::Close(_)) => break,
            Ok(_) => {} // Binary ignored; pings are answered by axum
            Err(e) => {
                tracing::debug!(connection_id = %id, error = %e, "WebSocket read error");
                break;
            }
        }
    }
}

/// Handle one text message from a client and build the reply
pub fn dispatch_client_message(relay: &Relay, id: ConnectionId, text: &str) -> ServerMessage {
    let msg = match serde_json::from_str::<ClientMessage>(text) {
        Ok(msg) => msg,
        Err(e) => {
            tracing::debug!(connection_id = %id, error = %e, "malformed client message");
            return ServerMessage::error("bad_request", e.to_string());
        }
    };

    match msg {
        ClientMessage::JoinPractice { room } => {
            let room = RoomKey::practice(&room);
            match relay.join(id, &room) {
                Ok(_) => ServerMessage::Joined { room },
                Err(e) => ServerMessage::error("join_denied", e.to_string()),
            }
        }
        ClientMessage::LeavePractice { room } => {
            let room = RoomKey::practice(&room);
            relay.leave(id, &room);
            ServerMessage::Left { room }
        }
        ClientMessage::Ping => ServerMessage::Pong,
    }
}
