//! Snapshot subscription over Socket.IO.
//!
//! The graphics server pushes `updateFrontend` events through Socket.IO
//! (Engine.IO protocol 4) on a websocket. Only the text framing is spoken:
//! open, ping/pong, namespace connect and events. The subscription never
//! gives up; after the socket closes or fails it waits a fixed delay and
//! reconnects.

use futures::{SinkExt, StreamExt};
use serde_json::Value;
use std::time::Duration as StdDuration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use url::Url;

use crate::config::Config;
use crate::constants::server::{FRONTEND_UPDATE_EVENT, RECONNECT_DELAY_SECS};
use crate::error::{Error, Result};

/// Change in connectivity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionEvent {
    /// Namespace connected.
    Connected,
    /// Socket closed.
    Disconnected,
    /// Connect or protocol failure.
    Error(String),
}

/// Everything the subscription forwards to the sync engine.
#[derive(Debug, Clone, PartialEq)]
pub enum TransportEvent {
    /// Connectivity changed.
    Connection(ConnectionEvent),
    /// Raw `updateFrontend` payload.
    Update(Value),
}

/// A decoded text frame.
#[derive(Debug, Clone, PartialEq)]
pub enum Packet {
    /// Engine.IO handshake (`0{...}`).
    Open,
    /// Engine.IO close (`1`).
    Close,
    /// Heartbeat from the server (`2`).
    Ping,
    /// Heartbeat answer (`3`).
    Pong,
    /// Namespace connected (`40`).
    Connect,
    /// Namespace disconnected (`41`).
    Disconnect,
    /// Event with its first argument (`42["name", payload]`).
    Event {
        /// Event name.
        name: String,
        /// First argument, `null` when absent.
        payload: Value,
    },
    /// Namespace connect refused (`44{...}`).
    ConnectError(String),
    /// Any frame this client has no use for.
    Ignored,
}

/// Frame sent after the handshake to join the default namespace.
pub const CONNECT_FRAME: &str = "40";
/// Heartbeat answer frame.
pub const PONG_FRAME: &str = "3";

/// Decode one Engine.IO text frame.
pub fn decode_frame(text: &str) -> Result<Packet> {
    let mut chars = text.chars();
    let engine_type = chars
        .next()
        .ok_or_else(|| Error::parse("empty frame", "socket frame"))?;

    match engine_type {
        '0' => Ok(Packet::Open),
        '1' => Ok(Packet::Close),
        '2' => Ok(Packet::Ping),
        '3' => Ok(Packet::Pong),
        '4' => decode_socket_packet(chars.as_str()),
        '5' | '6' => Ok(Packet::Ignored),
        other => Err(Error::parse(format!("unknown packet type '{other}'"), "socket frame")),
    }
}

fn decode_socket_packet(text: &str) -> Result<Packet> {
    let mut chars = text.chars();
    let socket_type = chars
        .next()
        .ok_or_else(|| Error::parse("empty message packet", "socket frame"))?;
    let rest = skip_namespace(chars.as_str());

    match socket_type {
        '0' => Ok(Packet::Connect),
        '1' => Ok(Packet::Disconnect),
        '2' => {
            let args = rest.trim_start_matches(|c: char| c.is_ascii_digit());
            let mut values: Vec<Value> = serde_json::from_str(args)
                .map_err(|e| Error::parse(e.to_string(), "socket event"))?;
            if values.is_empty() {
                return Err(Error::parse("event without a name", "socket event"));
            }
            let payload = if values.len() > 1 { values.swap_remove(1) } else { Value::Null };
            match values.swap_remove(0) {
                Value::String(name) => Ok(Packet::Event { name, payload }),
                other => Err(Error::parse(format!("event name is {other}"), "socket event")),
            }
        }
        '4' => {
            let message = serde_json::from_str::<Value>(rest)
                .ok()
                .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
                .unwrap_or_else(|| rest.to_string());
            Ok(Packet::ConnectError(message))
        }
        _ => Ok(Packet::Ignored),
    }
}

/// Drop a `/namespace,` prefix.
fn skip_namespace(text: &str) -> &str {
    if text.starts_with('/') {
        text.split_once(',').map_or("", |(_, rest)| rest)
    } else {
        text
    }
}

/// `ws://{host}:{port}/socket.io/?EIO=4&transport=websocket`
pub fn socket_url(config: &Config) -> Result<Url> {
    config.require_server()?;
    let raw = format!(
        "ws://{}:{}/socket.io/?EIO=4&transport=websocket",
        config.host, config.port
    );
    Url::parse(&raw).map_err(|e| {
        Error::config(
            format!("Invalid server address '{raw}': {e}"),
            "Check H2R_HOST and H2R_PORT",
        )
    })
}

/// Start the subscription on a background task.
pub fn spawn(url: Url, events: mpsc::Sender<TransportEvent>) -> JoinHandle<()> {
    tokio::spawn(subscribe(url, events, StdDuration::from_secs(RECONNECT_DELAY_SECS)))
}

/// Connect, forward events, and reconnect after `delay` until the receiver
/// is dropped.
pub async fn subscribe(url: Url, events: mpsc::Sender<TransportEvent>, delay: StdDuration) {
    loop {
        let ended = match session(&url, &events).await {
            Ok(()) => ConnectionEvent::Disconnected,
            Err(e) => {
                tracing::warn!("Connection to {} failed: {}", url, e);
                ConnectionEvent::Error(e.to_string())
            }
        };

        if events.send(TransportEvent::Connection(ended)).await.is_err() {
            return;
        }

        tracing::debug!("Reconnecting in {:?}", delay);
        sleep(delay).await;

        if events.is_closed() {
            return;
        }
    }
}

/// One websocket session. `Ok` when the server closed it cleanly.
async fn session(url: &Url, events: &mpsc::Sender<TransportEvent>) -> Result<()> {
    tracing::info!("Connecting to {}", url);
    let (stream, _) = connect_async(url.as_str()).await?;
    let (mut sender, mut receiver) = stream.split();

    while let Some(message) = receiver.next().await {
        match message? {
            Message::Text(text) => {
                let packet = match decode_frame(&text) {
                    Ok(packet) => packet,
                    Err(e) => {
                        tracing::warn!("Skipping malformed frame: {}", e);
                        continue;
                    }
                };

                let forward = match packet {
                    Packet::Open => {
                        sender.send(Message::Text(CONNECT_FRAME.to_string())).await?;
                        None
                    }
                    Packet::Ping => {
                        sender.send(Message::Text(PONG_FRAME.to_string())).await?;
                        None
                    }
                    Packet::Connect => Some(TransportEvent::Connection(ConnectionEvent::Connected)),
                    Packet::ConnectError(reason) => {
                        Some(TransportEvent::Connection(ConnectionEvent::Error(reason)))
                    }
                    Packet::Event { name, payload } if name == FRONTEND_UPDATE_EVENT => {
                        Some(TransportEvent::Update(payload))
                    }
                    Packet::Event { name, .. } => {
                        tracing::debug!("Ignoring event {}", name);
                        None
                    }
                    Packet::Close | Packet::Disconnect => return Ok(()),
                    Packet::Pong | Packet::Ignored => None,
                };

                if let Some(event) = forward {
                    if events.send(event).await.is_err() {
                        return Ok(());
                    }
                }
            }
            Message::Ping(payload) => sender.send(Message::Pong(payload)).await?,
            Message::Close(_) => return Ok(()),
            _ => {}
        }
    }

    Ok(())
}
