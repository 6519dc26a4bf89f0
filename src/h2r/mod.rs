//! H2R Graphics server integration.
//!
//! Outbound commands go over HTTP ([`api`]); project snapshots arrive over a
//! Socket.IO websocket ([`socket`]).

/// Fire-and-forget HTTP client
pub mod api;
/// Command paths and bodies
pub mod commands;
/// Snapshot subscription
pub mod socket;

pub use api::GraphicsClient;
pub use commands::{Command, GraphicUpdate, RowSelection, ScoreChange, StatusChange};
pub use socket::{ConnectionEvent, TransportEvent};
