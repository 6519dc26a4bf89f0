//! State sync between the graphics server and the panel host.
//!
//! [`SyncEngine`] owns the current snapshot and the timer table. [`run`]
//! drives it from one task: transport events and timer deadlines are handled
//! strictly one after another, so no two handlers ever overlap.

/// Snapshot and timer state machine
pub mod engine;
/// Timer deadline table
pub mod scheduler;

pub use crate::host::HostUpdate;
pub use engine::SyncEngine;
pub use scheduler::{Reconciliation, TimerScheduler};

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{sleep_until, Instant};

use crate::clock::Clock;
use crate::h2r::TransportEvent;
use crate::host::{apply, PanelHost};

/// Feed transport events and timer ticks through `engine` into `host`.
///
/// Returns once the event channel closes.
pub async fn run<C, H>(
    engine: &mut SyncEngine<C>,
    mut events: mpsc::Receiver<TransportEvent>,
    host: &mut H,
) where
    C: Clock,
    H: PanelHost + ?Sized,
{
    loop {
        let deadline = engine.next_deadline().map(|due_ms| {
            let wait = u64::try_from(due_ms.saturating_sub(engine.now_ms())).unwrap_or(0);
            Instant::now() + Duration::from_millis(wait)
        });

        tokio::select! {
            event = events.recv() => match event {
                Some(event) => apply(host, engine.handle_event(event)),
                None => {
                    tracing::info!("Event channel closed, stopping sync");
                    return;
                }
            },
            () = wait_for(deadline) => apply(host, engine.handle_tick()),
        }
    }
}

async fn wait_for(deadline: Option<Instant>) {
    match deadline {
        Some(at) => sleep_until(at).await,
        None => std::future::pending().await,
    }
}
