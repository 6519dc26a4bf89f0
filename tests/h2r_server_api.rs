//! Integration tests against a running H2R Graphics server.

// Only runs with `--features integration_test` and a server configured in
// the environment or `.env` (H2R_HOST, H2R_PORT, H2R_PROJECT_ID).
#![cfg(feature = "integration_test")]
#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

use std::time::{Duration, Instant};

use tokio::sync::mpsc;
use tokio::time::timeout;

use h2r_bridge::config::Config;
use h2r_bridge::h2r::{socket, Command, ConnectionEvent, GraphicsClient, TransportEvent};
use h2r_bridge::project::FrontendUpdate;

fn setup_config() -> Option<Config> {
    match Config::load() {
        Ok(config) if config.has_server() => Some(config),
        Ok(_) => {
            println!(
                r#"Skipping integration test: H2R_HOST / H2R_PROJECT_ID not set in environment or ".env" file."#
            );
            None
        }
        Err(e) => {
            println!("Skipping integration test: Failed to load config: {}", e);
            None
        }
    }
}

#[tokio::test]
async fn test_receives_project_snapshot() {
    let Some(config) = setup_config() else { return };

    let (tx, mut rx) = mpsc::channel(16);
    let handle = socket::spawn(socket::socket_url(&config).unwrap(), tx);

    let snapshot = timeout(Duration::from_secs(10), async {
        while let Some(event) = rx.recv().await {
            match event {
                TransportEvent::Update(payload) => {
                    return FrontendUpdate::from_value(payload).unwrap();
                }
                TransportEvent::Connection(ConnectionEvent::Error(e)) => {
                    panic!("Connection failed: {}", e)
                }
                TransportEvent::Connection(_) => {}
            }
        }
        panic!("Subscription ended without a snapshot");
    })
    .await
    .expect("No updateFrontend push within 10s");

    let project = snapshot
        .project(&config.project_id)
        .expect("Configured project is not on the server")
        .expect("Project snapshot did not decode");
    println!("Project {} has {} cues", config.project_id, project.cues.len());

    handle.abort();
}

#[tokio::test]
async fn test_run_command_is_accepted() {
    let Some(config) = setup_config() else { return };
    let client = GraphicsClient::new(&config);

    // `run` only advances cued graphics, so it is safe against a live show file.
    let start = Instant::now();
    client.post(&Command::Run).await.expect("run command failed");
    println!("POST {} answered in {:.2?}", client.url(&Command::Run), start.elapsed());
    assert!(start.elapsed() < Duration::from_secs(5));
}
