//! `h2r-bridge` - run the sync loop against a graphics server.
//!
//! Without a panel attached, host updates are written to the log: statuses at
//! info, variable changes at debug. Actions typed on stdin, one per line as
//! `actionId option=value ...`, are sent to the server like button presses.

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use h2r_bridge::actions::ActionInvocation;
use h2r_bridge::clock::SystemClock;
use h2r_bridge::config::Config;
use h2r_bridge::constants::async_tasks::CHANNEL_BUFFER_SIZE;
use h2r_bridge::h2r::{socket, GraphicsClient};
use h2r_bridge::host::{
    ActionDefinition, ConnectionStatus, FeedbackDefinition, PanelHost, PresetDefinition,
};
use h2r_bridge::logging::init_logging;
use h2r_bridge::sync::{self, SyncEngine};
use h2r_bridge::variables::{VariableDefinition, VariableValues};

/// Panel host that only logs what it is told.
#[derive(Default)]
struct LogHost {
    values: VariableValues,
}

impl PanelHost for LogHost {
    fn update_status(&mut self, status: &ConnectionStatus) {
        if status.is_ok() {
            tracing::info!("Status: {}", status);
        } else {
            tracing::warn!("Status: {}", status);
        }
    }

    fn set_variable_definitions(&mut self, definitions: Vec<VariableDefinition>) {
        tracing::info!("{} variables defined", definitions.len());
    }

    fn set_variable_values(&mut self, values: VariableValues) {
        for (id, value) in values {
            if self.values.get(&id) != Some(&value) {
                tracing::debug!("{} = {}", id, value);
                self.values.insert(id, value);
            }
        }
    }

    fn set_action_definitions(&mut self, actions: Vec<ActionDefinition>) {
        tracing::info!("{} actions defined", actions.len());
    }

    fn set_preset_definitions(&mut self, presets: Vec<PresetDefinition>) {
        tracing::info!("{} presets defined", presets.len());
    }

    fn set_feedback_definitions(&mut self, feedbacks: Vec<FeedbackDefinition>) {
        tracing::info!("{} feedbacks defined", feedbacks.len());
    }

    fn check_feedbacks(&mut self, feedback_id: &str) {
        tracing::debug!("Re-checking {} feedbacks", feedback_id);
    }
}

/// Dispatch actions typed on stdin until it closes.
async fn read_actions(client: GraphicsClient) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) if line.trim().is_empty() => {}
            Ok(Some(line)) => match ActionInvocation::from_args(line.split_whitespace()) {
                Ok(invocation) => {
                    client.dispatch(&invocation);
                }
                Err(e) => tracing::warn!("Ignoring input: {}", e),
            },
            Ok(None) => return,
            Err(e) => {
                tracing::warn!("Stopped reading actions: {}", e);
                return;
            }
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let config = Config::load().context("Failed to load configuration")?;
    let url = socket::socket_url(&config).context("No graphics server configured")?;
    tracing::info!(
        "{} {} mirroring project {} from {}",
        config.app_name(),
        config.app_version(),
        config.project_id,
        config.base_url()
    );

    let (tx, rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);
    let transport = socket::spawn(url, tx);
    let input = tokio::spawn(read_actions(GraphicsClient::new(&config)));

    let mut engine = SyncEngine::new(config, SystemClock);
    let mut host = LogHost::default();

    tokio::select! {
        () = sync::run(&mut engine, rx, &mut host) => {}
        _ = tokio::signal::ctrl_c() => tracing::info!("Shutting down"),
    }

    transport.abort();
    input.abort();
    Ok(())
}
