//! Send one action to the graphics server, the way a panel button would.
//!
//! Usage: cargo run --bin send_command -- <actionId> [option=value ...]
//!
//! Example: cargo run --bin send_command -- showHide graphicId=abc status=toggle

use anyhow::{bail, Context};

use h2r_bridge::actions::ActionInvocation;
use h2r_bridge::config::Config;
use h2r_bridge::h2r::GraphicsClient;
use h2r_bridge::logging::init_logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let invocation = ActionInvocation::from_args(std::env::args().skip(1))
        .context("usage: send_command <actionId> [option=value ...]")?;
    let Some(command) = invocation.to_command() else {
        bail!(
            "Action '{}' is unknown or missing a required option",
            invocation.action_id
        );
    };

    let config = Config::load().context("Failed to load configuration")?;
    config.require_server()?;
    let client = GraphicsClient::new(&config);

    println!("POST {}", client.url(&command));
    println!("{}", command.body());
    client.post(&command).await?;
    println!("OK");

    Ok(())
}
