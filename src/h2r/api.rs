use reqwest::Client;
use std::time::Duration as StdDuration;
use tokio::task::JoinHandle;

use super::commands::Command;
use crate::actions::ActionInvocation;
use crate::config::Config;
use crate::constants::server::HTTP_TIMEOUT_SECS;
use crate::error::{Error, Result};

/// Client for the graphics server HTTP API.
///
/// Commands are one-way: [`GraphicsClient::send`] does not wait for the
/// server and never retries. Failures are logged and otherwise ignored.
#[derive(Clone)]
pub struct GraphicsClient {
    base_uri: String,
    client: Client,
}

impl GraphicsClient {
    /// Create a client for the configured server and project.
    pub fn new(config: &Config) -> Self {
        Self {
            base_uri: config.api_url(""),
            client: Client::builder()
                .timeout(StdDuration::from_secs(HTTP_TIMEOUT_SECS))
                .build()
                .unwrap_or_default(),
        }
    }

    /// Full URL of a command.
    pub fn url(&self, command: &Command) -> String {
        format!("{}{}", self.base_uri, command.path())
    }

    /// POST a command and wait for the server's answer.
    pub async fn post(&self, command: &Command) -> Result<()> {
        let url = self.url(command);
        tracing::debug!("ATTEMPTING {}", url);

        let resp = self
            .client
            .post(&url)
            .json(&command.body())
            .send()
            .await
            .map_err(|e| Error::Network(format!("Request to {} failed: {}", url, e)))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::server_status(
                format!("Request to {} returned {}", url, status),
                status.as_u16(),
            ));
        }

        Ok(())
    }

    /// Fire-and-forget: POST on a background task and return immediately.
    ///
    /// The handle is only for callers that want to wait; failures never
    /// reach it. Must be called from inside a tokio runtime.
    pub fn send(&self, command: Command) -> JoinHandle<()> {
        let client = self.clone();
        tokio::spawn(async move {
            if let Err(e) = client.post(&command).await {
                tracing::warn!("Command {} failed: {}", command.path(), e);
            }
        })
    }

    /// Send the command a pressed action stands for.
    ///
    /// Returns `None`, after logging, when the action is unknown or misses a
    /// required option.
    pub fn dispatch(&self, invocation: &ActionInvocation) -> Option<JoinHandle<()>> {
        let Some(command) = invocation.to_command() else {
            tracing::warn!(
                "Action {} is unknown or missing a required option",
                invocation.action_id
            );
            return None;
        };
        Some(self.send(command))
    }
}
