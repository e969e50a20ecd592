//! Host command channel and router for the tool host.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};

use crate::error::{Result, ScoutError};
use crate::host::contract::{
    CONTRACT_VERSION, CommandEnvelope, CommandName, ResponseEnvelope, ToolCallPayload,
};
use crate::tools::ToolRegistry;

/// Channel identifier reported by `host.version`.
pub const CHANNEL_NAME: &str = "tool_host_v1";

struct HostCommandRequest {
    envelope: CommandEnvelope,
    response_tx: oneshot::Sender<ResponseEnvelope>,
}

/// Sending half of the command channel.
#[derive(Clone)]
pub struct HostCommandClient {
    request_tx: mpsc::Sender<HostCommandRequest>,
}

impl HostCommandClient {
    /// Validate `envelope`, hand it to the server, and await the response.
    ///
    /// # Errors
    ///
    /// [`ScoutError::Protocol`] for an invalid envelope and
    /// [`ScoutError::Channel`] if the server has gone away. Command failures
    /// come back as error envelopes, not as `Err`.
    pub async fn send(&self, envelope: CommandEnvelope) -> Result<ResponseEnvelope> {
        envelope.validate().map_err(|e| {
            ScoutError::Protocol(format!(
                "invalid host command envelope {}: {}",
                envelope.request_id, e
            ))
        })?;

        let (response_tx, response_rx) = oneshot::channel();
        self.request_tx
            .send(HostCommandRequest {
                envelope,
                response_tx,
            })
            .await
            .map_err(|e| ScoutError::Channel(format!("failed to send host command request: {e}")))?;

        response_rx
            .await
            .map_err(|e| ScoutError::Channel(format!("host command response dropped: {e}")))
    }
}

/// Receiving half of the command channel; routes each envelope to a tool.
pub struct HostCommandServer {
    request_rx: mpsc::Receiver<HostCommandRequest>,
    tools: Arc<ToolRegistry>,
}

#[must_use]
pub fn command_channel(
    request_capacity: usize,
    tools: ToolRegistry,
) -> (HostCommandClient, HostCommandServer) {
    let (request_tx, request_rx) = mpsc::channel(request_capacity.max(1));
    (
        HostCommandClient { request_tx },
        HostCommandServer {
            request_rx,
            tools: Arc::new(tools),
        },
    )
}

impl HostCommandServer {
    /// Serve requests until every client has been dropped.
    pub async fn run(mut self) {
        while let Some(request) = self.request_rx.recv().await {
            let response = self.dispatch(&request.envelope).await;
            let _ = request.response_tx.send(response);
        }
        tracing::debug!("host command channel closed");
    }

    /// Route an envelope, turning a routing failure into an error envelope.
    pub async fn dispatch(&self, envelope: &CommandEnvelope) -> ResponseEnvelope {
        match self.route(envelope).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(
                    request_id = %envelope.request_id,
                    command = envelope.command.as_str(),
                    error = %e,
                    "host command failed"
                );
                ResponseEnvelope::error(envelope.request_id.clone(), e.to_string())
            }
        }
    }

    /// Route a command envelope to the appropriate handler.
    pub async fn route(&self, envelope: &CommandEnvelope) -> Result<ResponseEnvelope> {
        match envelope.command {
            CommandName::HostPing => Ok(ResponseEnvelope::ok(
                envelope.request_id.clone(),
                serde_json::json!({"pong": true}),
            )),
            CommandName::HostVersion => Ok(ResponseEnvelope::ok(
                envelope.request_id.clone(),
                serde_json::json!({
                    "contract_version": CONTRACT_VERSION,
                    "channel": CHANNEL_NAME,
                    "version": env!("CARGO_PKG_VERSION"),
                }),
            )),
            CommandName::HostStop => Ok(ResponseEnvelope::ok(
                envelope.request_id.clone(),
                serde_json::json!({"stopping": true}),
            )),
            CommandName::ToolsList => Ok(ResponseEnvelope::ok(
                envelope.request_id.clone(),
                serde_json::json!({"tools": self.tools.schemas()}),
            )),
            CommandName::ToolsCall => self.handle_tools_call(envelope).await,
        }
    }

    async fn handle_tools_call(&self, envelope: &CommandEnvelope) -> Result<ResponseEnvelope> {
        let call: ToolCallPayload = serde_json::from_value(envelope.payload.clone())
            .map_err(|e| ScoutError::Protocol(format!("invalid tools.call payload: {e}")))?;

        let tool = self
            .tools
            .get(&call.name)
            .ok_or_else(|| ScoutError::Tool(format!("unknown tool: {}", call.name)))?;

        tracing::debug!(request_id = %envelope.request_id, tool = %call.name, "calling tool");
        let result = tool.execute(call.arguments).await?;

        if result.success {
            Ok(ResponseEnvelope::ok(
                envelope.request_id.clone(),
                serde_json::json!({"tool": call.name, "content": result.content}),
            ))
        } else {
            Ok(ResponseEnvelope::error(
                envelope.request_id.clone(),
                result
                    .error
                    .unwrap_or_else(|| format!("tool {} failed", call.name)),
            ))
        }
    }
}
