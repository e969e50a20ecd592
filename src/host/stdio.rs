//! Stdin/stdout JSON bridge for the host command channel.
//!
//! Reads newline-delimited JSON `CommandEnvelope` messages, dispatches them
//! through the `HostCommandServer` router, and writes one `ResponseEnvelope`
//! per command as a JSON line.
//!
//! Stdout is exclusively reserved for the JSON protocol; all diagnostic
//! output (tracing, logs) must be routed to stderr.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::error::{Result, ScoutError};
use crate::host::channel::{HostCommandClient, command_channel};
use crate::host::contract::{CommandEnvelope, CommandName, ResponseEnvelope};
use crate::tools::ToolRegistry;

/// Default request channel capacity for the stdio bridge.
const REQUEST_CAPACITY: usize = 64;

/// Request id used when a line cannot be parsed as an envelope.
pub const PARSE_ERROR_ID: &str = "parse-error";

/// Run the JSON bridge over the process's stdin and stdout until stdin
/// closes or a `host.stop` command is received.
pub async fn run_stdio_bridge(tools: ToolRegistry) -> Result<()> {
    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();
    run_bridge(tools, stdin, stdout).await
}

/// Run the bridge over arbitrary line-oriented streams.
///
/// The router runs on its own task; the reader loop runs on the current one
/// and drops the client when it finishes, which lets the router exit.
pub async fn run_bridge<R, W>(tools: ToolRegistry, reader: R, writer: W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let (client, server) = command_channel(REQUEST_CAPACITY, tools);
    let server_handle = tokio::spawn(server.run());

    let reader_result = run_reader(client, reader, writer).await;

    if let Err(e) = server_handle.await {
        tracing::warn!(error = %e, "host command server task failed");
    }
    reader_result
}

async fn run_reader<R, W>(client: HostCommandClient, mut reader: R, mut writer: W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut line = String::new();

    loop {
        line.clear();
        let bytes_read = reader
            .read_line(&mut line)
            .await
            .map_err(|e| ScoutError::Channel(format!("failed to read from stdin: {e}")))?;

        if bytes_read == 0 {
            tracing::info!("stdin closed (EOF); shutting down stdio bridge");
            break;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let envelope: CommandEnvelope = match serde_json::from_str(trimmed) {
            Ok(env) => env,
            Err(e) => {
                tracing::warn!(error = %e, "failed to parse command envelope");
                let response = ResponseEnvelope::error(
                    PARSE_ERROR_ID,
                    format!("failed to parse command envelope: {e}"),
                );
                write_response(&mut writer, &response).await?;
                continue;
            }
        };

        let is_stop = envelope.command == CommandName::HostStop;
        let request_id = envelope.request_id.clone();

        let response = match client.send(envelope).await {
            Ok(resp) => resp,
            Err(e) => {
                tracing::error!(error = %e, "host command dispatch failed");
                ResponseEnvelope::error(request_id, format!("dispatch failed: {e}"))
            }
        };

        write_response(&mut writer, &response).await?;

        if is_stop && response.ok {
            tracing::info!("host.stop received; shutting down stdio bridge");
            break;
        }
    }

    Ok(())
}

/// Write a single JSON line and flush.
async fn write_response<W: AsyncWrite + Unpin>(
    writer: &mut W,
    response: &ResponseEnvelope,
) -> Result<()> {
    let mut json = serde_json::to_string(response)
        .map_err(|e| ScoutError::Protocol(format!("failed to serialize response envelope: {e}")))?;
    json.push('\n');
    writer
        .write_all(json.as_bytes())
        .await
        .map_err(|e| ScoutError::Channel(format!("failed to write to stdout: {e}")))?;
    writer
        .flush()
        .await
        .map_err(|e| ScoutError::Channel(format!("failed to flush stdout: {e}")))?;
    Ok(())
}
