//! JSON-lines bridge between the plugin host and the method dispatcher.
//!
//! The host writes one request object per line on stdin:
//!
//! ```text
//! {"id": 1, "method": "list_games", "args": {}}
//! ```
//!
//! and reads one response per line on stdout, in completion order:
//!
//! ```text
//! {"id": 1, "success": true, "result": {"games": [], "code": 0, "stderr": ""}}
//! ```
//!
//! Failed calls carry `"success": false` and the error message as `result`.

use std::future::Future;
use std::io;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

use crate::plugin::Plugin;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HostRequest {
    #[serde(default)]
    pub id: Value,
    pub method: String,
    #[serde(default = "empty_args")]
    pub args: Value,
}

fn empty_args() -> Value {
    Value::Object(serde_json::Map::new())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostResponse {
    pub id: Value,
    pub success: bool,
    pub result: Value,
}

impl HostResponse {
    pub fn ok(id: Value, result: Value) -> Self {
        Self {
            id,
            success: true,
            result,
        }
    }

    pub fn failed(id: Value, message: impl Into<String>) -> Self {
        Self {
            id,
            success: false,
            result: Value::String(message.into()),
        }
    }
}

/// Runs the plugin until the host closes stdin, stops reading stdout, or
/// `shutdown` resolves.
///
/// The startup hook runs before the first request is read. Each request is
/// handled on its own task; in-flight requests are drained and the shutdown
/// hook runs on every exit path, including read and write failures. Returns
/// the writer once every response is flushed.
pub async fn serve<R, W, S>(plugin: Arc<Plugin>, mut reader: R, writer: W, shutdown: S) -> io::Result<W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
    S: Future<Output = ()>,
{
    plugin.main().await;

    let (tx, rx) = mpsc::unbounded_channel::<HostResponse>();
    let writer_task = tokio::spawn(write_responses(writer, rx));

    let mut in_flight = JoinSet::new();
    let mut buf = Vec::new();
    let mut read_error = None;
    tokio::pin!(shutdown);

    loop {
        buf.clear();
        let read = tokio::select! {
            read = reader.read_until(b'\n', &mut buf) => read,
            () = &mut shutdown => {
                info!("Shutdown requested");
                break;
            }
            () = tx.closed() => {
                warn!("Host stopped reading responses");
                break;
            }
        };

        match read {
            Ok(0) => {
                debug!("Host closed the request stream");
                break;
            }
            Ok(_) => {}
            Err(e) => {
                error!("Reading requests failed: {}", e);
                read_error = Some(e);
                break;
            }
        }
        if buf.trim_ascii().is_empty() {
            continue;
        }

        let request = match serde_json::from_slice::<HostRequest>(&buf) {
            Ok(request) => request,
            Err(e) => {
                warn!("Malformed request: {}", e);
                send_response(&tx, HostResponse::failed(Value::Null, format!("Malformed request: {e}")));
                continue;
            }
        };

        let plugin = plugin.clone();
        let tx = tx.clone();
        in_flight.spawn(async move {
            let response = handle_request(&plugin, request).await;
            send_response(&tx, response);
        });
    }

    while in_flight.join_next().await.is_some() {}
    drop(tx);

    let written = writer_task.await.map_err(io::Error::other);
    plugin.unload().await;

    let writer = written??;
    match read_error {
        Some(e) => Err(e),
        None => Ok(writer),
    }
}

fn send_response(tx: &mpsc::UnboundedSender<HostResponse>, response: HostResponse) {
    if let Err(mpsc::error::SendError(response)) = tx.send(response) {
        warn!("Dropped response for request {}: host output closed", response.id);
    }
}

pub async fn handle_request(plugin: &Plugin, request: HostRequest) -> HostResponse {
    match plugin.dispatcher().dispatch(&request.method, request.args).await {
        Ok(result) => HostResponse::ok(request.id, result),
        Err(e) => HostResponse::failed(request.id, e.to_string()),
    }
}

async fn write_responses<W>(mut writer: W, mut rx: mpsc::UnboundedReceiver<HostResponse>) -> io::Result<W>
where
    W: AsyncWrite + Unpin,
{
    while let Some(response) = rx.recv().await {
        let mut line = serde_json::to_vec(&response)?;
        line.push(b'\n');
        writer.write_all(&line).await?;
        writer.flush().await?;
    }
    Ok(writer)
}
