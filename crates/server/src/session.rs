use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::{debug, info, warn};

use crate::engine::SearchEngine;

/// Per-message buffer capacity. The protocol has no framing: each message is
/// whatever one read returns, so queries and responses beyond this size may
/// be truncated or fragmented across reads. Kept for wire compatibility with
/// existing clients.
const BUFFER_SIZE: usize = 4096;

/// Terminates the session. Case-sensitive; no response is written.
const EXIT_SENTINEL: &str = "exit";

/// One client session: receive a query, process it, write the response,
/// repeat. Ends on the exit sentinel, peer disconnect, a transport error, or
/// the optional idle timeout. The stream is owned by this task and dropped on
/// every exit path.
///
/// A failed query (e.g. an invalid regex term) is answered with an inline
/// error line and the session stays open; only transport problems end it.
pub async fn run(mut stream: TcpStream, engine: Arc<SearchEngine>, idle_timeout: Option<Duration>) {
    let peer = stream
        .peer_addr()
        .map(|addr| addr.to_string())
        .unwrap_or_else(|_| "unknown".into());
    let mut buf = vec![0u8; BUFFER_SIZE];

    loop {
        let read = match idle_timeout {
            Some(limit) => match tokio::time::timeout(limit, stream.read(&mut buf)).await {
                Ok(read) => read,
                Err(_) => {
                    info!("closing idle session with {peer}");
                    break;
                }
            },
            None => stream.read(&mut buf).await,
        };

        let n = match read {
            Ok(0) => {
                info!("client {peer} disconnected");
                break;
            }
            Ok(n) => n,
            Err(e) => {
                warn!("connection with {peer} was closed unexpectedly: {e}");
                break;
            }
        };

        let payload = String::from_utf8_lossy(&buf[..n]);
        let query = payload.trim();
        if query.is_empty() {
            continue;
        }
        if query == EXIT_SENTINEL {
            info!("client {peer} ended the session");
            break;
        }

        debug!("query from {peer}: {query}");
        let response = match process(&engine, query).await {
            Ok(body) => body,
            Err(e) => {
                warn!("error handling query from {peer}: {e:#}");
                format!("Error: {e:#}\n")
            }
        };

        if let Err(e) = stream.write_all(response.as_bytes()).await {
            warn!("failed to send response to {peer}: {e}");
            break;
        }
    }
}

/// The corpus scan is synchronous file I/O; keep it off the async workers.
async fn process(engine: &Arc<SearchEngine>, query: &str) -> anyhow::Result<String> {
    let engine = Arc::clone(engine);
    let query = query.to_string();
    tokio::task::spawn_blocking(move || engine.process(&query)).await?
}
