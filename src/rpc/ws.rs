use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicU64, Ordering},
    },
};

use anyhow::{Context, Result};
use async_trait::async_trait;
use cli_log::{debug, info, warn};
use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use tokio::{
    sync::{mpsc, oneshot},
    task::JoinHandle,
};
use tokio_tungstenite::{connect_async, tungstenite::Message};

use super::client::{JsonRpcClient, JsonRpcRequest, JsonRpcResponse, RpcError};

type Waiter = oneshot::Sender<std::result::Result<Value, RpcError>>;

/// Requests waiting on a response. Once `closed` is set no new waiter is accepted.
#[derive(Default)]
struct Pending {
    closed: bool,
    waiters: HashMap<u64, Waiter>,
}

type PendingMap = Arc<Mutex<Pending>>;

/// JSON-RPC over a single WebSocket connection to the wallet.
///
/// A writer task drains the outbound queue and a reader task routes each
/// response to the caller waiting on its id. When the socket goes away every
/// pending request is failed and [`JsonRpcClient::is_alive`] turns false.
pub struct WsTransport {
    outbound: mpsc::UnboundedSender<Message>,
    pending: PendingMap,
    next_id: AtomicU64,
    reader_handle: JoinHandle<()>,
    writer_handle: JoinHandle<()>,
}

impl WsTransport {
    pub async fn connect(url: &str) -> Result<Self> {
        info!("Connecting to wallet provider at: {url}");

        let (ws_stream, _) = connect_async(url)
            .await
            .with_context(|| format!("Failed to connect to wallet provider at {url}"))?;

        info!("Connected to wallet provider at: {url}");

        let (mut write, mut read) = ws_stream.split();
        let (outbound, mut outbound_rx) = mpsc::unbounded_channel::<Message>();
        let pending: PendingMap = Arc::new(Mutex::new(Pending::default()));

        let writer_pending = Arc::clone(&pending);
        let writer_handle = tokio::spawn(async move {
            while let Some(msg) = outbound_rx.recv().await {
                if let Err(e) = write.send(msg).await {
                    warn!("Failed to send to wallet provider: {e}");
                    Self::fail_pending(&writer_pending, "connection closed");
                    break;
                }
            }
            if let Err(e) = write.send(Message::Close(None)).await {
                debug!("Failed to send close message: {e}");
            }
        });

        let reader_pending = Arc::clone(&pending);
        let pong_tx = outbound.clone();
        let reader_url = url.to_string();
        let reader_handle = tokio::spawn(async move {
            while let Some(msg_result) = read.next().await {
                match msg_result {
                    Ok(Message::Text(text)) => {
                        Self::route_response(text.as_str(), &reader_pending);
                    }
                    Ok(Message::Binary(data)) => match std::str::from_utf8(&data) {
                        Ok(text) => Self::route_response(text, &reader_pending),
                        Err(_) => warn!("Ignoring non UTF-8 binary frame"),
                    },
                    Ok(Message::Ping(data)) => {
                        if pong_tx.send(Message::Pong(data)).is_err() {
                            break;
                        }
                    }
                    Ok(Message::Pong(_)) | Ok(Message::Frame(_)) => {}
                    Ok(Message::Close(close_frame)) => {
                        if let Some(frame) = close_frame {
                            warn!("Wallet provider closed with code: {} reason: {}", frame.code, frame.reason);
                        } else {
                            warn!("Wallet provider closed without close frame");
                        }
                        break;
                    }
                    Err(e) => {
                        warn!("Wallet provider connection error: {e}");
                        break;
                    }
                }
            }

            Self::fail_pending(&reader_pending, "connection closed");
            warn!("Wallet provider connection ended: {reader_url}");
        });

        Ok(Self {
            outbound,
            pending,
            next_id: AtomicU64::new(1),
            reader_handle,
            writer_handle,
        })
    }

    fn route_response(text: &str, pending: &PendingMap) {
        let response: JsonRpcResponse = match serde_json::from_str(text) {
            Ok(response) => response,
            Err(e) => {
                // Subscriptions and provider events carry no id; nothing waits on them.
                debug!("Ignoring non-response message ({e}): {text}");
                return;
            }
        };

        let Some(id) = response.id else {
            debug!("Ignoring notification: {text}");
            return;
        };

        let waiter = match pending.lock() {
            Ok(mut pending) => pending.waiters.remove(&id),
            Err(_) => None,
        };

        match waiter {
            Some(tx) => {
                let _ = tx.send(response.into_result());
            }
            None => warn!("Response for unknown request id {id}"),
        }
    }

    /// Mark the connection closed and fail every request still waiting.
    fn fail_pending(pending: &PendingMap, reason: &str) {
        if let Ok(mut pending) = pending.lock() {
            pending.closed = true;
            for (_, tx) in pending.waiters.drain() {
                let _ = tx.send(Err(RpcError::new(-32000, reason)));
            }
        }
    }
}

#[async_trait]
impl JsonRpcClient for WsTransport {
    async fn request(&self, method: &str, params: Value) -> Result<Value> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = serde_json::to_string(&JsonRpcRequest::new(id, method, params))?;

        let (tx, rx) = oneshot::channel();
        {
            let mut pending = self
                .pending
                .lock()
                .map_err(|_| anyhow::anyhow!("Pending request table poisoned"))?;
            if pending.closed {
                anyhow::bail!("Wallet provider connection is closed ({method} not sent)");
            }
            pending.waiters.insert(id, tx);
        }

        debug!("-> {method} (id {id})");
        if self.outbound.send(Message::Text(body.into())).is_err() {
            if let Ok(mut pending) = self.pending.lock() {
                pending.waiters.remove(&id);
            }
            anyhow::bail!("Wallet provider connection is closed ({method} not sent)");
        }

        let result = rx
            .await
            .map_err(|_| anyhow::anyhow!("Wallet provider dropped request {method}"))?;
        result.map_err(|e| anyhow::Error::new(e).context(format!("{method} failed")))
    }

    fn is_alive(&self) -> bool {
        !self.reader_handle.is_finished() && !self.writer_handle.is_finished()
    }
}

impl Drop for WsTransport {
    fn drop(&mut self) {
        self.reader_handle.abort();
        self.writer_handle.abort();
    }
}
