//! WebSocket change transport
//!
//! Connects to the relay's `/ws` endpoint and forwards every change event
//! frame into the subscriber's sink. Dropped connections are retried until
//! the subscription ends, and every successful reconnect is followed by a
//! `TransportEvent::Resync`.

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::sync::{mpsc, oneshot};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use url::Url;

use shared::{ChangeEvent, ProcessId, process_debug, process_info, process_warn};

use crate::error::{ClientError, ClientResult};
use crate::traits::ChangeTransport;
use crate::types::{Subscription, TransportEvent};

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Why a connection's read loop ended
enum ReadEnd {
    Cancelled,
    SinkClosed,
    Disconnected,
}

/// Real WebSocket implementation of `ChangeTransport`
#[derive(Debug, Clone)]
pub struct RealWebSocketTransport {
    url: Url,
    reconnect_delay: Duration,
}

impl RealWebSocketTransport {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            reconnect_delay: Duration::from_secs(2),
        }
    }

    pub fn with_reconnect_delay(mut self, delay: Duration) -> Self {
        self.reconnect_delay = delay;
        self
    }

    async fn connect(url: &Url) -> ClientResult<Socket> {
        let (socket, _response) = connect_async(url.as_str())
            .await
            .map_err(|e| ClientError::transport(format!("Failed to connect to {url}: {e}")))?;
        Ok(socket)
    }

    /// Forward frames until the socket drops, the sink closes or the
    /// subscription is cancelled
    async fn read_frames(
        socket: &mut Socket,
        sink: &mpsc::Sender<TransportEvent>,
        cancel: &mut oneshot::Receiver<()>,
    ) -> ReadEnd {
        loop {
            tokio::select! {
                _ = &mut *cancel => return ReadEnd::Cancelled,
                frame = socket.next() => match frame {
                    Some(Ok(Message::Text(text))) => match ChangeEvent::from_json(&text) {
                        Ok(event) => {
                            process_debug!(ProcessId::current(), "📨 {} for {}", event.kind(), event.target_id());
                            if sink.send(TransportEvent::Change(event)).await.is_err() {
                                return ReadEnd::SinkClosed;
                            }
                        }
                        Err(e) => {
                            process_warn!(ProcessId::current(), "Ignoring malformed change frame: {}", e);
                        }
                    },
                    Some(Ok(Message::Close(_))) | None => return ReadEnd::Disconnected,
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        process_warn!(ProcessId::current(), "WebSocket read error: {}", e);
                        return ReadEnd::Disconnected;
                    }
                },
            }
        }
    }
}

#[async_trait]
impl ChangeTransport for RealWebSocketTransport {
    async fn subscribe(&self, sink: mpsc::Sender<TransportEvent>) -> ClientResult<Subscription> {
        // The first connection is made eagerly so a bad URL fails the subscribe
        let mut socket = Self::connect(&self.url).await?;
        process_info!(ProcessId::current(), "🔗 Subscribed to change events at {}", self.url);

        let (cancel_tx, mut cancel_rx) = oneshot::channel();
        let url = self.url.clone();
        let reconnect_delay = self.reconnect_delay;

        let task = tokio::spawn(async move {
            loop {
                match Self::read_frames(&mut socket, &sink, &mut cancel_rx).await {
                    ReadEnd::Cancelled | ReadEnd::SinkClosed => {
                        let _ = socket.close(None).await;
                        break;
                    }
                    ReadEnd::Disconnected => {
                        process_warn!(ProcessId::current(), "🔌 Change channel dropped, reconnecting to {}", url);
                    }
                }

                // Retry until connected or cancelled
                socket = loop {
                    tokio::select! {
                        _ = &mut cancel_rx => return,
                        _ = tokio::time::sleep(reconnect_delay) => {}
                    }
                    match Self::connect(&url).await {
                        Ok(socket) => break socket,
                        Err(e) => process_warn!(ProcessId::current(), "Reconnect failed: {}", e),
                    }
                };
                process_info!(ProcessId::current(), "🔗 Change channel reconnected");

                // Frames published while we were away are gone
                if sink.send(TransportEvent::Resync).await.is_err() {
                    let _ = socket.close(None).await;
                    break;
                }
            }
        });

        Ok(Subscription::new(cancel_tx, task))
    }
}
