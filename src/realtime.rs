use futures_util::StreamExt;
use serde::Deserialize;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio_tungstenite::{connect_async, tungstenite::Message};

use crate::error::{ApiError, ApiResult};
use crate::models::{ChatMessage, Order};

/// Server-push events, one frame per event. Wire names are fixed by the
/// backend and intentionally inconsistent in casing.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum RealtimeEvent {
    #[serde(rename = "new-order")]
    NewOrder(Order),
    #[serde(rename = "order-status-updated")]
    OrderStatusUpdated(Order),
    #[serde(rename = "activeUsers")]
    ActiveUsers(u64),
    #[serde(rename = "receive_message")]
    ReceiveMessage(ChatMessage),
}

/// One duplex channel per session. Decodes JSON frames into `RealtimeEvent`
/// and fans them out to subscribers; reconnect/backoff is the caller's
/// concern, a dropped connection just closes the subscriptions and leaves
/// any cache stale-but-valid.
pub struct RealtimeChannel {
    tx: broadcast::Sender<RealtimeEvent>,
    reader: JoinHandle<()>,
}

impl RealtimeChannel {
    pub async fn connect(url: &str) -> ApiResult<Self> {
        let (stream, _) = connect_async(url)
            .await
            .map_err(|err| ApiError::Internal(err.into()))?;
        let (_, mut read) = stream.split();

        let (tx, _) = broadcast::channel(64);
        let fanout = tx.clone();
        let reader = tokio::spawn(async move {
            while let Some(frame) = read.next().await {
                let frame = match frame {
                    Ok(frame) => frame,
                    Err(err) => {
                        tracing::warn!(error = %err, "realtime read failed, closing channel");
                        break;
                    }
                };
                match frame {
                    Message::Text(text) => match serde_json::from_str::<RealtimeEvent>(&text) {
                        Ok(event) => {
                            // Send only fails when nobody is subscribed.
                            let _ = fanout.send(event);
                        }
                        Err(err) => {
                            tracing::warn!(error = %err, "dropping unrecognized realtime frame");
                        }
                    },
                    Message::Close(_) => break,
                    _ => {}
                }
            }
            tracing::info!("realtime channel closed");
        });

        Ok(Self { tx, reader })
    }

    pub fn subscribe(&self) -> broadcast::Receiver<RealtimeEvent> {
        self.tx.subscribe()
    }

    /// Tear down the channel. Detaches every subscriber so handlers do not
    /// stack up across reconnects.
    pub fn close(self) {
        self.reader.abort();
    }
}

impl Drop for RealtimeChannel {
    fn drop(&mut self) {
        self.reader.abort();
    }
}
