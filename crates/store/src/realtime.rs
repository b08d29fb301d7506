//! Phoenix-channel realtime subscription over a websocket.
//!
//! The feed is deliberately coarse: it reports only that a row on the
//! subscribed table changed. Consumers refetch the table rather than
//! patching local state from event payloads.

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, trace, warn};

use crate::error::{StoreError, StoreResult};
use crate::store::{ChangeEvent, ChangeFeed, ChangeKind};
use crate::StoreConfig;

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(30);
const CHANNEL_CAPACITY: usize = 32;

/// Derive the realtime websocket URL from the project's HTTP URL.
fn socket_url(config: &StoreConfig) -> String {
    let base = config
        .url
        .trim_end_matches('/')
        .replace("https://", "wss://")
        .replace("http://", "ws://");
    format!(
        "{}/realtime/v1/websocket?apikey={}&vsn=1.0.0",
        base, config.anon_key
    )
}

/// Channel topic for row changes on a public table.
fn topic_for(table: &str) -> String {
    format!("realtime:public:{}", table)
}

/// Phoenix join message for a table topic.
fn join_message(table: &str) -> String {
    format!(
        r#"{{"topic":"{}","event":"phx_join","payload":{{}},"ref":"1"}}"#,
        topic_for(table)
    )
}

/// Heartbeat message keeping the socket alive between row changes.
fn heartbeat_message() -> String {
    r#"{"topic":"phoenix","event":"heartbeat","payload":{},"ref":"0"}"#.to_string()
}

/// Parse a frame from the socket into a change event.
///
/// Protocol frames (replies, heartbeat acks) and frames for other
/// topics return `None`.
fn parse_change_event(text: &str, table: &str) -> Option<ChangeEvent> {
    let value: serde_json::Value = serde_json::from_str(text).ok()?;

    let topic = value.get("topic")?.as_str()?;
    if topic != topic_for(table) {
        return None;
    }

    let event = value.get("event")?.as_str()?;
    let kind = ChangeKind::from_event(event)?;

    Some(ChangeEvent {
        kind,
        table: table.to_string(),
    })
}

/// Connect to the realtime endpoint and join the table's channel.
///
/// The returned feed owns a background task that pumps the socket and
/// sends heartbeats; dropping the feed tears the connection down.
pub async fn connect(config: &StoreConfig, table: &str) -> StoreResult<ChangeFeed> {
    let url = socket_url(config);
    debug!(table, "connecting realtime socket");

    let (socket, _response) =
        connect_async(url.as_str())
            .await
            .map_err(|e| StoreError::Realtime {
                message: format!("connection failed: {}", e),
            })?;

    let (mut write, mut read) = socket.split();

    write
        .send(Message::Text(join_message(table)))
        .await
        .map_err(|e| StoreError::Realtime {
            message: format!("channel join failed: {}", e),
        })?;

    let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
    let table = table.to_string();

    let task = tokio::spawn(async move {
        let mut heartbeat = tokio::time::interval(HEARTBEAT_INTERVAL);
        heartbeat.tick().await;

        loop {
            tokio::select! {
                _ = heartbeat.tick() => {
                    if write.send(Message::Text(heartbeat_message())).await.is_err() {
                        warn!("heartbeat failed, closing feed");
                        break;
                    }
                }
                frame = read.next() => {
                    match frame {
                        Some(Ok(Message::Text(text))) => {
                            if let Some(event) = parse_change_event(&text, &table) {
                                trace!(?event, "row change");
                                if tx.send(event).await.is_err() {
                                    break;
                                }
                            }
                        }
                        Some(Ok(_)) => {}
                        Some(Err(e)) => {
                            warn!(error = %e, "realtime socket error");
                            break;
                        }
                        None => {
                            debug!("realtime socket closed");
                            break;
                        }
                    }
                }
            }
        }
    });

    Ok(ChangeFeed::with_task(rx, task))
}
