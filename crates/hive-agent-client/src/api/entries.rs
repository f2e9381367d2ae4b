//! Entries API.
//!
//! Entries are schemaless JSON documents grouped by namespace. Besides the
//! CRUD endpoints, data can be streamed into a namespace over a WebSocket:
//! each chunk is sent as one JSON frame and the server answers every frame
//! with an acknowledgement before the next chunk goes out.

use futures::stream::BoxStream;
use futures::{SinkExt, Stream, StreamExt};
use serde::Serialize;
use tokio_tungstenite::{connect_async, tungstenite::Message};
use url::Url;

use crate::client::{segment, HiveAgentClient};
use crate::error::{Error, Result};
use crate::types::{Entry, EntryList, MessageResponse};

/// Stream of server acknowledgements for streamed entry data.
pub type EntryStream = BoxStream<'static, Result<serde_json::Value>>;

/// Entries API client.
pub struct EntriesApi {
    client: HiveAgentClient,
}

impl EntriesApi {
    pub(crate) fn new(client: HiveAgentClient) -> Self {
        Self { client }
    }

    /// Create an entry in a namespace.
    pub async fn create<T>(&self, namespace: &str, data: &T) -> Result<Entry>
    where
        T: Serialize + ?Sized,
    {
        let entry: Entry = self
            .client
            .post(&["api", "entry", segment("namespace", namespace)?], data)
            .await
            .inspect_err(|e| tracing::error!(namespace, error = %e, "Failed to create entry"))?;
        tracing::debug!(namespace, %entry, "Created entry");
        Ok(entry)
    }

    /// List all entries in a namespace.
    pub async fn list(&self, namespace: &str) -> Result<EntryList> {
        self.client
            .get(&["api", "entry", segment("namespace", namespace)?])
            .await
            .inspect_err(|e| tracing::error!(namespace, error = %e, "Failed to get entries"))
    }

    /// Get an entry by ID.
    pub async fn get(&self, namespace: &str, entry_id: &str) -> Result<Entry> {
        self.client
            .get(&entry_path(namespace, entry_id)?)
            .await
            .inspect_err(|e| {
                tracing::error!(namespace, entry_id, error = %e, "Failed to get entry")
            })
    }

    /// Replace the data of an entry.
    pub async fn update<T>(&self, namespace: &str, entry_id: &str, data: &T) -> Result<Entry>
    where
        T: Serialize + ?Sized,
    {
        self.client
            .put(&entry_path(namespace, entry_id)?, data)
            .await
            .inspect_err(|e| {
                tracing::error!(namespace, entry_id, error = %e, "Failed to update entry")
            })
    }

    /// Delete an entry.
    pub async fn delete(&self, namespace: &str, entry_id: &str) -> Result<MessageResponse> {
        self.client
            .delete(&entry_path(namespace, entry_id)?)
            .await
            .inspect_err(|e| {
                tracing::error!(namespace, entry_id, error = %e, "Failed to delete entry")
            })
    }

    /// Stream data into a namespace.
    ///
    /// The connection is established before this returns. The returned
    /// stream yields one acknowledgement per chunk, in order, and ends once
    /// `data` is exhausted. A transport failure, an early close by the
    /// server, or an acknowledgement that takes longer than the client's
    /// stream timeout is yielded as the final item.
    pub async fn stream<S, T>(&self, namespace: &str, data: S) -> Result<EntryStream>
    where
        S: Stream<Item = T> + Send + 'static,
        T: Serialize + Send + 'static,
    {
        let url = self.ws_url(namespace)?;
        tracing::debug!(%url, namespace, "Opening entry stream");

        let stream_timeout = self.client.inner().stream_timeout;
        let (mut ws, _) = tokio::time::timeout(stream_timeout, connect_async(url.as_str()))
            .await
            .map_err(|_| Error::Stream(format!("timed out connecting to {}", url)))
            .and_then(|connected| connected.map_err(Error::from))
            .inspect_err(|e| {
                tracing::error!(%url, error = %e, "Failed to establish WebSocket connection")
            })?;
        let namespace = namespace.to_string();

        let acks = async_stream::stream! {
            tokio::pin!(data);
            let mut sent = 0usize;

            while let Some(chunk) = data.next().await {
                let json = match serde_json::to_string(&chunk) {
                    Ok(json) => json,
                    Err(e) => {
                        yield Err(Error::Json(e));
                        break;
                    }
                };
                if let Err(e) = ws.send(Message::Text(json.into())).await {
                    tracing::error!(namespace = %namespace, error = %e, "WebSocket send failed");
                    yield Err(Error::WebSocket(e));
                    break;
                }
                sent += 1;

                let ack = match tokio::time::timeout(stream_timeout, next_ack(&mut ws)).await {
                    Ok(ack) => ack,
                    Err(_) => Err(Error::Stream(
                        "timed out waiting for acknowledgement".to_string(),
                    )),
                };
                match ack {
                    Ok(ack) => yield Ok(ack),
                    Err(e) => {
                        tracing::error!(namespace = %namespace, chunk = sent, error = %e, "Entry stream failed");
                        yield Err(e);
                        break;
                    }
                }
            }

            // The server may already be gone; nothing useful to report.
            let _ = ws.close(None).await;
            tracing::debug!(namespace = %namespace, chunks = sent, "Entry stream finished");
        };

        Ok(acks.boxed())
    }

    /// WebSocket URL of a namespace's stream endpoint.
    fn ws_url(&self, namespace: &str) -> Result<Url> {
        let namespace = segment("namespace", namespace)?;
        let mut url = self.client.url(&["api", "entry", namespace, "stream"])?;
        let scheme = if url.scheme() == "https" { "wss" } else { "ws" };
        url.set_scheme(scheme)
            .map_err(|_| Error::Config("Failed to set WebSocket scheme".to_string()))?;
        Ok(url)
    }
}

/// Path segments of a single entry.
fn entry_path<'a>(namespace: &'a str, entry_id: &'a str) -> Result<[&'a str; 4]> {
    Ok([
        "api",
        "entry",
        segment("namespace", namespace)?,
        segment("entry ID", entry_id)?,
    ])
}

/// Wait for the server's acknowledgement of the chunk just sent.
async fn next_ack<S>(ws: &mut S) -> Result<serde_json::Value>
where
    S: Stream<Item = std::result::Result<Message, tokio_tungstenite::tungstenite::Error>> + Unpin,
{
    while let Some(msg) = ws.next().await {
        match msg? {
            Message::Text(text) => return Ok(serde_json::from_str(&text)?),
            Message::Binary(bytes) => return Ok(serde_json::from_slice(&bytes)?),
            Message::Close(frame) => {
                let reason = frame
                    .map(|f| f.reason.to_string())
                    .filter(|r| !r.is_empty())
                    .unwrap_or_else(|| "no reason given".to_string());
                return Err(Error::Stream(format!(
                    "server closed the stream before acknowledging: {}",
                    reason
                )));
            }
            // Ping/pong and raw frames are not acknowledgements.
            _ => {}
        }
    }
    Err(Error::Stream(
        "connection ended before acknowledging".to_string(),
    ))
}
