//! Entry streaming tests against an in-process WebSocket server.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures::{SinkExt, StreamExt};
use hive_agent_client::{Error, HiveAgentClient};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::handshake::server::{ErrorResponse, Request, Response};
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tokio_tungstenite::tungstenite::Message;

/// How the fake agent treats incoming chunks.
#[derive(Clone, Copy)]
enum Behavior {
    /// Acknowledge every chunk, preceded by a ping.
    Ack,
    /// Acknowledge the first chunk, then close.
    CloseAfterFirst,
    /// Read chunks but never answer.
    Silent,
    /// Drop the TCP connection after the first chunk, without a close frame.
    DropAfterFirst,
}

/// A fake agent serving a single WebSocket connection.
struct Agent {
    base_url: String,
    /// Request path seen during the handshake.
    seen_path: Arc<Mutex<String>>,
    /// Chunks received, in order.
    received: Arc<Mutex<Vec<Value>>>,
    /// Whether the client sent a close frame.
    got_close: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

impl Agent {
    /// Wait for the connection to finish.
    async fn finish(&mut self) {
        tokio::time::timeout(Duration::from_secs(5), &mut self.handle)
            .await
            .expect("agent did not finish")
            .unwrap();
    }
}

/// Accept one WebSocket connection and answer chunks per `behavior`.
async fn spawn_agent(behavior: Behavior) -> Agent {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let seen_path = Arc::new(Mutex::new(String::new()));
    let received = Arc::new(Mutex::new(Vec::new()));
    let got_close = Arc::new(AtomicBool::new(false));

    let path_slot = seen_path.clone();
    let chunks = received.clone();
    let close_flag = got_close.clone();
    let handle = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let callback = |req: &Request, resp: Response| -> Result<Response, ErrorResponse> {
            *path_slot.lock().unwrap() = req.uri().path().to_string();
            Ok(resp)
        };
        let mut ws = tokio_tungstenite::accept_hdr_async(stream, callback)
            .await
            .unwrap();

        let mut count = 0;
        while let Some(Ok(msg)) = ws.next().await {
            let text = match msg {
                Message::Text(text) => text,
                Message::Close(_) => {
                    close_flag.store(true, Ordering::SeqCst);
                    break;
                }
                _ => continue,
            };
            let chunk: Value = serde_json::from_str(&text).unwrap();
            chunks.lock().unwrap().push(chunk.clone());
            count += 1;

            match behavior {
                Behavior::Ack => {
                    ws.send(Message::Ping(Vec::new().into())).await.unwrap();
                    let ack = json!({"status": "received", "seq": count, "echo": chunk});
                    ws.send(Message::Text(ack.to_string().into())).await.unwrap();
                }
                Behavior::CloseAfterFirst => {
                    if count == 1 {
                        let ack = json!({"status": "received", "seq": count});
                        ws.send(Message::Text(ack.to_string().into())).await.unwrap();
                    } else {
                        let _ = ws
                            .close(Some(CloseFrame {
                                code: CloseCode::Error,
                                reason: "namespace full".into(),
                            }))
                            .await;
                        break;
                    }
                }
                Behavior::Silent => {}
                Behavior::DropAfterFirst => {
                    // Drop the socket without a closing handshake.
                    drop(ws);
                    return;
                }
            }
        }
    });

    Agent {
        base_url: format!("http://{}", addr),
        seen_path,
        received,
        got_close,
        handle,
    }
}

#[tokio::test]
async fn test_stream_yields_acks_in_order() {
    let mut agent = spawn_agent(Behavior::Ack).await;
    let client = HiveAgentClient::new(&agent.base_url).unwrap();

    let chunks = vec![json!({"reading": 1}), json!({"reading": 2}), json!({"reading": 3})];
    let acks: Vec<Value> = client
        .entries()
        .stream("sensors", futures::stream::iter(chunks.clone()))
        .await
        .unwrap()
        .map(|ack| ack.unwrap())
        .collect()
        .await;

    assert_eq!(acks.len(), 3);
    for (i, ack) in acks.iter().enumerate() {
        assert_eq!(ack["seq"], i + 1);
        assert_eq!(ack["echo"], chunks[i]);
    }

    agent.finish().await;
    assert_eq!(*agent.received.lock().unwrap(), chunks);
    assert_eq!(*agent.seen_path.lock().unwrap(), "/api/entry/sensors/stream");
    assert!(agent.got_close.load(Ordering::SeqCst));
}

#[tokio::test]
async fn test_stream_with_empty_input() {
    let mut agent = spawn_agent(Behavior::Ack).await;
    let client = HiveAgentClient::new(&agent.base_url).unwrap();

    let mut acks = client
        .entries()
        .stream("sensors", futures::stream::empty::<Value>())
        .await
        .unwrap();
    assert!(acks.next().await.is_none());

    agent.finish().await;
    assert!(agent.received.lock().unwrap().is_empty());
    assert!(agent.got_close.load(Ordering::SeqCst));
}

#[tokio::test]
async fn test_stream_times_out_without_ack() {
    let mut agent = spawn_agent(Behavior::Silent).await;
    let client = HiveAgentClient::builder()
        .base_url(&agent.base_url)
        .stream_timeout(Duration::from_millis(200))
        .build()
        .unwrap();

    let chunks = futures::stream::iter(vec![json!({"n": 1}), json!({"n": 2})]);
    let results: Vec<_> = tokio::time::timeout(
        Duration::from_secs(5),
        client.entries().stream("slow", chunks).await.unwrap().collect::<Vec<_>>(),
    )
    .await
    .expect("stream should give up after the stream timeout");

    assert_eq!(results.len(), 1);
    match &results[0] {
        Err(Error::Stream(message)) => assert!(message.contains("timed out")),
        other => panic!("unexpected result: {other:?}"),
    }
    // Only the first chunk went out before giving up.
    agent.finish().await;
    assert_eq!(agent.received.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_stream_reports_dropped_connection() {
    let agent = spawn_agent(Behavior::DropAfterFirst).await;
    let client = HiveAgentClient::new(&agent.base_url).unwrap();

    let chunks = futures::stream::iter(vec![json!({"n": 1}), json!({"n": 2})]);
    let mut acks = client.entries().stream("flaky", chunks).await.unwrap();

    let first = acks.next().await.unwrap();
    assert!(matches!(first, Err(Error::WebSocket(_))), "{first:?}");
    assert!(acks.next().await.is_none());
}

#[tokio::test]
async fn test_stream_reports_early_close() {
    let agent = spawn_agent(Behavior::CloseAfterFirst).await;
    let client = HiveAgentClient::new(&agent.base_url).unwrap();

    let chunks = futures::stream::iter(vec![json!({"n": 1}), json!({"n": 2}), json!({"n": 3})]);
    let results: Vec<_> = client
        .entries()
        .stream("full", chunks)
        .await
        .unwrap()
        .collect()
        .await;

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].as_ref().unwrap()["seq"], 1);
    match &results[1] {
        Err(Error::Stream(message)) => assert!(message.contains("namespace full")),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[tokio::test]
async fn test_stream_connection_failure() {
    let client = HiveAgentClient::new("http://127.0.0.1:1").unwrap();
    let result = client
        .entries()
        .stream("sensors", futures::stream::iter(vec![json!({})]))
        .await;
    assert!(matches!(result, Err(Error::WebSocket(_))));
}
