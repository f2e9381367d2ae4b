//! Chat API tests against a mock agent.

use std::io::Write;

use hive_agent_client::{Attachment, ChatRequest, Error, HiveAgentClient};
use serde_json::json;
use wiremock::matchers::{body_json, body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_message_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(body_json(json!({
            "messages": [{"role": "user", "content": "Hello"}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string("Response from chat"))
        .expect(1)
        .mount(&server)
        .await;

    let client = HiveAgentClient::new(server.uri()).unwrap();
    let reply = client.chat().message("Hello").await.unwrap();
    assert_eq!(reply, "Response from chat");
}

#[tokio::test]
async fn test_message_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(400).set_body_string("Bad request"))
        .mount(&server)
        .await;

    let client = HiveAgentClient::new(server.uri()).unwrap();
    let err = client.chat().message("Hello").await.unwrap_err();
    match err {
        Error::Api { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "Bad request");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_empty_content_is_rejected_without_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = HiveAgentClient::new(server.uri()).unwrap();

    let err = client.chat().message("   ").await.unwrap_err();
    assert!(matches!(err, Error::InvalidInput(ref m) if m == "Content must not be empty"));

    let err = client
        .chat()
        .send(ChatRequest::new("user123", "session123", ""))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));
}

#[tokio::test]
async fn test_send_in_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/chat"))
        .and(body_string_contains("name=\"user_id\""))
        .and(body_string_contains("user123"))
        .and(body_string_contains("name=\"session_id\""))
        .and(body_string_contains("session123"))
        .and(body_string_contains("name=\"chat_data\""))
        .and(body_string_contains(
            r#"{"messages":[{"role":"user","content":"Hello, how are you?"}]}"#,
        ))
        .respond_with(ResponseTemplate::new(200).set_body_string("Hello, world!"))
        .expect(1)
        .mount(&server)
        .await;

    let client = HiveAgentClient::new(format!("{}/api/v1", server.uri())).unwrap();
    let reply = client
        .chat()
        .send(ChatRequest::new("user123", "session123", "Hello, how are you?"))
        .await
        .unwrap();
    assert_eq!(reply, "Hello, world!");
}

#[tokio::test]
async fn test_send_with_attachments() {
    let dir = tempfile::tempdir().unwrap();
    let file_path = dir.path().join("test1.txt");
    let mut file = std::fs::File::create(&file_path).unwrap();
    file.write_all(b"test content").unwrap();

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .and(body_string_contains(
            r#"name="files"; filename="test1.txt""#,
        ))
        .and(body_string_contains("test content"))
        .and(body_string_contains(
            r#"name="files"; filename="image.png""#,
        ))
        .and(body_string_contains("image/png"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Files uploaded!"))
        .expect(1)
        .mount(&server)
        .await;

    let client = HiveAgentClient::new(server.uri()).unwrap();
    let request = ChatRequest::new("user123", "session123", "Check out these files")
        .with_file(file_path.clone())
        .with_file(Attachment::Bytes {
            file_name: "image.png".to_string(),
            mime_type: None,
            data: b"fake png data".to_vec(),
        });

    let reply = client.chat().send(request).await.unwrap();
    assert_eq!(reply, "Files uploaded!");
}

#[tokio::test]
async fn test_send_with_missing_attachment() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = HiveAgentClient::new(server.uri()).unwrap();
    let request =
        ChatRequest::new("user123", "session123", "see attached").with_file("/no/such/file.txt");
    let err = client.chat().send(request).await.unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[tokio::test]
async fn test_history() {
    let server = MockServer::start().await;
    let history = json!([
        {
            "user_id": "user123",
            "session_id": "session123",
            "message": "Hello",
            "role": "user",
            "timestamp": "2023-01-01T00:00:00Z"
        },
        {
            "user_id": "user123",
            "session_id": "session123",
            "message": "Hi there",
            "role": "assistant",
            "timestamp": "2023-01-01T00:00:01Z"
        }
    ]);
    Mock::given(method("GET"))
        .and(path("/chat_history"))
        .and(query_param("user_id", "user123"))
        .and(query_param("session_id", "session123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(history))
        .expect(1)
        .mount(&server)
        .await;

    let client = HiveAgentClient::new(server.uri()).unwrap();
    let messages = client.chat().history("user123", "session123").await.unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].message, "Hello");
    assert_eq!(messages[1].role, "assistant");
    assert_eq!(messages[1].session_id.as_deref(), Some("session123"));
}

#[tokio::test]
async fn test_history_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/chat_history"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"detail": "Bad request"})))
        .mount(&server)
        .await;

    let client = HiveAgentClient::new(server.uri()).unwrap();
    let err = client.chat().history("user123", "session123").await.unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert_eq!(err.to_string(), "API error (400): Bad request");
}

#[tokio::test]
async fn test_all_chats() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/all_chats"))
        .and(query_param("user_id", "user123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "session1": [
                {"message": "Hello in session1", "role": "USER", "timestamp": "2023-01-01T00:00:00Z"},
                {"message": "Response in session1", "role": "ASSISTANT", "timestamp": "2023-01-01T00:00:01Z"}
            ],
            "session2": [
                {"message": "Hello in session2", "role": "USER", "timestamp": "2023-01-01T00:00:02Z"}
            ]
        })))
        .mount(&server)
        .await;

    let client = HiveAgentClient::new(server.uri()).unwrap();
    let chats = client.chat().all_chats("user123").await.unwrap();
    assert_eq!(chats.len(), 2);
    assert_eq!(chats["session1"].len(), 2);
    assert_eq!(chats["session2"][0].message, "Hello in session2");
}
