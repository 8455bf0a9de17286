mod common;

use httpmock::Method::POST;
use httpmock::MockServer;
use serde_json::json;

use card_forge::domains::card::CardRecord;
use card_forge::domains::conversation::Role;
use card_forge::error::CardForgeError;
use card_forge::providers::openai::OpenAiProvider;
use card_forge::services::session::Session;

use common::{card_json, QueueGenerator};

#[tokio::test]
async fn exchanges_grow_the_session_two_messages_at_a_time() {
    let generator = QueueGenerator::new(vec![
        Ok(card_json("Grove Tender")),
        Ok(card_json("Moss Caller")),
        Ok(card_json("Root Speaker")),
    ]);
    let mut session = Session::default();
    let initial = session.len();

    for prompt in ["an elf", "a druid", "a shaman"] {
        session.exchange(&generator, prompt).await.unwrap();
    }

    assert_eq!(session.len(), initial + 6);
    assert_eq!(generator.seen_lengths(), vec![initial + 1, initial + 3, initial + 5]);

    let tail = &session.messages()[initial..];
    assert_eq!(tail[0].role, Role::User);
    assert_eq!(tail[0].content, "an elf");
    assert_eq!(tail[1].role, Role::Assistant);
    assert_eq!(CardRecord::parse(&tail[1].content).unwrap().name, "Grove Tender");
    assert_eq!(tail[4].content, "a shaman");
    assert_eq!(CardRecord::parse(&tail[5].content).unwrap().name, "Root Speaker");
}

#[tokio::test]
async fn failed_exchange_leaves_session_untouched() {
    let generator = QueueGenerator::new(vec![Err(CardForgeError::Http("offline".to_string()))]);
    let mut session = Session::default();
    let before = session.clone();

    let err = session.exchange(&generator, "a dragon").await.unwrap_err();
    assert!(matches!(err, CardForgeError::Http(_)));
    assert_eq!(session, before);
}

#[tokio::test]
async fn openai_provider_sends_whole_conversation() {
    let server = MockServer::start_async().await;
    let chat_mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/chat/completions")
                .header("authorization", "Bearer sk-test")
                .body_includes("\"model\":\"gpt-4o-mini\"")
                .body_includes("a moss golem");
            then.status(200).json_body(json!({
                "id": "chatcmpl-card",
                "object": "chat.completion",
                "created": 1,
                "model": "gpt-4o-mini",
                "choices": [{
                    "index": 0,
                    "message": {"role": "assistant", "content": card_json("Moss Golem")},
                    "finish_reason": "stop"
                }]
            }));
        })
        .await;

    let provider = OpenAiProvider::new(
        "sk-test".to_string(),
        Some("gpt-4o-mini".to_string()),
        Some(server.base_url()),
    );
    let mut session = Session::default();
    let reply = session.exchange(&provider, "a moss golem").await.unwrap();

    chat_mock.assert_calls(1);
    assert_eq!(CardRecord::parse(&reply).unwrap().name, "Moss Golem");
    assert_eq!(session.len(), 5);
}

#[tokio::test]
async fn auth_failure_surfaces_as_http_error() {
    let server = MockServer::start_async().await;
    let chat_mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(401)
                .json_body(json!({"error": {"message": "Incorrect API key provided"}}));
        })
        .await;

    let provider = OpenAiProvider::new("bad".to_string(), None, Some(server.base_url()));
    let mut session = Session::default();
    let err = session.exchange(&provider, "a dragon").await.unwrap_err();

    chat_mock.assert_calls(1);
    match err {
        CardForgeError::Http(message) => assert!(message.contains("401")),
        other => panic!("expected http error, got {other:?}"),
    }
    assert_eq!(session.len(), 3);
}

#[tokio::test]
async fn prose_reply_is_returned_then_rejected_by_parser() {
    let generator = QueueGenerator::new(vec![Ok("Here is a fun card idea!".to_string())]);
    let mut session = Session::default();

    let reply = session.exchange(&generator, "a dragon").await.unwrap();
    assert_eq!(session.len(), 5);
    assert!(matches!(
        CardRecord::parse(&reply),
        Err(CardForgeError::MalformedReply(_))
    ));
}
