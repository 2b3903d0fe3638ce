use std::sync::Arc;

use serde_json::{Value, json};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use kinobot::audit::AuditStore;
use kinobot::audit::sqlite::SqliteAuditStore;
use kinobot::chat::Dispatcher;
use kinobot::chat::telegram::{Bot, TelegramClient, TelegramError};
use kinobot::consts::{GREETING, NOT_FOUND_REPLY};
use kinobot::engine::orchestrator::Orchestrator;
use kinobot::metadata::mock::MockMetadata;
use kinobot::translator::Translation;
use kinobot::translator::mock::MockTranslator;

const TOKEN: &str = "test-token";

async fn build_bot(server: &MockServer, store: Arc<SqliteAuditStore>) -> Bot {
    let engine = Orchestrator::new(
        Translation::new(Arc::new(MockTranslator::new()), "ru"),
        Arc::new(MockMetadata::new()),
        store,
    );
    let dispatcher = Arc::new(Dispatcher::new(Arc::new(engine)));
    let client = Arc::new(TelegramClient::with_base_url(server.uri(), TOKEN));
    Bot::new(client, dispatcher).with_poll_timeout(0)
}

fn text_update(update_id: i64, chat_id: i64, message_id: i64, text: &str) -> Value {
    json!({
        "update_id": update_id,
        "message": {
            "message_id": message_id,
            "date": 1700000000,
            "chat": {"id": chat_id, "type": "private"},
            "from": {"id": chat_id, "is_bot": false, "first_name": "U"},
            "text": text
        }
    })
}

#[tokio::test]
async fn poll_dispatches_start_and_search() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(SqliteAuditStore::new(dir.path().join("moviebot.db")));
    store.initialize().await.unwrap();

    Mock::given(method("POST"))
        .and(path(format!("/bot{TOKEN}/getUpdates")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "result": [
                text_update(10, 1, 100, "/start"),
                text_update(11, 2, 200, "zzxxqqnosuchfilm"),
                text_update(12, 3, 300, "/help"),
                {
                    "update_id": 13,
                    "message": {"message_id": 400, "chat": {"id": 4}, "sticker": {"file_id": "x"}}
                },
                {"update_id": 14, "edited_message": {"message_id": 500, "chat": {"id": 5}}}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(format!("/bot{TOKEN}/sendMessage")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "result": {"message_id": 1, "chat": {"id": 1}, "date": 1700000001}
        })))
        .expect(2)
        .mount(&server)
        .await;

    let bot = build_bot(&server, store.clone()).await;
    let mut offset = None;
    let handles = bot.poll_once(&mut offset).await.unwrap();
    assert_eq!(offset, Some(15));
    for handle in handles {
        handle.await.unwrap();
    }

    let sent: Vec<Value> = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|r| r.url.path().ends_with("/sendMessage"))
        .map(|r| r.body_json::<Value>().unwrap())
        .collect();
    assert_eq!(sent.len(), 2);

    let greeting = sent.iter().find(|b| b["chat_id"] == 1).unwrap();
    assert_eq!(greeting["text"], GREETING);
    assert_eq!(greeting["parse_mode"], "HTML");
    assert_eq!(greeting["reply_parameters"]["message_id"], 100);

    let not_found = sent.iter().find(|b| b["chat_id"] == 2).unwrap();
    assert_eq!(not_found["text"], NOT_FOUND_REPLY);

    // Only the search was audited.
    let records = store.recent(10).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].query, "zzxxqqnosuchfilm");
}

#[tokio::test]
async fn poll_passes_offset_and_timeout() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(SqliteAuditStore::new(dir.path().join("moviebot.db")));
    store.initialize().await.unwrap();

    Mock::given(method("POST"))
        .and(path(format!("/bot{TOKEN}/getUpdates")))
        .and(body_partial_json(json!({"offset": 42, "timeout": 0})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true, "result": []})))
        .expect(1)
        .mount(&server)
        .await;

    let bot = build_bot(&server, store).await;
    let mut offset = Some(42);
    let handles = bot.poll_once(&mut offset).await.unwrap();
    assert!(handles.is_empty());
    assert_eq!(offset, Some(42));
}

#[tokio::test]
async fn api_error_carries_description() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "ok": false,
            "error_code": 401,
            "description": "Unauthorized"
        })))
        .mount(&server)
        .await;

    let client = TelegramClient::with_base_url(server.uri(), TOKEN);
    let err = client.get_updates(None, 0).await.unwrap_err();
    match err {
        TelegramError::Api {
            method,
            description,
        } => {
            assert_eq!(method, "getUpdates");
            assert_eq!(description, "Unauthorized");
        }
        other => panic!("expected Api, got {other:?}"),
    }
}

#[tokio::test]
async fn garbage_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let client = TelegramClient::with_base_url(server.uri(), TOKEN);
    let err = client.send_message(1, "hi", None).await.unwrap_err();
    assert!(matches!(err, TelegramError::Decode { .. }));
}

#[tokio::test]
async fn failed_send_does_not_break_polling() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(SqliteAuditStore::new(dir.path().join("moviebot.db")));
    store.initialize().await.unwrap();

    Mock::given(method("POST"))
        .and(path(format!("/bot{TOKEN}/getUpdates")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "result": [text_update(1, 7, 70, "/start")]
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(format!("/bot{TOKEN}/sendMessage")))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "ok": false,
            "error_code": 403,
            "description": "Forbidden: bot was blocked by the user"
        })))
        .mount(&server)
        .await;

    let bot = build_bot(&server, store).await;
    let mut offset = None;
    for handle in bot.poll_once(&mut offset).await.unwrap() {
        handle.await.unwrap();
    }
    assert_eq!(offset, Some(2));

    // The next round still works.
    assert!(bot.poll_once(&mut offset).await.is_ok());
}
