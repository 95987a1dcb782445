//! Integration tests for the HTTP note store against a mock server.

use chrono::{TimeZone, Utc};
use simplenotes_client::{ClientConfig, Error, HttpNoteStore, NewNote, NoteId, NoteStore, NoteTag};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn store_for(server: &MockServer) -> HttpNoteStore {
    let config = ClientConfig::default()
        .with_base_url(server.uri())
        .with_timeout_seconds(5)
        .with_retry_delay_ms(0);
    HttpNoteStore::new(config).expect("Failed to create store")
}

fn sample_notes() -> serde_json::Value {
    serde_json::json!([
        {
            "id": 1,
            "title": "Groceries",
            "content": "milk, eggs",
            "tag": "personal",
            "date": "2024-01-01T00:00:00Z"
        },
        {
            "id": 2,
            "title": "Launch plan",
            "content": "ship v2",
            "tag": "work",
            "date": "2024-01-02T00:00:00Z"
        }
    ])
}

fn launch_plan() -> NewNote {
    NewNote::new(
        "Launch plan",
        "ship v2",
        NoteTag::Work,
        Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap(),
    )
    .unwrap()
}

#[tokio::test]
async fn test_list_notes_parses_collection_in_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/notes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_notes()))
        .expect(1)
        .mount(&server)
        .await;

    let notes = store_for(&server).list_notes().await.unwrap();

    assert_eq!(notes.len(), 2);
    assert_eq!(notes[0].id, NoteId::Number(1));
    assert_eq!(notes[0].title, "Groceries");
    assert_eq!(notes[1].tag, NoteTag::Work);
}

#[tokio::test]
async fn test_list_notes_empty_collection() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/notes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let notes = store_for(&server).list_notes().await.unwrap();
    assert!(notes.is_empty());
}

#[tokio::test]
async fn test_create_note_posts_wire_payload() {
    let server = MockServer::start().await;
    let expected_body = serde_json::json!({
        "title": "Launch plan",
        "content": "ship v2",
        "tag": "work",
        "date": "2024-01-02T00:00:00.000Z"
    });
    let echoed = serde_json::json!({
        "id": 9,
        "title": "Launch plan",
        "content": "ship v2",
        "tag": "work",
        "date": "2024-01-02T00:00:00.000Z"
    });
    Mock::given(method("POST"))
        .and(path("/api/notes"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(&expected_body))
        .respond_with(ResponseTemplate::new(200).set_body_json(&echoed))
        .expect(1)
        .mount(&server)
        .await;

    let saved = store_for(&server)
        .create_note(&launch_plan())
        .await
        .unwrap()
        .expect("server echoed the note");

    assert_eq!(saved.id, NoteId::Number(9));
    assert_eq!(saved.title, "Launch plan");
}

#[tokio::test]
async fn test_create_note_with_empty_body_succeeds() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/notes"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let saved = store_for(&server).create_note(&launch_plan()).await.unwrap();
    assert!(saved.is_none());
}

#[tokio::test]
async fn test_create_note_server_error_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/notes"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&server)
        .await;

    let err = store_for(&server)
        .create_note(&launch_plan())
        .await
        .unwrap_err();

    match err {
        Error::Status { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "boom");
        }
        other => panic!("Expected Status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_delete_note_targets_id_path() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/notes/2"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    store_for(&server)
        .delete_note(&NoteId::Number(2))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_delete_note_not_found_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/notes/404"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let err = store_for(&server)
        .delete_note(&NoteId::Number(404))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Status { status: 404, .. }));
    assert!(err.is_transport());
}

#[tokio::test]
async fn test_list_notes_retries_once_after_transient_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/notes"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/notes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_notes()))
        .expect(1)
        .mount(&server)
        .await;

    let notes = store_for(&server).list_notes().await.unwrap();
    assert_eq!(notes.len(), 2);
}

#[tokio::test]
async fn test_list_notes_gives_up_after_retry_budget() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/notes"))
        .respond_with(ResponseTemplate::new(502))
        .expect(2)
        .mount(&server)
        .await;

    let err = store_for(&server).list_notes().await.unwrap_err();
    assert!(matches!(err, Error::Status { status: 502, .. }));
}

#[tokio::test]
async fn test_list_notes_without_retries() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/notes"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let config = ClientConfig::default()
        .with_base_url(server.uri())
        .with_max_retries(0);
    let store = HttpNoteStore::new(config).unwrap();

    assert!(store.list_notes().await.is_err());
}

#[tokio::test]
async fn test_list_notes_malformed_json_is_serialization_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/notes"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let err = store_for(&server).list_notes().await.unwrap_err();
    assert!(matches!(err, Error::Serialization(_)));
    assert!(err.is_transport());
}

#[tokio::test]
async fn test_unreachable_server_is_transport_error() {
    // Nothing listens on port 1
    let config = ClientConfig::default()
        .with_base_url("http://127.0.0.1:1")
        .with_timeout_seconds(2)
        .with_retry_delay_ms(0);
    let store = HttpNoteStore::new(config).unwrap();

    let err = store.list_notes().await.unwrap_err();
    assert!(err.is_transport());
    assert!(!store.health_check().await);
}

#[tokio::test]
async fn test_health_check_reports_reachable_server() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/notes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    assert!(store_for(&server).health_check().await);
}

#[tokio::test]
async fn test_health_check_reports_failing_server() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/notes"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    assert!(!store_for(&server).health_check().await);
}

#[tokio::test]
async fn test_list_notes_tolerates_odd_records() {
    let server = MockServer::start().await;
    let mixed = serde_json::json!([
        {
            "id": 1,
            "title": "Groceries",
            "content": "milk, eggs",
            "tag": "personal",
            "date": "2024-01-01T00:00:00Z"
        },
        {
            "id": 2,
            "title": "Imported",
            "content": "from the old app",
            "tag": null,
            "date": "2024-01-01T00:00:00.123"
        },
        {
            "id": 3,
            "title": "Undated",
            "content": "no timestamp",
            "tag": "urgent",
            "date": "sometime"
        }
    ]);
    Mock::given(method("GET"))
        .and(path("/api/notes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(mixed))
        .expect(1)
        .mount(&server)
        .await;

    let notes = store_for(&server).list_notes().await.unwrap();

    assert_eq!(notes.len(), 3);
    assert_eq!(notes[0].tag, NoteTag::Personal);
    assert!(!notes[1].tag.is_known());
    assert!(notes[1].date.is_some());
    assert_eq!(notes[2].tag, NoteTag::Unrecognized("urgent".to_string()));
    assert_eq!(notes[2].date, None);
}

#[tokio::test]
async fn test_create_note_timeout_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/notes"))
        .respond_with(ResponseTemplate::new(200).set_delay(std::time::Duration::from_secs(3)))
        .expect(1)
        .mount(&server)
        .await;

    let config = ClientConfig::default()
        .with_base_url(server.uri())
        .with_timeout_seconds(1)
        .with_retry_delay_ms(0);
    let err = HttpNoteStore::new(config)
        .unwrap()
        .create_note(&launch_plan())
        .await
        .unwrap_err();

    // the server may have stored it, so the request is sent once
    assert!(matches!(err, Error::Request(_)));
}

#[tokio::test]
async fn test_create_note_retries_when_connection_refused() {
    // Nothing listens on port 1; the retry delay shows whether a second
    // attempt was made.
    let delay_ms = 400;
    let config = ClientConfig::default()
        .with_base_url("http://127.0.0.1:1")
        .with_timeout_seconds(2)
        .with_retry_delay_ms(delay_ms);

    let start = std::time::Instant::now();
    let err = HttpNoteStore::new(config.clone())
        .unwrap()
        .create_note(&launch_plan())
        .await
        .unwrap_err();
    assert!(err.is_connect());
    assert!(start.elapsed() >= std::time::Duration::from_millis(delay_ms));

    let start = std::time::Instant::now();
    let err = HttpNoteStore::new(config.with_max_retries(0))
        .unwrap()
        .create_note(&launch_plan())
        .await
        .unwrap_err();
    assert!(err.is_connect());
    assert!(start.elapsed() < std::time::Duration::from_millis(delay_ms));
}
