use mockito::{Matcher, Server};
use portfolio_lib::catalog::{self, NOTICE_CONNECTION_FAILED, NOTICE_STORE_UNAVAILABLE};
use portfolio_lib::config::StoreConfig;
use portfolio_lib::contact::{ContactController, StoreMessageSender, MSG_SEND_FAILED, MSG_SENT};
use portfolio_lib::error::PortfolioError;
use portfolio_lib::models::{ContactField, ContactSubmission, StatusKind};
use portfolio_lib::services::store::RestStore;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

const KEY: &str = "anon-key";

fn store_for(url: String) -> RestStore {
    let config = StoreConfig {
        url: Some(url),
        anon_key: Some(KEY.to_string()),
        timeout_secs: 5,
        ..StoreConfig::default()
    };
    RestStore::new(&config).unwrap()
}

fn rows() -> serde_json::Value {
    json!([
        {
            "id": "b7",
            "title": "Featured thing",
            "summary": "Shown first",
            "tags": ["Rust", "Tauri"],
            "year": 2025,
            "image_url": "/projects/b7.png",
            "demo_url": "https://demo.example.com",
            "source_url": null,
            "featured": true,
            "created_at": "2025-01-10T08:00:00+00:00",
            "updated_at": "2025-02-01T08:00:00+00:00"
        },
        {
            "id": "a1",
            "title": "Older thing",
            "summary": "Shown second",
            "tags": [],
            "year": 2021,
            "image_url": "/projects/a1.png",
            "demo_url": null,
            "source_url": "https://github.com/example/a1",
            "featured": false,
            "created_at": "2021-03-01T00:00:00Z",
            "updated_at": "2021-03-02T00:00:00Z"
        }
    ])
}

#[tokio::test]
async fn fetch_sends_ordered_query_with_credentials() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/rest/v1/projects")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("select".into(), "*".into()),
            Matcher::UrlEncoded("order".into(), "featured.desc,year.desc".into()),
        ]))
        .match_header("apikey", KEY)
        .match_header("authorization", "Bearer anon-key")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(rows().to_string())
        .create_async()
        .await;

    let store = store_for(server.url());
    let state = catalog::load_projects(&store).await;

    mock.assert_async().await;
    assert!(!state.loading);
    assert_eq!(state.error, None);
    let ids: Vec<_> = state.projects.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["b7", "a1"]);
    assert_eq!(state.projects[0].tags, vec!["Rust", "Tauri"]);
    assert_eq!(state.projects[0].demo_url.as_deref(), Some("https://demo.example.com"));
    assert_eq!(state.projects[1].source_url.as_deref(), Some("https://github.com/example/a1"));
    assert_eq!(catalog::featured(&state.projects).len(), 1);
}

#[tokio::test]
async fn empty_table_is_accepted() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/rest/v1/projects")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .create_async()
        .await;

    let state = catalog::load_projects(&store_for(server.url())).await;
    assert!(!state.loading);
    assert!(state.projects.is_empty());
    assert_eq!(state.error, None);
}

#[tokio::test]
async fn error_response_falls_back_with_notice() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/rest/v1/projects")
        .match_query(Matcher::Any)
        .with_status(404)
        .with_header("content-type", "application/json")
        .with_body(r#"{"code":"42P01","message":"relation \"public.projects\" does not exist"}"#)
        .create_async()
        .await;

    let store = store_for(server.url());
    let err = store.fetch_projects().await.unwrap_err();
    assert_eq!(
        err,
        PortfolioError::Remote {
            status: 404,
            reason: "relation \"public.projects\" does not exist".to_string()
        }
    );

    let state = catalog::load_projects(&store).await;
    assert!(!state.loading);
    assert_eq!(state.projects, catalog::fallback_projects());
    assert_eq!(state.error.as_deref(), Some(NOTICE_STORE_UNAVAILABLE));
}

#[tokio::test]
async fn malformed_body_falls_back_with_notice() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/rest/v1/projects")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"id": 1}]"#)
        .expect(2)
        .create_async()
        .await;

    let store = store_for(server.url());
    assert!(matches!(store.fetch_projects().await, Err(PortfolioError::Parse { .. })));

    let state = catalog::load_projects(&store).await;
    assert_eq!(state.projects, catalog::fallback_projects());
    assert_eq!(state.error.as_deref(), Some(NOTICE_CONNECTION_FAILED));
}

#[tokio::test]
async fn null_body_falls_back() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/rest/v1/projects")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("null")
        .create_async()
        .await;

    let state = catalog::load_projects(&store_for(server.url())).await;
    assert!(!state.loading);
    assert_eq!(state.projects, catalog::fallback_projects());
    assert!(state.error.is_some());
}

#[tokio::test]
async fn unreachable_store_falls_back() {
    let store = store_for("http://127.0.0.1:1".to_string());
    let state = catalog::load_projects(&store).await;
    assert!(!state.loading);
    assert_eq!(state.projects, catalog::fallback_projects());
    assert_eq!(state.error.as_deref(), Some(NOTICE_CONNECTION_FAILED));
}

#[tokio::test]
async fn insert_message_posts_row() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/rest/v1/messages")
        .match_header("apikey", KEY)
        .match_header("prefer", "return=minimal")
        .match_body(Matcher::PartialJson(json!({
            "name": "Jo",
            "email": "jo@example.com",
            "message": "hello"
        })))
        .with_status(201)
        .create_async()
        .await;

    let submission = ContactSubmission {
        id: uuid::Uuid::new_v4(),
        name: "Jo".into(),
        email: "jo@example.com".into(),
        message: "hello".into(),
    };
    store_for(server.url()).insert_message(&submission).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn store_delivery_through_controller() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/rest/v1/messages")
        .with_status(201)
        .create_async()
        .await;

    let sender = Arc::new(StoreMessageSender::new(Arc::new(store_for(server.url()))));
    let controller = ContactController::new(sender, Duration::from_secs(5));
    controller.set_field(ContactField::Name, "Jo");
    controller.set_field(ContactField::Email, "jo@example.com");
    controller.set_field(ContactField::Message, "hello");

    let status = controller.submit().await;
    assert_eq!(status.kind, StatusKind::Success);
    assert_eq!(status.message, MSG_SENT);
    assert!(controller.view().name.is_empty());
}

#[tokio::test]
async fn store_delivery_failure_keeps_fields() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/rest/v1/messages")
        .with_status(500)
        .with_body("boom")
        .create_async()
        .await;

    let sender = Arc::new(StoreMessageSender::new(Arc::new(store_for(server.url()))));
    let controller = ContactController::new(sender, Duration::from_secs(5));
    controller.set_field(ContactField::Name, "Jo");
    controller.set_field(ContactField::Email, "jo@example.com");
    controller.set_field(ContactField::Message, "hello");

    let status = controller.submit().await;
    assert_eq!(status.kind, StatusKind::Error);
    assert_eq!(status.message, MSG_SEND_FAILED);
    let view = controller.view();
    assert_eq!(view.name, "Jo");
    assert_eq!(view.email, "jo@example.com");
    assert_eq!(view.message, "hello");
}
