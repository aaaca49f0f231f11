use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::Duration,
};

use axum::{
    Router,
    extract::{Query, State},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::get,
};
use engine::{
    FormInput, HttpQrApi, Pipeline, Presenter, RequestResult, RequestState,
    result::GENERATION_FAILED,
};

const PNG: &[u8] = b"\x89PNG\r\n\x1a\nnot-really-a-png";

type Seen = Arc<Mutex<Vec<HashMap<String, String>>>>;

async fn image(
    State(seen): State<Seen>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    let reject = params.get("amount").map(String::as_str) == Some("999");
    seen.lock().unwrap().push(params);

    if reject {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            [(header::CONTENT_TYPE, "application/json")],
            br#"{"errors":[{"description":"Invalid currency"}]}"#.to_vec(),
        );
    }
    (StatusCode::OK, [(header::CONTENT_TYPE, "image/png")], PNG.to_vec())
}

async fn spawn_generator() -> (String, Seen) {
    let seen = Seen::default();
    let router = Router::new()
        .route("/image", get(image))
        .with_state(Arc::clone(&seen));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    (format!("http://{addr}/image"), seen)
}

fn form(account: &str, amount: &str, message: &str) -> FormInput {
    FormInput {
        account: account.to_string(),
        amount: amount.to_string(),
        message: message.to_string(),
    }
}

async fn settle(url: &str, input: FormInput) -> RequestResult {
    let api = Arc::new(HttpQrApi::new(url, Some(Duration::from_secs(5))).unwrap());
    let (mut pipeline, mut results) = Pipeline::new(api, Duration::from_millis(10));

    pipeline.on_input(&input);
    assert_eq!(results.next().await, Some(RequestResult::Loading));
    results.next().await.unwrap()
}

#[tokio::test]
async fn success_carries_the_exact_body() {
    let (url, seen) = spawn_generator().await;

    let result = settle(&url, form("123456-7890123456/0100", "150.50", "najem")).await;
    assert_eq!(result.state(), RequestState::Success);
    let payload = result.payload().unwrap();
    assert_eq!(payload.bytes(), PNG);
    assert_eq!(payload.content_type(), Some("image/png"));

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    let query = &seen[0];
    assert_eq!(query["accountPrefix"], "123456");
    assert_eq!(query["accountNumber"], "7890123456");
    assert_eq!(query["bankCode"], "0100");
    assert_eq!(query["amount"], "150.50");
    assert_eq!(query["currency"], "CZK");
    assert_eq!(query["message"], "najem");
    assert_eq!(query["branding"], "false");
}

#[tokio::test]
async fn prefix_is_omitted_when_absent() {
    let (url, seen) = spawn_generator().await;

    let result = settle(&url, form("7890123456/0100", "150.50", "")).await;
    assert!(result.payload().is_some());

    let seen = seen.lock().unwrap();
    assert!(!seen[0].contains_key("accountPrefix"));
    assert_eq!(seen[0]["bankCode"], "0100");
    assert_eq!(seen[0]["amount"], "150.50");
}

#[tokio::test]
async fn server_descriptions_reach_the_generic_message() {
    let (url, _) = spawn_generator().await;

    let result = settle(&url, form("7890123456/0100", "999", "")).await;
    let errors = result.errors().unwrap();
    assert_eq!(
        errors.generic.as_deref(),
        Some("QR kód se nepodařilo vygenerovat. Invalid currency")
    );
    assert_eq!(errors.fields.account, None);
    assert_eq!(errors.fields.amount, None);
}

#[tokio::test]
async fn invalid_account_makes_no_request() {
    let (url, seen) = spawn_generator().await;

    let result = settle(&url, form("badaccount", "150", "")).await;
    let errors = result.errors().unwrap();
    assert_eq!(errors.fields.account.as_deref(), Some("Neplatné číslo účtu"));
    assert!(errors.generic.is_some());
    assert!(seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn unreachable_generator_fails_gracefully() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let result = settle(&format!("http://{addr}/image"), form("7890123456/0100", "10", "")).await;
    assert_eq!(
        result.errors().and_then(|e| e.generic.as_deref()),
        Some(GENERATION_FAILED)
    );
}

#[tokio::test]
async fn presenter_shows_the_served_image() {
    let (url, _) = spawn_generator().await;
    let dir = tempfile::tempdir().unwrap();
    let mut presenter = Presenter::new(dir.path());

    let first = settle(&url, form("7890123456/0100", "10", "")).await;
    presenter.apply(first).unwrap();
    let first_path = presenter.image_path().unwrap().to_path_buf();
    assert_eq!(std::fs::read(&first_path).unwrap(), PNG);

    let second = settle(&url, form("7890123456/0100", "999", "")).await;
    presenter.apply(second).unwrap();
    assert!(!first_path.exists());
    assert!(presenter.image().is_none());
}
