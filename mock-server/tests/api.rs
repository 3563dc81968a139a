use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{sample_records, MockPipedrive};
use serde_json::Value;
use tower::ServiceExt;

const TOKEN: &str = "secret";

fn server() -> MockPipedrive {
    MockPipedrive::new(TOKEN)
        .with_collection("deals", sample_records("deal", 7))
        .with_collection("organizations", Vec::new())
        .with_failure("filters", 500)
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes: bytes::Bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

// --- auth ---

#[tokio::test]
async fn missing_token_returns_401() {
    let resp = server().app().oneshot(get("/api/v1/deals")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["errorCode"], 401);
}

#[tokio::test]
async fn wrong_token_returns_401() {
    let resp = server()
        .app()
        .oneshot(get("/api/v1/deals?api_token=nope"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

// --- listing ---

#[tokio::test]
async fn unpaginated_request_returns_default_page() {
    let resp = server()
        .app()
        .oneshot(get(&format!("/api/v1/deals?api_token={TOKEN}")))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"].as_array().unwrap().len(), 7);
    assert_eq!(body["additional_data"]["pagination"]["more_items_in_collection"], false);
}

#[tokio::test]
async fn window_slices_collection() {
    let resp = server()
        .app()
        .oneshot(get(&format!("/api/v1/deals?start=2&limit=3&api_token={TOKEN}")))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    let ids: Vec<u64> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids, vec![3, 4, 5]);

    let pagination = &body["additional_data"]["pagination"];
    assert_eq!(pagination["more_items_in_collection"], true);
    assert_eq!(pagination["next_start"], 5);
}

#[tokio::test]
async fn limit_is_capped() {
    let big = MockPipedrive::new(TOKEN).with_collection("persons", sample_records("person", 600));
    let resp = big
        .app()
        .oneshot(get(&format!("/api/v1/persons?start=0&limit=1000&api_token={TOKEN}")))
        .await
        .unwrap();

    let body = body_json(resp).await;
    assert_eq!(body["data"].as_array().unwrap().len(), mock_server::MAX_LIMIT);
}

#[tokio::test]
async fn empty_collection_returns_null_data() {
    let resp = server()
        .app()
        .oneshot(get(&format!("/api/v1/organizations?api_token={TOKEN}")))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert!(body["data"].is_null());
}

#[tokio::test]
async fn start_past_end_returns_null_data() {
    let resp = server()
        .app()
        .oneshot(get(&format!("/api/v1/deals?start=500&limit=500&api_token={TOKEN}")))
        .await
        .unwrap();

    let body = body_json(resp).await;
    assert!(body["data"].is_null());
}

// --- failures ---

#[tokio::test]
async fn unknown_resource_returns_404() {
    let resp = server()
        .app()
        .oneshot(get(&format!("/api/v1/nothing?api_token={TOKEN}")))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn forced_failure_returns_configured_status() {
    let resp = server()
        .app()
        .oneshot(get(&format!("/api/v1/filters?api_token={TOKEN}")))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

// --- request log ---

#[tokio::test]
async fn requests_are_logged() {
    let server = server();
    let log = server.request_log();

    server
        .app()
        .oneshot(get(&format!("/api/v1/deals?start=0&limit=5&api_token={TOKEN}")))
        .await
        .unwrap();
    server
        .app()
        .oneshot(get("/api/v1/deals?api_token=wrong"))
        .await
        .unwrap();

    let log = log.read().await;
    assert_eq!(log.len(), 2);
    assert_eq!(log[0].resource, "deals");
    assert_eq!(log[0].start, Some(0));
    assert_eq!(log[0].limit, Some(5));
    assert!(log[0].authorized);
    assert!(!log[1].authorized);
}
