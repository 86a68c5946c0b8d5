//! Route tests: the router is driven in-process against a mock commerce API.

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{header as header_eq, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use woodie_data::{ApiConfig, CommerceClient, RetryPolicy};
use woodie_proxy::{router, ProxyState};

fn state_for(uri: impl Into<String>) -> ProxyState {
    let config = ApiConfig::new(uri)
        .with_store_id("0000130")
        .with_retry(RetryPolicy::none());
    ProxyState::new(CommerceClient::new(config).expect("client"))
}

/// State pointing at a port nothing listens on.
fn unreachable_state() -> ProxyState {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let uri = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);
    state_for(uri)
}

async fn get(state: ProxyState, uri: &str) -> Response {
    router(state)
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_products_relays_upstream() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/product/website"))
        .and(query_param("page", "2"))
        .and(query_param("limit", "8"))
        .and(header_eq("store-id", "0000130"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": { "data": [] } })))
        .expect(1)
        .mount(&server)
        .await;

    let response = get(state_for(server.uri()), "/api/products?page=2&limit=8").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/json"
    );
    assert_eq!(body_json(response).await, json!({ "data": { "data": [] } }));
}

#[tokio::test]
async fn test_products_drops_empty_params() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/product/website"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .mount(&server)
        .await;

    let response = get(state_for(server.uri()), "/api/products?page=&limit=5").await;
    assert_eq!(response.status(), StatusCode::OK);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.query(), Some("limit=5"));
}

#[tokio::test]
async fn test_upstream_status_passes_through() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/category/website/0000130"))
        .respond_with(
            ResponseTemplate::new(404)
                .insert_header("content-type", "text/plain")
                .set_body_string("no store"),
        )
        .mount(&server)
        .await;

    let response = get(state_for(server.uri()), "/api/categories").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "text/plain");
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"no store");
}

#[tokio::test]
async fn test_banner_forwards_fixed_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/banner/website"))
        .and(query_param("status", "active"))
        .and(query_param("sort", "position"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let response = get(state_for(server.uri()), "/api/banner").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_unreachable_upstream_failure_bodies() {
    let cases = [
        ("/api/products", "Products fetch failed"),
        ("/api/categories", "Categories fetch failed"),
        ("/api/banner", "Banner fetch failed"),
    ];
    for (uri, message) in cases {
        let response = get(unreachable_state(), uri).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR, "{uri}");
        assert_eq!(
            body_json(response).await,
            json!({ "success": false, "message": message })
        );
    }
}

#[tokio::test]
async fn test_product_path_missing_id() {
    for uri in ["/api/product/path", "/api/product/path/", "/api/product/path/%20"] {
        let response = get(unreachable_state(), uri).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(
            body_json(response).await,
            json!({
                "status": "false",
                "message": "Missing id",
                "errorMessages": [{ "message": "Missing id", "path": "id" }]
            })
        );
    }
}

#[tokio::test]
async fn test_product_path_relays_json_with_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/product/path/walnut-bowl"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "Not found" })))
        .expect(1)
        .mount(&server)
        .await;

    let response = get(state_for(server.uri()), "/api/product/path/walnut-bowl/").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await, json!({ "message": "Not found" }));
}

#[tokio::test]
async fn test_product_path_non_json_is_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/product/path/walnut-bowl"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let response = get(state_for(server.uri()), "/api/product/path/walnut-bowl").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["status"], "false");
    assert_eq!(body["message"], "Server error");
    assert_eq!(body["errorMessages"][0]["path"], "");
}

#[tokio::test]
async fn test_product_path_unreachable_is_server_error() {
    let response = get(unreachable_state(), "/api/product/path/walnut-bowl").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Server error");
}

#[tokio::test]
async fn test_healthz() {
    let response = get(unreachable_state(), "/healthz").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "status": "ok" }));
}
