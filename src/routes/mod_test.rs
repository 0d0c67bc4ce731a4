use super::*;
use crate::state::test_helpers::{MockStore, test_app_state};
use axum::body::Body;
use axum::http::Request;
use tower::ServiceExt;

#[tokio::test]
async fn healthz_returns_ok() {
    let app = app(test_app_state(MockStore::new()));
    let response = app
        .oneshot(Request::builder().uri("/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let app = app(test_app_state(MockStore::new()));
    let response = app
        .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let app = app(test_app_state(MockStore::new()));
    let response = app
        .oneshot(
            Request::builder()
                .uri("/healthz")
                .header("origin", "https://elsewhere.test")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.headers().get("access-control-allow-origin").unwrap(), "*");
}
