use super::*;
use crate::routes::app;
use crate::state::test_helpers::{MockStore, claim_row, test_app_state};
use axum::body::{Body, to_bytes};
use axum::http::Request;
use serde_json::json;
use tower::ServiceExt;

async fn render(store: MockStore, uri: &str) -> (StatusCode, String) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = app(test_app_state(store)).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[test]
fn claims_query_parses_selected_id() {
    let query = |raw: Option<&str>| ClaimsQuery { claim_id: raw.map(str::to_string) };
    assert_eq!(query(Some("12")).selected_id(), Some(12));
    assert_eq!(query(Some(" 7 ")).selected_id(), Some(7));
    assert_eq!(query(Some("")).selected_id(), None);
    assert_eq!(query(Some("abc")).selected_id(), None);
    assert_eq!(query(None).selected_id(), None);
}

// =============================================================================
// Tables page
// =============================================================================

#[tokio::test]
async fn tables_page_renders_overview() {
    let store = MockStore::new()
        .with_collections(&["orders"])
        .with_rows("orders", vec![json!({ "id": 1, "total": 9.5 })]);
    let (status, html) = render(store, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("orders"));
    assert!(html.contains("(1 rows)"));
    assert!(html.contains(">9.5</td>"));
}

#[tokio::test]
async fn tables_page_shows_listing_error() {
    let store = MockStore::new().failing_listing("connection refused");
    let (status, html) = render(store, "/").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(html.contains("role=\"alert\""));
    assert!(html.contains("connection refused"));
}

// =============================================================================
// Claims page
// =============================================================================

#[tokio::test]
async fn claims_page_without_selection_lists_claims() {
    let store = MockStore::new().with_rows("claims_table", vec![claim_row(1), claim_row(2)]);
    let (status, html) = render(store, "/claims").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains(r#"href="/claims?claim_id=1""#));
    assert!(html.contains(r#"href="/claims?claim_id=2""#));
    assert!(html.contains("Select a claim to view details"));
}

#[tokio::test]
async fn claims_page_renders_selected_claim() {
    let store = MockStore::new().with_rows("claims_table", vec![claim_row(1), claim_row(2)]);
    let (status, html) = render(store, "/claims?claim_id=2").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("POL-0002"));
    assert!(html.contains("High Risk"));
    assert!(!html.contains("Select a claim to view details"));
}

#[tokio::test]
async fn claims_page_unknown_claim_is_not_found() {
    let store = MockStore::new().with_rows("claims_table", vec![claim_row(1)]);
    let (status, html) = render(store, "/claims?claim_id=9").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(html.contains("Claim not found"));
}

#[tokio::test]
async fn claims_page_store_failure_shows_error_and_empty_selector() {
    let store = MockStore::new().failing("claims_table", "permission denied for table");
    let (status, html) = render(store, "/claims?claim_id=1").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(html.contains("Error loading claim"));
    assert!(html.contains("permission denied for table"));
    assert!(html.contains("No claims available"));
}

#[tokio::test]
async fn claims_page_ignores_non_numeric_selection() {
    let store = MockStore::new().with_rows("claims_table", vec![claim_row(1)]);
    let (status, html) = render(store, "/claims?claim_id=abc").await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Select a claim to view details"));
}
