use super::*;
use crate::store::config::StoreTimeouts;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

fn config(url: &str, schema: &str) -> StoreConfig {
    StoreConfig {
        url: url.to_string(),
        api_key: "secret".into(),
        schema: schema.into(),
        excluded_tables: vec![],
        claims_table: "claims_table".into(),
        page_limit: 100,
        timeouts: StoreTimeouts { request_secs: 5, connect_secs: 5 },
    }
}

/// Accept one connection, answer it with `status`, `headers` and `body`, and
/// return the raw request head, lowercased.
async fn serve_once(status: &'static str, headers: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut head = Vec::new();
        let mut buf = [0_u8; 1024];
        while !head.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            head.extend_from_slice(&buf[..n]);
        }
        let response = format!(
            "HTTP/1.1 {status}\r\ncontent-type: application/json\r\n{headers}content-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
        String::from_utf8_lossy(&head).to_lowercase()
    });
    (url, handle)
}

#[tokio::test]
async fn select_sends_auth_count_and_schema_headers() {
    let (url, server) = serve_once("200 OK", "content-range: 0-1/42\r\n", r#"[{"id":1},{"id":2}]"#).await;
    let client = StoreClient::from_config(&config(&url, "analytics")).unwrap();

    let query = SelectQuery::all().in_schema("analytics").limit(100).with_exact_count();
    let page = client.select("events", &query).await.unwrap();
    let request = server.await.unwrap();

    assert!(request.starts_with("get /rest/v1/events?select=*&limit=100 http/1.1"), "{request}");
    assert!(request.contains("apikey: secret"), "{request}");
    assert!(request.contains("authorization: bearer secret"), "{request}");
    assert!(request.contains("prefer: count=exact"), "{request}");
    assert!(request.contains("accept-profile: analytics"), "{request}");
    assert_eq!(page.total, Some(42));
    assert_eq!(page.rows.len(), 2);
}

#[tokio::test]
async fn select_without_schema_or_count_sends_neither_header() {
    let (url, server) = serve_once("200 OK", "", "[]").await;
    let client = StoreClient::from_config(&config(&url, "public")).unwrap();

    let page = client.select("events", &SelectQuery::all()).await.unwrap();
    let request = server.await.unwrap();

    assert!(!request.contains("accept-profile"), "{request}");
    assert!(!request.contains("prefer"), "{request}");
    assert_eq!(page.total, None);
    assert!(page.rows.is_empty());
}

#[tokio::test]
async fn collection_name_is_one_encoded_path_segment() {
    let (url, server) = serve_once("200 OK", "", "[]").await;
    let client = StoreClient::from_config(&config(&url, "public")).unwrap();

    client.select("odd/name?x#y", &SelectQuery::all()).await.unwrap();
    let request = server.await.unwrap();

    assert!(request.starts_with("get /rest/v1/odd%2fname%3fx%23y?select=* http/1.1"), "{request}");
}

#[tokio::test]
async fn list_collections_reads_metadata_schema() {
    let (url, server) = serve_once("200 OK", "", r#"[{"table_name":"events"},{"table_name":"users"}]"#).await;
    let client = StoreClient::from_config(&config(&url, "analytics")).unwrap();

    let names = client.list_collections("analytics", &[]).await.unwrap();
    let request = server.await.unwrap();

    assert_eq!(names, vec!["events".to_string(), "users".to_string()]);
    assert!(request.starts_with("get /rest/v1/tables?"), "{request}");
    assert!(request.contains("table_schema=eq.analytics"), "{request}");
    assert!(request.contains("accept-profile: information_schema"), "{request}");
}

#[tokio::test]
async fn error_status_carries_body() {
    let (url, server) = serve_once("401 Unauthorized", "", r#"{"message":"invalid jwt"}"#).await;
    let client = StoreClient::from_config(&config(&url, "public")).unwrap();

    let err = client.select("events", &SelectQuery::all()).await.unwrap_err();
    server.await.unwrap();

    match err {
        StoreError::ApiResponse { status, body } => {
            assert_eq!(status, 401);
            assert!(body.contains("invalid jwt"));
        }
        other => panic!("expected ApiResponse, got {other:?}"),
    }
}

#[test]
fn rest_url_appends_rest_prefix() {
    let client = StoreClient::from_config(&config("https://abc.supabase.co", "public")).unwrap();
    assert_eq!(client.rest_url(), "https://abc.supabase.co/rest/v1");
}
