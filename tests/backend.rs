//! End-to-end tests against a canned-response loopback server.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use estate_copilot::api::{ApiClient, ClientConfig};
use estate_copilot::models::{ChatRequest, PropertyDetailsRequest, SearchQuery};
use estate_copilot::refine::refine;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// Serve the same HTTP response to every connection, counting hits.
async fn spawn_server(
    status: u16,
    reason: &'static str,
    content_type: &'static str,
    body: String,
) -> (String, Arc<AtomicUsize>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            counter.fetch_add(1, Ordering::SeqCst);
            read_request(&mut socket).await;
            let response = format!(
                "HTTP/1.1 {status} {reason}\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });

    (format!("http://{addr}"), hits)
}

/// Drain the request (headers plus declared body) before answering.
async fn read_request(socket: &mut TcpStream) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let Ok(n) = socket.read(&mut chunk).await else {
            return;
        };
        if n == 0 {
            return;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let headers = String::from_utf8_lossy(&buf[..pos]).to_lowercase();
            let content_length = headers
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= pos + 4 + content_length {
                return;
            }
        }
    }
}

fn client_for(base_url: String) -> ApiClient {
    ApiClient::with_config(ClientConfig::default().with_base_url(base_url)).unwrap()
}

/// An address nothing is listening on.
async fn dead_address() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

const SEARCH_BODY: &str = r#"{
    "query": "2bhk pune",
    "results": [
        {"property_id": "LIVE1", "name": "Skyline 2BHK", "property_type": "apartment",
         "bedrooms": 2, "city": "Pune", "area": "Baner", "elasticsearch_score": 0.7,
         "description": "Bright flat close to the tech park"},
        {"id": "LIVE2", "name": "Whitefield Villa", "property_type": "villa",
         "bedrooms": 4, "city": "Bangalore", "area": "Whitefield", "elasticsearch_score": 0.9},
        {"id": "LIVE2", "name": "Whitefield Villa", "property_type": "villa",
         "bedrooms": 4, "city": "Bangalore", "area": "Whitefield", "elasticsearch_score": 0.9}
    ],
    "total": 3,
    "platform": "google-cloud",
    "search_type": "hybrid",
    "data_source": "elasticsearch"
}"#;

#[tokio::test]
async fn search_error_falls_back_with_classified_message() {
    let (base_url, _) = spawn_server(
        500,
        "Internal Server Error",
        "application/json",
        r#"{"detail": "index unavailable"}"#.to_string(),
    )
    .await;
    let client = client_for(base_url);

    let outcome = client.search(&SearchQuery::new("villa")).await;
    assert!(outcome.is_fallback());
    let reason = outcome.fallback_reason().unwrap();
    assert_eq!(reason.to_string(), "index unavailable");
    assert_eq!(reason.status_code(), Some(500));

    // Fallback data is the sample catalog filtered by the original query.
    let envelope = outcome.data();
    assert_eq!(envelope.data.data_source, "mock_data");
    assert_eq!(envelope.data.results.len(), 1);
    assert_eq!(envelope.data.results[0].id, "MOCK002");
    assert_eq!(envelope.data.total, 1);
}

#[tokio::test]
async fn identical_searches_within_ttl_hit_the_network_once() {
    let (base_url, hits) = spawn_server(
        200,
        "OK",
        "application/json",
        SEARCH_BODY.to_string(),
    )
    .await;
    let client = client_for(base_url);
    let request = SearchQuery::new("2bhk pune").with_limit(50);

    let first = client.search(&request).await;
    assert!(!first.is_fallback());
    let second = client.search(&request).await;
    assert!(!second.is_fallback());
    assert_eq!(hits.load(Ordering::SeqCst), 1);

    // A request differing in a significant field misses the cache.
    client.search(&SearchQuery::new("2bhk pune").with_limit(10)).await;
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn fallback_responses_are_not_cached() {
    let (base_url, hits) = spawn_server(
        503,
        "Service Unavailable",
        "application/json",
        r#"{"detail": "warming up"}"#.to_string(),
    )
    .await;
    let client = client_for(base_url);
    let request = SearchQuery::new("villa");

    assert!(client.search(&request).await.is_fallback());
    assert!(client.search(&request).await.is_fallback());
    // Both attempts reached the network; sample data never entered the cache.
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn remote_search_normalizes_and_refines() {
    let (base_url, _) = spawn_server(
        200,
        "OK",
        "application/json",
        SEARCH_BODY.to_string(),
    )
    .await;
    let client = client_for(base_url);

    let outcome = client.search(&SearchQuery::new("2bhk pune").with_limit(50)).await;
    let envelope = outcome.into_data();
    assert_eq!(envelope.data_source.as_deref(), Some("elasticsearch"));

    // Legacy aliases were folded at the wire boundary.
    let skyline = &envelope.data.results[0];
    assert_eq!(skyline.id, "LIVE1");
    assert_eq!(skyline.relevance_score, Some(0.7));

    let refined = refine(envelope.data.results, "2bhk pune");
    // The duplicate villa collapses and the non-matching villa is dropped,
    // despite its higher server-side score.
    assert_eq!(refined.total, 1);
    assert_eq!(refined.properties[0].id, "LIVE1");
}

#[tokio::test]
async fn status_check_reports_online() {
    let (base_url, _) = spawn_server(
        200,
        "OK",
        "application/json",
        r#"{"status": "healthy"}"#.to_string(),
    )
    .await;
    let client = client_for(base_url);

    let status = client.check_status().await;
    assert!(status.is_online);
    assert!(status.error.is_none());
}

#[tokio::test]
async fn status_check_never_fails_against_dead_backend() {
    let client = client_for(dead_address().await);
    let started = std::time::Instant::now();
    let status = client.check_status().await;
    assert!(started.elapsed() < std::time::Duration::from_secs(5));
    assert!(!status.is_online);
    assert!(status.error.is_some());
}

#[tokio::test]
async fn status_check_reports_error_status_as_offline() {
    let (base_url, _) = spawn_server(
        503,
        "Service Unavailable",
        "application/json",
        "{}".to_string(),
    )
    .await;
    let client = client_for(base_url);

    let status = client.check_status().await;
    assert!(!status.is_online);
    assert_eq!(
        status.error.as_deref(),
        Some("Server returned 503: Service Unavailable")
    );
}

#[tokio::test]
async fn chat_propagates_errors_without_fallback() {
    let (base_url, _) = spawn_server(
        500,
        "Internal Server Error",
        "application/json",
        r#"{"detail": "assistant offline"}"#.to_string(),
    )
    .await;
    let client = client_for(base_url);

    let request = ChatRequest {
        session_id: "session_1".to_string(),
        user_id: "anon".to_string(),
        message: "show me villas".to_string(),
        context: None,
    };
    let err = client.chat(&request).await.unwrap_err();
    assert_eq!(err.message(), "assistant offline");
}

#[tokio::test]
async fn non_json_error_body_yields_status_line_message() {
    let (base_url, _) = spawn_server(
        404,
        "Not Found",
        "text/html",
        "<html>gone</html>".to_string(),
    )
    .await;
    let client = client_for(base_url);

    let request = PropertyDetailsRequest {
        property_id: "P1".to_string(),
        include_amenities: None,
        include_market_data: None,
        include_ai_insights: None,
    };
    let err = client.property_details(&request).await.unwrap_err();
    assert_eq!(err.message(), "Server returned 404: Not Found");
}

#[tokio::test]
async fn contact_history_encodes_query_parameters() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let captured = Arc::new(std::sync::Mutex::new(String::new()));
    let sink = captured.clone();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = vec![0u8; 4096];
        let n = socket.read(&mut buf).await.unwrap();
        *sink.lock().unwrap() = String::from_utf8_lossy(&buf[..n]).to_string();
        let body = "{}";
        let response = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        let _ = socket.write_all(response.as_bytes()).await;
        let _ = socket.shutdown().await;
    });

    let client = client_for(format!("http://{addr}"));
    client.contact_history("user@example.com", 20).await.unwrap();

    let request = captured.lock().unwrap().clone();
    let request_line = request.lines().next().unwrap_or_default().to_string();
    assert!(request_line.starts_with("GET /api/v1/contact/history?"));
    assert!(request_line.contains("user_email=user%40example.com"));
    assert!(request_line.contains("limit=20"));
}

#[tokio::test]
async fn unreachable_backend_substitutes_samples_for_listings() {
    let client = client_for(dead_address().await);

    let outcome = client.all_properties(2).await;
    assert!(outcome.is_fallback());
    assert_eq!(outcome.data().data.len(), 2);

    let outcome = client.property("MOCK003").await;
    assert!(outcome.is_fallback());
    assert_eq!(outcome.data().data.id, "MOCK003");

    let outcome = client.stats().await;
    assert!(outcome.is_fallback());
    assert_eq!(outcome.data().data.data_source, "mock_data");

    let outcome = client.app_info().await;
    assert!(outcome.is_fallback());
    assert_eq!(outcome.data().data.application_name, "Real Estate Co-Pilot");

    let outcome = client.health().await;
    assert!(outcome.is_fallback());
    assert_eq!(outcome.data().data.status, "healthy");
}
