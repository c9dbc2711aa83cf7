use std::time::Duration;

use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use axum::Router;
use workflow_core::SchedulerError;
use workflow_worker::{HttpFetcher, ReqwestFetcher};

async fn feed(headers: HeaderMap) -> (StatusCode, String) {
    let accept = headers
        .get("accept")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    (StatusCode::OK, format!("<rss><channel><title>{accept}</title></channel></rss>"))
}

async fn spawn_server() -> String {
    let app = Router::new()
        .route("/feed", get(feed))
        .route("/missing", get(|| async { StatusCode::NOT_FOUND }));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn fetcher() -> ReqwestFetcher {
    ReqwestFetcher::new(Duration::from_secs(5), "workflow-test").unwrap()
}

#[tokio::test]
async fn test_get_sends_accept_header() {
    let base = spawn_server().await;
    let body = fetcher()
        .get(&format!("{base}/feed"), "application/rss+xml")
        .await
        .unwrap();
    assert!(body.contains("<title>application/rss+xml</title>"));
}

#[tokio::test]
async fn test_non_success_status_is_network_error() {
    let base = spawn_server().await;
    let err = fetcher()
        .get(&format!("{base}/missing"), "application/rss+xml")
        .await
        .unwrap_err();
    assert!(matches!(err, SchedulerError::Network(msg) if msg.contains("404")));
}

#[tokio::test]
async fn test_unreachable_host_is_network_error() {
    // port 9 (discard) on localhost is not served in test environments
    let err = fetcher()
        .get("http://127.0.0.1:9/feed", "application/rss+xml")
        .await
        .unwrap_err();
    assert!(matches!(err, SchedulerError::Network(_)));
}
