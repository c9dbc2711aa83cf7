use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;
use workflow_api::{create_app, AppState};
use workflow_core::{ArticleInfo, ArticleRecord, EndpointRecord};
use workflow_infrastructure::{ArticleDataGateway, EndpointDataGateway};

fn test_app() -> (Router, ArticleDataGateway, EndpointDataGateway) {
    let articles = ArticleDataGateway::new(vec![
        ArticleRecord::new(10101, "Programming Languages InfoQ Trends Report", true),
        ArticleRecord::new(10106, "Ryan Kitchens on Learning from Incidents", false),
    ]);
    let endpoints = EndpointDataGateway::new(vec![
        EndpointRecord::ready("https://feed.infoq.com/", "application/rss+xml"),
        EndpointRecord::ready("https://example.com/feed", "application/rss+xml"),
    ]);
    let state = AppState {
        articles: articles.clone(),
        endpoints: endpoints.clone(),
    };
    (create_app(state, true), articles, endpoints)
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_list_articles_returns_all() {
    let (app, _, _) = test_app();
    let (status, body) = get_json(app, "/articles").await;

    assert_eq!(status, StatusCode::OK);
    let articles: Vec<ArticleInfo> = serde_json::from_value(body).unwrap();
    assert_eq!(articles.len(), 2);
    assert_eq!(articles[0].id, 10101);
    assert_eq!(articles[1].title, "Ryan Kitchens on Learning from Incidents");
}

#[tokio::test]
async fn test_list_available_filters_unavailable() {
    let (app, _, _) = test_app();
    let (status, body) = get_json(app, "/available").await;

    assert_eq!(status, StatusCode::OK);
    let articles: Vec<ArticleInfo> = serde_json::from_value(body).unwrap();
    assert_eq!(
        articles,
        vec![ArticleInfo {
            id: 10101,
            title: "Programming Languages InfoQ Trends Report".to_string(),
        }]
    );
}

#[tokio::test]
async fn test_articles_reflect_latest_collection() {
    let (app, articles, _) = test_app();
    articles.replace_all(["Fresh headline"]).await;

    let (_, body) = get_json(app, "/articles").await;
    assert_eq!(body[0]["title"], "Fresh headline");
    assert_eq!(body.as_array().unwrap().len(), 1);
    // only id and title are exposed
    assert!(body[0].get("available").is_none());
}

#[tokio::test]
async fn test_health_reports_endpoint_summary() {
    use workflow_core::WorkSource;

    let (app, _, endpoints) = test_app();
    endpoints.mark_completed("https://feed.infoq.com/").await.unwrap();

    let (status, body) = get_json(app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["endpoints"]["total"], 2);
    assert_eq!(body["endpoints"]["ready"], 1);
    assert_eq!(body["endpoints"]["completed"], 1);
}

#[tokio::test]
async fn test_unknown_route_returns_error_body() {
    let (app, _, _) = test_app();
    let (status, body) = get_json(app, "/nope").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["type"], "NOT_FOUND");
    assert_eq!(body["error"]["code"], 404);
}
