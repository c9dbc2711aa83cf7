use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use workflow_infrastructure::{ArticleDataGateway, EndpointDataGateway};

use crate::handlers::{
    articles::{list_articles, list_available},
    health::health_check,
    not_found,
};

/// API应用状态
#[derive(Clone)]
pub struct AppState {
    pub articles: ArticleDataGateway,
    pub endpoints: EndpointDataGateway,
}

/// 创建API路由
pub fn create_app(state: AppState, cors_enabled: bool) -> Router {
    let router = Router::new()
        .route("/health", get(health_check))
        .route("/articles", get(list_articles))
        .route("/available", get(list_available))
        .fallback(not_found)
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    if cors_enabled {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}
