use axum::{extract::State, Json};
use tracing::debug;
use workflow_core::ArticleInfo;

use crate::routes::AppState;

/// GET /articles
pub async fn list_articles(State(state): State<AppState>) -> Json<Vec<ArticleInfo>> {
    let articles = state.articles.find_all().await;
    debug!(count = articles.len(), "Listing articles");
    Json(articles.iter().map(ArticleInfo::from).collect())
}

/// GET /available
pub async fn list_available(State(state): State<AppState>) -> Json<Vec<ArticleInfo>> {
    let articles = state.articles.find_available().await;
    debug!(count = articles.len(), "Listing available articles");
    Json(articles.iter().map(ArticleInfo::from).collect())
}
