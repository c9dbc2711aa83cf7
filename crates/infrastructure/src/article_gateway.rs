use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info};
use workflow_core::ArticleRecord;

/// 内存文章存储
#[derive(Debug, Clone, Default)]
pub struct ArticleDataGateway {
    articles: Arc<RwLock<Vec<ArticleRecord>>>,
}

impl ArticleDataGateway {
    pub fn new(initial: Vec<ArticleRecord>) -> Self {
        info!("Article gateway initialized with {} article(s)", initial.len());
        Self {
            articles: Arc::new(RwLock::new(initial)),
        }
    }

    pub async fn find_all(&self) -> Vec<ArticleRecord> {
        self.articles.read().await.clone()
    }

    pub async fn find_available(&self) -> Vec<ArticleRecord> {
        self.articles
            .read()
            .await
            .iter()
            .filter(|a| a.available)
            .cloned()
            .collect()
    }

    /// 保存新文章，id 取现有最大值加一
    pub async fn save(&self, title: impl Into<String>) -> ArticleRecord {
        let mut articles = self.articles.write().await;
        let id = articles.iter().map(|a| a.id).max().unwrap_or(0) + 1;
        let record = ArticleRecord::new(id, title, true);
        articles.push(record.clone());
        debug!(id, title = %record.title, "Saved article");
        record
    }

    /// 原子地替换全部文章
    pub async fn replace_all<I, S>(&self, titles: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut articles = self.articles.write().await;
        articles.clear();
        for (idx, title) in titles.into_iter().enumerate() {
            articles.push(ArticleRecord::new(idx as i64 + 1, title, true));
        }
        info!("Replaced articles, {} stored", articles.len());
        articles.len()
    }

    pub async fn clear(&self) {
        self.articles.write().await.clear();
    }

    pub async fn len(&self) -> usize {
        self.articles.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.articles.read().await.is_empty()
    }
}
