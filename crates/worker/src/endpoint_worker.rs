use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;
use workflow_core::{EndpointTask, SchedulerResult, TaskExecutor};
use workflow_infrastructure::ArticleDataGateway;

use crate::fetcher::HttpFetcher;
use crate::rss::parse_titles;

/// 端点抓取执行器
///
/// 下载任务指向的订阅源，解析成功后用条目标题整体替换文章存储。
/// 下载或解析失败时存储保持不变。
pub struct EndpointWorker {
    name: String,
    fetcher: Arc<dyn HttpFetcher>,
    articles: ArticleDataGateway,
}

impl EndpointWorker {
    pub fn new(
        name: impl Into<String>,
        fetcher: Arc<dyn HttpFetcher>,
        articles: ArticleDataGateway,
    ) -> Self {
        Self {
            name: name.into(),
            fetcher,
            articles,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[async_trait]
impl TaskExecutor<EndpointTask> for EndpointWorker {
    async fn execute(&self, task: &EndpointTask) -> SchedulerResult<()> {
        info!(worker = %self.name, endpoint = task.endpoint(), "Collecting data from endpoint");

        let body = self.fetcher.get(task.endpoint(), task.accept()).await?;
        let titles = parse_titles(&body)?;

        let saved = self.articles.replace_all(titles).await;
        info!(
            worker = %self.name,
            endpoint = task.endpoint(),
            saved,
            "Finished collecting data"
        );
        Ok(())
    }
}
