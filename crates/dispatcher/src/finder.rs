use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;
use workflow_core::{EndpointTask, SchedulerError, SchedulerResult, WorkFinder, WorkSource};

/// 基于端点存储的任务查找器
pub struct EndpointWorkFinder {
    source: Arc<dyn WorkSource>,
}

impl EndpointWorkFinder {
    pub fn new(source: Arc<dyn WorkSource>) -> Self {
        Self { source }
    }
}

#[async_trait]
impl WorkFinder<EndpointTask> for EndpointWorkFinder {
    async fn find_requested(&self, worker_name: &str) -> SchedulerResult<Vec<EndpointTask>> {
        let ready = self.source.list_ready(worker_name).await.map_err(|e| match e {
            SchedulerError::Poll(_) => e,
            other => SchedulerError::Poll(other.to_string()),
        })?;

        let tasks: Vec<EndpointTask> = ready
            .into_iter()
            .map(|record| EndpointTask::new(record.url, record.accept))
            .collect();

        debug!(worker = worker_name, found = tasks.len(), "Found requested work");
        Ok(tasks)
    }

    async fn mark_completed(&self, task: &EndpointTask) -> SchedulerResult<()> {
        self.source.mark_completed(task.endpoint()).await
    }
}
