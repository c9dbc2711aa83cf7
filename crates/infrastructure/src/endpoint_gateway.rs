use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::{debug, info};
use workflow_core::{EndpointRecord, EndpointStatus, SchedulerResult, WorkSource};

/// 内存端点存储
///
/// 多个轮询和执行任务会并发读写，所有访问都经过内部的 `RwLock`。
#[derive(Debug, Clone, Default)]
pub struct EndpointDataGateway {
    endpoints: Arc<RwLock<Vec<EndpointRecord>>>,
}

impl EndpointDataGateway {
    pub fn new(records: Vec<EndpointRecord>) -> Self {
        info!("Endpoint gateway initialized with {} endpoint(s)", records.len());
        Self {
            endpoints: Arc::new(RwLock::new(records)),
        }
    }

    /// 全部端点的快照
    pub async fn find_all(&self) -> Vec<EndpointRecord> {
        self.endpoints.read().await.clone()
    }

    pub async fn status_of(&self, url: &str) -> Option<EndpointStatus> {
        self.endpoints
            .read()
            .await
            .iter()
            .find(|e| e.url == url)
            .map(|e| e.status)
    }
}

#[async_trait]
impl WorkSource for EndpointDataGateway {
    async fn list_ready(&self, worker_name: &str) -> SchedulerResult<Vec<EndpointRecord>> {
        let endpoints = self.endpoints.read().await;
        let ready: Vec<EndpointRecord> = endpoints.iter().filter(|e| e.is_ready()).cloned().collect();
        debug!(worker = worker_name, ready = ready.len(), "Listed ready endpoints");
        Ok(ready)
    }

    async fn mark_completed(&self, url: &str) -> SchedulerResult<()> {
        let mut endpoints = self.endpoints.write().await;
        let mut matched = false;
        for endpoint in endpoints.iter_mut().filter(|e| e.url == url) {
            matched = true;
            if endpoint.status != EndpointStatus::Completed {
                endpoint.status = EndpointStatus::Completed;
                info!(endpoint = url, "Marked endpoint as completed");
            }
        }
        if !matched {
            debug!(endpoint = url, "Completion for unknown endpoint ignored");
        }
        Ok(())
    }

    async fn reset_all(&self) -> SchedulerResult<()> {
        let mut endpoints = self.endpoints.write().await;
        for endpoint in endpoints.iter_mut() {
            endpoint.status = EndpointStatus::Ready;
        }
        info!("Reset {} endpoint(s) to ready", endpoints.len());
        Ok(())
    }
}
