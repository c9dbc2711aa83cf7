use serde::{Deserialize, Serialize};

use crate::traits::Task;

/// 默认的 Accept 头，RSS 订阅源
pub const DEFAULT_ACCEPT: &str = "application/rss+xml";

/// 端点抓取任务
///
/// 每次轮询由 WorkFinder 根据就绪的端点记录新建，交给一个 TaskExecutor
/// 消费一次。除端点地址外没有其他身份，多次轮询可能产生相同的任务。
///
/// # 使用示例
///
/// ```rust
/// use workflow_core::models::EndpointTask;
///
/// let task = EndpointTask::new("https://feed.infoq.com/", "application/rss+xml");
/// assert_eq!(task.endpoint(), "https://feed.infoq.com/");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EndpointTask {
    endpoint: String,
    accept: String,
}

impl EndpointTask {
    pub fn new(endpoint: impl Into<String>, accept: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            accept: accept.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn accept(&self) -> &str {
        &self.accept
    }
}

impl Task for EndpointTask {
    fn descriptor(&self) -> &str {
        &self.endpoint
    }
}
