use async_trait::async_trait;

use crate::{models::EndpointRecord, traits::Task, SchedulerResult};

/// 工作源接口
///
/// 暴露一组可寻址的工作项，每项带有就绪/完成状态。
/// 会被多个轮询和执行任务并发访问，实现者必须在内部串行化对存储的访问。
#[async_trait]
pub trait WorkSource: Send + Sync {
    /// 列出就绪的工作项
    ///
    /// 就绪判定与调用者身份无关，任何 Worker 都可以领取任何就绪项。
    async fn list_ready(&self, worker_name: &str) -> SchedulerResult<Vec<EndpointRecord>>;

    /// 标记工作项完成，幂等
    async fn mark_completed(&self, url: &str) -> SchedulerResult<()>;

    /// 将所有工作项重置为就绪
    async fn reset_all(&self) -> SchedulerResult<()>;
}

/// 任务查找接口
///
/// 调度器与工作源之间的适配层：把 Worker 身份翻译为任务列表，并转发完成通知。
#[async_trait]
pub trait WorkFinder<T: Task>: Send + Sync {
    /// 查找该 Worker 可领取的任务
    async fn find_requested(&self, worker_name: &str) -> SchedulerResult<Vec<T>>;

    /// 标记任务完成，重复调用必须安全
    async fn mark_completed(&self, task: &T) -> SchedulerResult<()>;
}
