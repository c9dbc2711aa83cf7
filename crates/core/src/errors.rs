use thiserror::Error;

/// 调度器错误类型定义
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// 轮询 WorkFinder 时失败，轮询循环记录后继续
    #[error("轮询失败: {0}")]
    Poll(String),

    /// TaskExecutor 执行任务失败，任务被丢弃
    #[error("任务执行错误: {0}")]
    TaskExecution(String),

    #[error("网络错误: {0}")]
    Network(String),

    #[error("解析错误: {0}")]
    Parse(String),

    #[error("配置错误: {0}")]
    Configuration(String),

    #[error("Worker名称重复: {name}")]
    DuplicateWorker { name: String },

    #[error("内部错误: {0}")]
    Internal(String),
}

/// 统一的Result类型
pub type Result<T> = std::result::Result<T, SchedulerError>;
