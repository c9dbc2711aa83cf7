//! # Workflow Core
//!
//! 拉取式任务调度系统的共享基础：错误类型、数据模型以及调度核心
//! 与外部协作者之间的接口。

pub mod errors;
pub mod models;
pub mod traits;

pub use errors::*;
pub use models::{ArticleInfo, ArticleRecord, EndpointRecord, EndpointStatus, EndpointTask};
pub use traits::{Task, TaskExecutor, WorkFinder, WorkSource};

/// 统一的Result类型
pub type SchedulerResult<T> = std::result::Result<T, SchedulerError>;
