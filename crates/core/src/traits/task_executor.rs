//! 任务执行器接口定义
//!
//! 此模块定义了调度核心消费的两个抽象：
//! - [`Task`] 一次轮询发现的不透明工作描述
//! - [`TaskExecutor`] 对单个任务执行实际工作的组件
//!
//! ## 实现自定义执行器
//!
//! ```rust
//! use async_trait::async_trait;
//! use workflow_core::models::EndpointTask;
//! use workflow_core::traits::TaskExecutor;
//! use workflow_core::SchedulerResult;
//!
//! pub struct LoggingExecutor;
//!
//! #[async_trait]
//! impl TaskExecutor<EndpointTask> for LoggingExecutor {
//!     async fn execute(&self, task: &EndpointTask) -> SchedulerResult<()> {
//!         println!("processing {}", task.endpoint());
//!         Ok(())
//!     }
//! }
//! ```

use std::fmt::Debug;

use async_trait::async_trait;

use crate::SchedulerResult;

/// 工作描述
///
/// 任务是值类型：由 WorkFinder 在每次轮询时创建，被执行一次后
/// 要么标记完成，要么在失败时丢弃。除描述符外没有其他身份。
pub trait Task: Debug + Clone + Send + Sync + 'static {
    /// 工作项地址，用于日志和完成标记
    fn descriptor(&self) -> &str;
}

/// 任务执行器核心接口
///
/// 对调度器和执行池一无所知：给定任务，执行工作并返回成功或失败。
/// 从执行池的角度看是同步调用，内部可以进行阻塞式 I/O。
///
/// # 线程安全
///
/// 同一个执行器实例可能在执行池中被并发调用，实现者需要自行保护共享状态。
#[async_trait]
pub trait TaskExecutor<T: Task>: Send + Sync {
    /// 执行任务
    async fn execute(&self, task: &T) -> SchedulerResult<()>;
}
