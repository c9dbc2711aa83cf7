//! # Workflow Dispatcher
//!
//! 拉取式调度核心：每个 Worker 一个轮询循环，所有 Worker 共享一个有界执行池。
//!
//! - [`WorkScheduler`] - 生命周期管理（启动、优雅关闭）
//! - [`ExecutionPool`] - 固定容量的执行槽，满时对轮询施加背压
//! - [`EndpointWorkFinder`] - 基于 [`WorkSource`](workflow_core::WorkSource) 的任务查找器

pub mod execution_pool;
pub mod finder;
mod poll_loop;
pub mod scheduler;
pub mod telemetry;
pub mod worker;

pub use execution_pool::{ExecutionPool, SubmissionError};
pub use finder::EndpointWorkFinder;
pub use scheduler::{
    SchedulerSettings, SchedulerState, ShutdownOutcome, StartOutcome, WorkScheduler,
};
pub use worker::Worker;
