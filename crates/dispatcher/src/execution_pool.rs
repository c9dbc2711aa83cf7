//! 有界执行池
//!
//! 所有 Worker 共享的固定容量执行槽。提交在池满时阻塞调用方（即轮询循环），
//! 这是有意的背压点；排空开始后提交立即失败。

use std::future::Future;
use std::sync::{Arc, Mutex};

use thiserror::Error;
use tokio::sync::Semaphore;
use tokio_util::task::TaskTracker;
use tracing::{debug, info};

/// 执行池拒绝提交
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error("execution pool is draining and no longer accepts work")]
    Draining,
}

#[derive(Debug)]
pub struct ExecutionPool {
    capacity: usize,
    permits: Arc<Semaphore>,
    tracker: TaskTracker,
    accepting: Mutex<bool>,
}

impl ExecutionPool {
    /// `capacity` 至少为 1
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            permits: Arc::new(Semaphore::new(capacity)),
            tracker: TaskTracker::new(),
            accepting: Mutex::new(true),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// 正在执行的单元数
    pub fn in_flight(&self) -> usize {
        self.tracker.len()
    }

    /// 提交一个执行单元
    ///
    /// 池满时等待空闲槽；排空开始后（包括正在等待的提交）返回
    /// [`SubmissionError::Draining`]。
    pub async fn submit<F>(&self, unit: F) -> Result<(), SubmissionError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let permit = Arc::clone(&self.permits)
            .acquire_owned()
            .await
            .map_err(|_| SubmissionError::Draining)?;

        // spawn happens under the lock so drain() never misses a unit
        let accepting = self.accepting.lock().unwrap_or_else(|e| e.into_inner());
        if !*accepting {
            return Err(SubmissionError::Draining);
        }
        self.tracker.spawn(async move {
            unit.await;
            drop(permit);
        });
        Ok(())
    }

    /// 停止接收新工作并等待在途单元全部完成，可重复调用
    pub async fn drain(&self) {
        {
            let mut accepting = self.accepting.lock().unwrap_or_else(|e| e.into_inner());
            *accepting = false;
            self.permits.close();
            self.tracker.close();
        }

        let in_flight = self.tracker.len();
        if in_flight > 0 {
            info!(in_flight, "Waiting for in-flight executions to finish");
        }
        self.tracker.wait().await;
        debug!("Execution pool drained");
    }
}
