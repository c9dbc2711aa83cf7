//! 单个 Worker 的轮询循环
//!
//! 每轮：查询 WorkFinder，把找到的任务逐个提交到共享执行池，然后休眠
//! 轮询间隔。休眠可被关闭信号立即打断。

use std::any::Any;
use std::collections::HashSet;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures::FutureExt;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};
use workflow_core::{Task, WorkFinder};

use crate::execution_pool::ExecutionPool;
use crate::telemetry;
use crate::worker::Worker;

/// 在途任务登记
///
/// 多个 Worker 可能在同一轮看到同一个就绪项，已在执行中的描述符不会被重复派发。
#[derive(Debug, Default)]
pub(crate) struct InFlightSet {
    descriptors: Mutex<HashSet<String>>,
}

impl InFlightSet {
    /// 登记成功时返回守卫，守卫释放时移除登记
    fn claim(self: &Arc<Self>, descriptor: &str) -> Option<Claim> {
        let mut descriptors = self.descriptors.lock().unwrap_or_else(|e| e.into_inner());
        if !descriptors.insert(descriptor.to_string()) {
            return None;
        }
        Some(Claim {
            set: Arc::clone(self),
            descriptor: descriptor.to_string(),
        })
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.descriptors.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

pub(crate) struct Claim {
    set: Arc<InFlightSet>,
    descriptor: String,
}

impl Drop for Claim {
    fn drop(&mut self) {
        self.set
            .descriptors
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&self.descriptor);
    }
}

pub(crate) struct PollLoop<T: Task> {
    worker: Arc<Worker<T>>,
    finder: Arc<dyn WorkFinder<T>>,
    execution_pool: Arc<ExecutionPool>,
    in_flight: Arc<InFlightSet>,
    running: Arc<AtomicBool>,
    shutdown_rx: watch::Receiver<bool>,
    poll_delay: Duration,
}

impl<T: Task> PollLoop<T> {
    pub(crate) fn new(
        worker: Arc<Worker<T>>,
        finder: Arc<dyn WorkFinder<T>>,
        execution_pool: Arc<ExecutionPool>,
        in_flight: Arc<InFlightSet>,
        running: Arc<AtomicBool>,
        shutdown_rx: watch::Receiver<bool>,
        poll_delay: Duration,
    ) -> Self {
        Self {
            worker,
            finder,
            execution_pool,
            in_flight,
            running,
            shutdown_rx,
            poll_delay,
        }
    }

    pub(crate) async fn run(mut self) {
        info!(worker = self.worker.name(), "Poll loop started");

        while self.is_running() {
            self.poll_once().await;
            if self.pause().await {
                break;
            }
        }

        info!(worker = self.worker.name(), "Poll loop stopped");
    }

    fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst) && !*self.shutdown_rx.borrow()
    }

    async fn poll_once(&self) {
        let worker_name = self.worker.name();
        telemetry::record(telemetry::POLL_CYCLES_TOTAL, worker_name);

        let tasks = match self.finder.find_requested(worker_name).await {
            Ok(tasks) => tasks,
            Err(e) => {
                telemetry::record(telemetry::POLL_FAILURES_TOTAL, worker_name);
                error!(worker = worker_name, error = %e, "Polling for work failed");
                return;
            }
        };

        if tasks.is_empty() {
            debug!(worker = worker_name, "No work found");
            return;
        }

        for task in tasks {
            if !self.is_running() {
                debug!(worker = worker_name, "Shutdown requested, remaining tasks skipped");
                break;
            }

            let endpoint = task.descriptor().to_string();
            let Some(claim) = self.in_flight.claim(&endpoint) else {
                debug!(worker = worker_name, endpoint = %endpoint, "Task already in flight, skipped");
                continue;
            };
            let unit = execute_unit(
                Arc::clone(&self.worker),
                Arc::clone(&self.finder),
                task,
                claim,
            );
            match self.execution_pool.submit(unit).await {
                Ok(()) => {
                    telemetry::record(telemetry::TASKS_DISPATCHED_TOTAL, worker_name);
                    debug!(worker = worker_name, endpoint = %endpoint, "Task dispatched");
                }
                Err(e) => {
                    debug!(worker = worker_name, endpoint = %endpoint, error = %e, "Task not dispatched");
                    break;
                }
            }
        }
    }

    /// 返回 true 表示收到关闭信号
    async fn pause(&mut self) -> bool {
        if !self.is_running() {
            return true;
        }

        tokio::select! {
            _ = tokio::time::sleep(self.poll_delay) => !self.is_running(),
            changed = self.shutdown_rx.changed() => {
                // sender gone means the scheduler itself is gone
                changed.is_err() || *self.shutdown_rx.borrow()
            }
        }
    }
}

/// 执行单元：运行执行器，成功后通知 WorkFinder
///
/// 执行器返回错误或 panic 都只影响这一个任务。登记在完成标记之后才释放。
async fn execute_unit<T: Task>(
    worker: Arc<Worker<T>>,
    finder: Arc<dyn WorkFinder<T>>,
    task: T,
    _claim: Claim,
) {
    let worker_name = worker.name();
    let endpoint = task.descriptor();

    let outcome = AssertUnwindSafe(worker.executor().execute(&task))
        .catch_unwind()
        .await;

    match outcome {
        Ok(Ok(())) => {
            telemetry::record(telemetry::TASKS_COMPLETED_TOTAL, worker_name);
            if let Err(e) = finder.mark_completed(&task).await {
                warn!(worker = worker_name, endpoint, error = %e, "Failed to mark task completed");
            } else {
                debug!(worker = worker_name, endpoint, "Task completed");
            }
        }
        Ok(Err(e)) => {
            telemetry::record(telemetry::TASKS_FAILED_TOTAL, worker_name);
            error!(worker = worker_name, endpoint, error = %e, "Task execution failed, task dropped");
        }
        Err(panic) => {
            telemetry::record(telemetry::TASKS_FAILED_TOTAL, worker_name);
            error!(
                worker = worker_name,
                endpoint,
                error = %panic_message(panic.as_ref()),
                "Task executor panicked, task dropped"
            );
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panic_message_variants() {
        let boxed: Box<dyn Any + Send> = Box::new("static str");
        assert_eq!(panic_message(boxed.as_ref()), "static str");

        let boxed: Box<dyn Any + Send> = Box::new(String::from("owned"));
        assert_eq!(panic_message(boxed.as_ref()), "owned");

        let boxed: Box<dyn Any + Send> = Box::new(42u8);
        assert_eq!(panic_message(boxed.as_ref()), "unknown panic");
    }

    #[test]
    fn test_in_flight_claim_released_on_drop() {
        let set = Arc::new(InFlightSet::default());

        let claim = set.claim("feed-A").expect("first claim");
        assert!(set.claim("feed-A").is_none());
        assert!(set.claim("feed-B").is_some());
        assert_eq!(set.len(), 1);

        drop(claim);
        assert_eq!(set.len(), 0);
        assert!(set.claim("feed-A").is_some());
    }
}
