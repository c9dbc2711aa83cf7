//! 工作调度器
//!
//! 为每个注册的 Worker 运行一个轮询循环，发现的任务提交到共享的有界执行池。
//!
//! ## 生命周期
//! ```text
//! Created → (start) → Running → (shutdown) → Draining → Stopped
//! ```
//! 关闭会等待所有在途任务完成，不会取消它们。停止后不能再次启动。

use std::collections::HashSet;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinSet;
use tracing::{error, info, warn};
use workflow_core::{SchedulerError, SchedulerResult, Task, WorkFinder};

use crate::execution_pool::ExecutionPool;
use crate::poll_loop::{InFlightSet, PollLoop};
use crate::worker::Worker;

/// 调度参数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerSettings {
    poll_delay: Duration,
    execution_pool_size: usize,
}

impl SchedulerSettings {
    /// 轮询间隔和执行池大小都必须为正
    pub fn new(poll_delay_seconds: u64, execution_pool_size: usize) -> SchedulerResult<Self> {
        if poll_delay_seconds == 0 {
            return Err(SchedulerError::Configuration(
                "poll_delay_seconds must be greater than 0".to_string(),
            ));
        }
        if execution_pool_size == 0 {
            return Err(SchedulerError::Configuration(
                "execution_pool_size must be greater than 0".to_string(),
            ));
        }
        Ok(Self {
            poll_delay: Duration::from_secs(poll_delay_seconds),
            execution_pool_size,
        })
    }

    pub fn poll_delay(&self) -> Duration {
        self.poll_delay
    }

    pub fn execution_pool_size(&self) -> usize {
        self.execution_pool_size
    }
}

impl Default for SchedulerSettings {
    fn default() -> Self {
        Self {
            poll_delay: Duration::from_secs(10),
            execution_pool_size: 10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Created,
    Running,
    Draining,
    Stopped,
}

impl fmt::Display for SchedulerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SchedulerState::Created => "created",
            SchedulerState::Running => "running",
            SchedulerState::Draining => "draining",
            SchedulerState::Stopped => "stopped",
        };
        write!(f, "{s}")
    }
}

/// `start` 的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    Started,
    AlreadyRunning,
    /// 调度器已停止，不支持重新启动
    Terminated,
}

/// `shutdown` 的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownOutcome {
    /// 所有轮询循环已退出，在途任务已完成
    Drained,
    NotRunning,
}

pub struct WorkScheduler<T: Task> {
    finder: Arc<dyn WorkFinder<T>>,
    workers: Vec<Arc<Worker<T>>>,
    settings: SchedulerSettings,
    running: Arc<AtomicBool>,
    state: Mutex<SchedulerState>,
    shutdown_tx: watch::Sender<bool>,
    execution_pool: Arc<ExecutionPool>,
    in_flight: Arc<InFlightSet>,
    polling_pool: Mutex<JoinSet<()>>,
}

impl<T: Task> WorkScheduler<T> {
    /// 创建调度器，Worker 名称必须唯一且至少有一个
    pub fn new(
        finder: Arc<dyn WorkFinder<T>>,
        workers: Vec<Worker<T>>,
        settings: SchedulerSettings,
    ) -> SchedulerResult<Self> {
        if workers.is_empty() {
            return Err(SchedulerError::Configuration(
                "at least one worker must be registered".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for worker in &workers {
            if !seen.insert(worker.name()) {
                return Err(SchedulerError::DuplicateWorker {
                    name: worker.name().to_string(),
                });
            }
        }

        let (shutdown_tx, _) = watch::channel(false);

        Ok(Self {
            finder,
            workers: workers.into_iter().map(Arc::new).collect(),
            execution_pool: Arc::new(ExecutionPool::new(settings.execution_pool_size)),
            in_flight: Arc::new(InFlightSet::default()),
            settings,
            running: Arc::new(AtomicBool::new(false)),
            state: Mutex::new(SchedulerState::Created),
            shutdown_tx,
            polling_pool: Mutex::new(JoinSet::new()),
        })
    }

    /// 启动所有轮询循环，立即返回
    ///
    /// 必须在 tokio 运行时中调用。重复调用不会产生额外的轮询循环。
    pub fn start(&self) -> StartOutcome {
        let mut state = self.lock_state();
        match *state {
            SchedulerState::Created => {}
            SchedulerState::Running | SchedulerState::Draining => {
                info!("Scheduler already running, start ignored");
                return StartOutcome::AlreadyRunning;
            }
            SchedulerState::Stopped => {
                warn!("Scheduler has been shut down and cannot be restarted");
                return StartOutcome::Terminated;
            }
        }

        self.running.store(true, Ordering::SeqCst);
        let mut polling_pool = self
            .polling_pool
            .lock()
            .unwrap_or_else(|e| e.into_inner());
        for worker in &self.workers {
            let poll_loop = PollLoop::new(
                Arc::clone(worker),
                Arc::clone(&self.finder),
                Arc::clone(&self.execution_pool),
                Arc::clone(&self.in_flight),
                Arc::clone(&self.running),
                self.shutdown_tx.subscribe(),
                self.settings.poll_delay,
            );
            polling_pool.spawn(poll_loop.run());
        }
        *state = SchedulerState::Running;

        info!(
            workers = self.workers.len(),
            poll_delay_secs = self.settings.poll_delay.as_secs(),
            execution_pool_size = self.execution_pool.capacity(),
            "Scheduler started"
        );
        StartOutcome::Started
    }

    /// 优雅关闭
    ///
    /// 停止轮询，拒绝新的提交，等待在途任务完成并回收所有轮询循环后返回。
    /// 只有第一次在运行状态下的调用会执行排空，其他调用立即返回 `NotRunning`。
    pub async fn shutdown(&self) -> ShutdownOutcome {
        {
            let mut state = self.lock_state();
            if *state != SchedulerState::Running {
                info!(state = %*state, "Scheduler not running, shutdown ignored");
                return ShutdownOutcome::NotRunning;
            }
            *state = SchedulerState::Draining;
        }

        info!(in_flight = self.execution_pool.in_flight(), "Scheduler shutting down");
        self.running.store(false, Ordering::SeqCst);
        self.shutdown_tx.send_replace(true);

        self.execution_pool.drain().await;

        let mut polling_pool = {
            let mut guard = self
                .polling_pool
                .lock()
                .unwrap_or_else(|e| e.into_inner());
            std::mem::take(&mut *guard)
        };
        while let Some(result) = polling_pool.join_next().await {
            if let Err(e) = result {
                error!(error = %e, "Poll loop terminated abnormally");
            }
        }

        *self.lock_state() = SchedulerState::Stopped;
        info!("Scheduler stopped");
        ShutdownOutcome::Drained
    }

    pub fn state(&self) -> SchedulerState {
        *self.lock_state()
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    pub fn worker_names(&self) -> Vec<&str> {
        self.workers.iter().map(|w| w.name()).collect()
    }

    pub fn settings(&self) -> SchedulerSettings {
        self.settings
    }

    pub fn capacity(&self) -> usize {
        self.execution_pool.capacity()
    }

    pub fn in_flight(&self) -> usize {
        self.execution_pool.in_flight()
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, SchedulerState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl<T: Task> fmt::Debug for WorkScheduler<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkScheduler")
            .field("workers", &self.worker_names())
            .field("settings", &self.settings)
            .field("state", &self.state())
            .finish()
    }
}
