use std::fmt;
use std::sync::Arc;

use workflow_core::{Task, TaskExecutor};

/// 已注册的 Worker
///
/// 由唯一名称和绑定的执行器组成，注册后不可变，与调度器同生命周期。
pub struct Worker<T: Task> {
    name: String,
    executor: Arc<dyn TaskExecutor<T>>,
}

impl<T: Task> Worker<T> {
    pub fn new(name: impl Into<String>, executor: Arc<dyn TaskExecutor<T>>) -> Self {
        Self {
            name: name.into(),
            executor,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn executor(&self) -> &Arc<dyn TaskExecutor<T>> {
        &self.executor
    }
}

impl<T: Task> fmt::Debug for Worker<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Worker").field("name", &self.name).finish()
    }
}
