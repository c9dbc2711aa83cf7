//! 调度器指标名称
//!
//! 通过 `metrics` 门面记录，未安装 recorder 时为空操作。

use metrics::counter;

pub const POLL_CYCLES_TOTAL: &str = "workflow_poll_cycles_total";
pub const POLL_FAILURES_TOTAL: &str = "workflow_poll_failures_total";
pub const TASKS_DISPATCHED_TOTAL: &str = "workflow_tasks_dispatched_total";
pub const TASKS_COMPLETED_TOTAL: &str = "workflow_tasks_completed_total";
pub const TASKS_FAILED_TOTAL: &str = "workflow_tasks_failed_total";

pub(crate) fn record(name: &'static str, worker: &str) {
    counter!(name, "worker" => worker.to_string()).increment(1);
}
