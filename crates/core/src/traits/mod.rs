pub mod scheduler;
pub mod task_executor;

pub use scheduler::*;
pub use task_executor::*;
