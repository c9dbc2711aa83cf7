pub mod api_observability;
pub mod app_config;
pub mod feeds;
pub mod scheduler;

pub use api_observability::*;
pub use app_config::*;
pub use feeds::*;
pub use scheduler::*;
