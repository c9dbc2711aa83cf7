//! # Workflow API
//!
//! 只读 REST 接口，直接读取文章存储和端点存储。

pub mod error;
pub mod handlers;
pub mod response;
pub mod routes;

pub use error::ApiError;
pub use routes::{create_app, AppState};
