//! # 数据模型
//!
//! 调度核心与外部协作者之间传递的数据结构。
//!
//! - [`EndpointTask`] - 一次轮询发现的抓取任务，值类型，消费一次
//! - [`EndpointRecord`] - WorkSource 中的端点及其就绪/完成状态
//! - [`ArticleRecord`] / [`ArticleInfo`] - 执行器产出并由只读 API 暴露的结果
//!
//! ## 端点状态流转
//! ```text
//! Ready → Completed → (reset_all) → Ready
//! ```

pub mod article;
pub mod endpoint;
pub mod task;

pub use article::*;
pub use endpoint::*;
pub use task::*;
