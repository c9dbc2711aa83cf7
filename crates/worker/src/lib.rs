//! # Workflow Worker
//!
//! 端点抓取执行器：下载 RSS 订阅源，解析条目标题并写入文章存储。

pub mod endpoint_worker;
pub mod fetcher;
pub mod rss;

pub use endpoint_worker::EndpointWorker;
pub use fetcher::{HttpFetcher, ReqwestFetcher};
pub use rss::{parse_titles, RssError};
