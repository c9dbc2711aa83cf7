//! 内存存储实现
//!
//! - [`EndpointDataGateway`] 实现 `WorkSource`，保存待轮询的端点及其状态
//! - [`ArticleDataGateway`] 保存执行器产出的文章，供只读 API 查询

pub mod article_gateway;
pub mod endpoint_gateway;

pub use article_gateway::ArticleDataGateway;
pub use endpoint_gateway::EndpointDataGateway;
