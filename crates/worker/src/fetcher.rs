use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use tracing::debug;
use workflow_core::{SchedulerError, SchedulerResult};

/// HTTP 下载接口
///
/// 返回响应正文，非 2xx 状态码视为失败。
#[async_trait]
pub trait HttpFetcher: Send + Sync {
    async fn get(&self, url: &str, accept: &str) -> SchedulerResult<String>;
}

/// 基于 reqwest 的下载器
#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    client: reqwest::Client,
}

impl ReqwestFetcher {
    pub fn new(request_timeout: Duration, user_agent: &str) -> SchedulerResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| SchedulerError::Configuration(format!("创建HTTP客户端失败: {e}")))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpFetcher for ReqwestFetcher {
    async fn get(&self, url: &str, accept: &str) -> SchedulerResult<String> {
        let response = self
            .client
            .get(url)
            .header(ACCEPT, accept)
            .send()
            .await
            .map_err(|e| SchedulerError::Network(format!("请求 {url} 失败: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SchedulerError::Network(format!(
                "请求 {url} 失败，状态码: {}",
                status.as_u16()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| SchedulerError::Network(format!("读取响应体失败: {e}")))?;
        debug!(url, bytes = body.len(), "Fetched endpoint");
        Ok(body)
    }
}
