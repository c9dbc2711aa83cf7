use serde::{Deserialize, Serialize};

/// 端点状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndpointStatus {
    /// 等待被轮询领取
    Ready,
    /// 已成功处理，直到被重置前不再出现在就绪列表
    Completed,
}

impl EndpointStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EndpointStatus::Ready => "ready",
            EndpointStatus::Completed => "completed",
        }
    }
}

/// 待轮询的端点记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointRecord {
    pub url: String,
    pub accept: String,
    pub status: EndpointStatus,
}

impl EndpointRecord {
    pub fn ready(url: impl Into<String>, accept: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            accept: accept.into(),
            status: EndpointStatus::Ready,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == EndpointStatus::Ready
    }
}
