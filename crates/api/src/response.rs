use serde::{Deserialize, Serialize};
use workflow_core::EndpointRecord;

/// 端点状态汇总
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointSummary {
    pub total: usize,
    pub ready: usize,
    pub completed: usize,
}

impl EndpointSummary {
    pub fn from_records(records: &[EndpointRecord]) -> Self {
        let ready = records.iter().filter(|r| r.is_ready()).count();
        Self {
            total: records.len(),
            ready,
            completed: records.len() - ready,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub endpoints: EndpointSummary,
}

impl HealthResponse {
    pub fn ok(endpoints: EndpointSummary) -> Self {
        Self {
            status: "ok".to_string(),
            service: "workflow".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: chrono::Utc::now(),
            endpoints,
        }
    }
}
