//! RSS 2.0 解析，只关心条目标题

use serde::Deserialize;
use thiserror::Error;
use workflow_core::SchedulerError;

#[derive(Debug, Error)]
#[error("无效的RSS文档: {0}")]
pub struct RssError(#[from] quick_xml::de::DeError);

impl From<RssError> for SchedulerError {
    fn from(err: RssError) -> Self {
        SchedulerError::Parse(err.to_string())
    }
}

#[derive(Debug, Deserialize)]
struct Rss {
    channel: Channel,
}

#[derive(Debug, Deserialize)]
struct Channel {
    #[serde(rename = "item", default)]
    items: Vec<Item>,
}

#[derive(Debug, Deserialize)]
struct Item {
    title: Option<String>,
}

/// 按文档顺序返回所有非空的条目标题
pub fn parse_titles(xml: &str) -> Result<Vec<String>, RssError> {
    let rss: Rss = quick_xml::de::from_str(xml)?;
    Ok(rss
        .channel
        .items
        .into_iter()
        .filter_map(|item| item.title)
        .map(|title| title.trim().to_string())
        .filter(|title| !title.is_empty())
        .collect())
}
