use serde::{Deserialize, Serialize};

/// 已存储的文章
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRecord {
    pub id: i64,
    pub title: String,
    pub available: bool,
}

impl ArticleRecord {
    pub fn new(id: i64, title: impl Into<String>, available: bool) -> Self {
        Self {
            id,
            title: title.into(),
            available,
        }
    }
}

/// 对外暴露的文章信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleInfo {
    pub id: i64,
    pub title: String,
}

impl From<&ArticleRecord> for ArticleInfo {
    fn from(record: &ArticleRecord) -> Self {
        Self {
            id: record.id,
            title: record.title.clone(),
        }
    }
}
