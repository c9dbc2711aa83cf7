use crate::validation::{ConfigValidator, ValidationUtils};
use serde::{Deserialize, Serialize};
use workflow_core::models::DEFAULT_ACCEPT;

pub const DEFAULT_FEED_URL: &str = "https://feed.infoq.com/";

fn default_accept() -> String {
    DEFAULT_ACCEPT.to_string()
}

/// A feed endpoint seeded into the work source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointConfig {
    pub url: String,
    #[serde(default = "default_accept")]
    pub accept: String,
}

impl EndpointConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            accept: default_accept(),
        }
    }
}

impl ConfigValidator for EndpointConfig {
    fn validate(&self) -> crate::ConfigResult<()> {
        ValidationUtils::validate_url(&self.url, "endpoints.url")?;
        ValidationUtils::validate_not_empty(&self.accept, "endpoints.accept")?;
        Ok(())
    }
}

/// An article present in storage before the first poll
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleSeed {
    pub id: i64,
    pub title: String,
    #[serde(default = "default_available")]
    pub available: bool,
}

fn default_available() -> bool {
    true
}

impl ConfigValidator for ArticleSeed {
    fn validate(&self) -> crate::ConfigResult<()> {
        ValidationUtils::validate_not_empty(&self.title, "articles.title")?;
        Ok(())
    }
}

pub fn default_endpoints() -> Vec<EndpointConfig> {
    vec![EndpointConfig::new(DEFAULT_FEED_URL)]
}

pub fn default_articles() -> Vec<ArticleSeed> {
    vec![
        ArticleSeed {
            id: 10101,
            title: "Programming Languages InfoQ Trends Report - October 2019 4".to_string(),
            available: true,
        },
        ArticleSeed {
            id: 10106,
            title: "Ryan Kitchens on Learning from Incidents at Netflix, the Role of SRE, and Sociotechnical Systems".to_string(),
            available: true,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_accept_defaults() {
        let endpoint: EndpointConfig = toml::from_str(r#"url = "http://localhost/feed""#).unwrap();
        assert_eq!(endpoint.accept, DEFAULT_ACCEPT);
        assert_eq!(endpoint.accept, "application/rss+xml");
        assert!(endpoint.validate().is_ok());
    }

    #[test]
    fn test_endpoint_requires_scheme() {
        let endpoint = EndpointConfig::new("feed.infoq.com");
        assert!(endpoint.validate().is_err());
    }

    #[test]
    fn test_article_seed_defaults_available() {
        let seed: ArticleSeed = toml::from_str("id = 1\ntitle = \"hello\"").unwrap();
        assert!(seed.available);
        assert!(seed.validate().is_ok());
    }
}
