use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::{
    api_observability::{ApiConfig, HttpClientConfig, ObservabilityConfig},
    feeds::{default_articles, default_endpoints, ArticleSeed, EndpointConfig},
    scheduler::SchedulerConfig,
};
use crate::validation::{ConfigValidator, ValidationUtils};
use crate::{ConfigError, ConfigResult};

/// Prefix for environment overrides, e.g. `WORKFLOW__SCHEDULER__POLL_DELAY_SECONDS`
pub const ENV_PREFIX: &str = "WORKFLOW";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub scheduler: SchedulerConfig,
    pub endpoints: Vec<EndpointConfig>,
    pub articles: Vec<ArticleSeed>,
    pub api: ApiConfig,
    pub observability: ObservabilityConfig,
    pub http: HttpClientConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            scheduler: SchedulerConfig::default(),
            endpoints: default_endpoints(),
            articles: default_articles(),
            api: ApiConfig::default(),
            observability: ObservabilityConfig::default(),
            http: HttpClientConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn load(config_path: Option<&str>) -> ConfigResult<Self> {
        let mut builder = ConfigBuilder::builder();

        if let Some(path) = config_path {
            if Path::new(path).exists() {
                builder = builder.add_source(File::new(path, FileFormat::Toml));
            } else {
                return Err(ConfigError::File(format!("配置文件不存在: {path}")));
            }
        } else {
            let default_paths = ["config/workflow.toml", "workflow.toml"];
            if let Some(path) = default_paths.iter().find(|p| Path::new(p).exists()) {
                builder = builder.add_source(File::new(path, FileFormat::Toml));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let mut config: AppConfig = builder.build()?.try_deserialize()?;

        config
            .api
            .apply_port_override(std::env::var("PORT").ok().as_deref())?;

        config.validate()?;

        Ok(config)
    }

    pub fn from_toml(toml_str: &str) -> ConfigResult<Self> {
        let config: AppConfig = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> ConfigResult<String> {
        toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Configuration(format!("序列化配置为TOML失败: {e}")))
    }
}

impl ConfigValidator for AppConfig {
    fn validate(&self) -> ConfigResult<()> {
        self.scheduler.validate()?;
        for endpoint in &self.endpoints {
            endpoint.validate()?;
        }
        let urls: Vec<String> = self.endpoints.iter().map(|e| e.url.clone()).collect();
        ValidationUtils::validate_unique(&urls, "endpoints.url")?;
        for article in &self.articles {
            article.validate()?;
        }
        self.api.validate()?;
        self.observability.validate()?;
        self.http.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_app_config_default() {
        let config = AppConfig::default();
        assert_eq!(config.scheduler.poll_delay_seconds, 10);
        assert_eq!(config.scheduler.execution_pool_size, 10);
        assert_eq!(config.endpoints.len(), 1);
        assert_eq!(config.articles.len(), 2);
        assert_eq!(config.api.bind_address, "0.0.0.0:8881");
    }

    #[test]
    fn test_app_config_validation() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_app_config_from_toml() {
        let toml_str = r#"
[scheduler]
poll_delay_seconds = 1
execution_pool_size = 2
workers = ["worker-1", "worker-2"]

[[endpoints]]
url = "http://localhost:9000/feed-a"

[[endpoints]]
url = "http://localhost:9000/feed-b"
accept = "application/xml"

[api]
enabled = false

[observability]
log_level = "debug"
log_format = "json"
"#;

        let config = AppConfig::from_toml(toml_str).expect("Failed to parse TOML");
        assert_eq!(config.scheduler.poll_delay_seconds, 1);
        assert_eq!(config.scheduler.workers, vec!["worker-1", "worker-2"]);
        assert_eq!(config.endpoints.len(), 2);
        assert_eq!(config.endpoints[0].accept, "application/rss+xml");
        assert_eq!(config.endpoints[1].accept, "application/xml");
        assert!(!config.api.enabled);
        assert_eq!(config.observability.log_format, super::super::LogFormat::Json);
        // unspecified sections keep their defaults
        assert_eq!(config.articles.len(), 2);
        assert_eq!(config.http.request_timeout_seconds, 10);
    }

    #[test]
    fn test_from_toml_rejects_duplicate_endpoints() {
        let toml_str = r#"
[[endpoints]]
url = "http://localhost/feed"

[[endpoints]]
url = "http://localhost/feed"
"#;
        assert!(matches!(
            AppConfig::from_toml(toml_str),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_from_toml_rejects_duplicate_workers() {
        let toml_str = r#"
[scheduler]
workers = ["w", "w"]
"#;
        assert!(AppConfig::from_toml(toml_str).is_err());
    }

    #[test]
    fn test_from_toml_malformed_is_parse_error() {
        let result = AppConfig::from_toml("[scheduler\npoll_delay_seconds = 1");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = AppConfig::default();
        let serialized = config.to_toml().expect("Failed to serialize");
        let parsed = AppConfig::from_toml(&serialized).expect("Failed to parse");
        assert_eq!(parsed.scheduler.workers, config.scheduler.workers);
        assert_eq!(parsed.endpoints, config.endpoints);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("Failed to create temp file");
        writeln!(
            file,
            r#"
[scheduler]
poll_delay_seconds = 3
execution_pool_size = 4
workers = ["alpha"]

[api]
bind_address = "127.0.0.1:18881"
"#
        )
        .unwrap();

        let path = file.path().to_str().unwrap();
        let config = AppConfig::load(Some(path)).expect("Failed to load config");
        assert_eq!(config.scheduler.poll_delay_seconds, 3);
        assert_eq!(config.scheduler.execution_pool_size, 4);
        assert_eq!(config.scheduler.workers, vec!["alpha"]);
    }

    #[test]
    fn test_load_missing_file_fails() {
        let result = AppConfig::load(Some("/definitely/not/here/workflow.toml"));
        assert!(matches!(result, Err(ConfigError::File(_))));
    }

    #[test]
    fn test_load_wrong_type_is_configuration_error() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("Failed to create temp file");
        writeln!(file, "[scheduler]\nworkers = \"not-a-list\"").unwrap();

        let path = file.path().to_str().unwrap();
        assert!(matches!(
            AppConfig::load(Some(path)),
            Err(ConfigError::Configuration(_))
        ));
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("Failed to create temp file");
        writeln!(file, "[scheduler]\nexecution_pool_size = 0").unwrap();

        let path = file.path().to_str().unwrap();
        assert!(matches!(
            AppConfig::load(Some(path)),
            Err(ConfigError::Validation(_))
        ));
    }
}
