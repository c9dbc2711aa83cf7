use serde::{Deserialize, Serialize};
use crate::validation::{ConfigValidator, ValidationUtils};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub enabled: bool,
    pub bind_address: String,
    pub cors_enabled: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            bind_address: "0.0.0.0:8881".to_string(),
            cors_enabled: false,
        }
    }
}

impl ApiConfig {
    /// Rebind to `0.0.0.0:<port>` when a port override is supplied
    pub fn apply_port_override(&mut self, port: Option<&str>) -> crate::ConfigResult<()> {
        if let Some(port) = port {
            let port: u16 = port.trim().parse().map_err(|_| {
                crate::ConfigError::Validation(format!("PORT is not a valid port number: {port}"))
            })?;
            self.bind_address = format!("0.0.0.0:{port}");
        }
        Ok(())
    }
}

impl ConfigValidator for ApiConfig {
    fn validate(&self) -> crate::ConfigResult<()> {
        if self.enabled {
            ValidationUtils::validate_bind_address(&self.bind_address, "api.bind_address")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Json => "json",
            LogFormat::Pretty => "pretty",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub log_level: String,
    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

impl ConfigValidator for ObservabilityConfig {
    fn validate(&self) -> crate::ConfigResult<()> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(crate::ConfigError::Validation(format!(
                "Invalid log level: {}. Valid options: {:?}",
                self.log_level, valid_levels
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpClientConfig {
    pub request_timeout_seconds: u64,
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            request_timeout_seconds: 10,
            user_agent: concat!("workflow/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ConfigValidator for HttpClientConfig {
    fn validate(&self) -> crate::ConfigResult<()> {
        ValidationUtils::validate_seconds(self.request_timeout_seconds, "http.request_timeout_seconds")?;
        ValidationUtils::validate_not_empty(&self.user_agent, "http.user_agent")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_override() {
        let mut api = ApiConfig::default();
        api.apply_port_override(Some("9090")).unwrap();
        assert_eq!(api.bind_address, "0.0.0.0:9090");

        api.apply_port_override(None).unwrap();
        assert_eq!(api.bind_address, "0.0.0.0:9090");

        assert!(api.apply_port_override(Some("not-a-port")).is_err());
    }

    #[test]
    fn test_disabled_api_skips_address_validation() {
        let api = ApiConfig {
            enabled: false,
            bind_address: "nonsense".to_string(),
            cors_enabled: false,
        };
        assert!(api.validate().is_ok());
    }

    #[test]
    fn test_log_level_validation() {
        let mut obs = ObservabilityConfig::default();
        assert!(obs.validate().is_ok());
        obs.log_level = "WARN".to_string();
        assert!(obs.validate().is_ok());
        obs.log_level = "verbose".to_string();
        assert!(obs.validate().is_err());
    }

    #[test]
    fn test_http_timeout_must_be_positive() {
        let http = HttpClientConfig {
            request_timeout_seconds: 0,
            ..Default::default()
        };
        assert!(http.validate().is_err());
    }
}
