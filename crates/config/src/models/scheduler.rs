use crate::validation::{ConfigValidator, ValidationUtils};
use serde::{Deserialize, Serialize};

/// Upper bound on execution pool slots
const MAX_EXECUTION_POOL_SIZE: usize = 1000;
/// Upper bound on registered workers (one poll loop each)
const MAX_WORKERS: usize = 256;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Seconds each poll loop sleeps between cycles
    pub poll_delay_seconds: u64,
    /// Shared execution pool capacity across all workers
    pub execution_pool_size: usize,
    /// Worker names, one poll loop per entry
    pub workers: Vec<String>,
    /// Periodically reset every endpoint back to ready
    pub reset_interval_seconds: Option<u64>,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            poll_delay_seconds: 10,
            execution_pool_size: 10,
            workers: vec!["worker-1".to_string()],
            reset_interval_seconds: None,
        }
    }
}

impl ConfigValidator for SchedulerConfig {
    fn validate(&self) -> crate::ConfigResult<()> {
        ValidationUtils::validate_positive(
            self.poll_delay_seconds,
            "scheduler.poll_delay_seconds",
        )?;
        ValidationUtils::validate_count(
            self.execution_pool_size,
            "scheduler.execution_pool_size",
            MAX_EXECUTION_POOL_SIZE,
        )?;
        ValidationUtils::validate_count(self.workers.len(), "scheduler.workers", MAX_WORKERS)?;
        ValidationUtils::validate_unique(&self.workers, "scheduler.workers")?;

        if let Some(interval) = self.reset_interval_seconds {
            ValidationUtils::validate_seconds(interval, "scheduler.reset_interval_seconds")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = SchedulerConfig::default();
        assert_eq!(config.poll_delay_seconds, 10);
        assert_eq!(config.execution_pool_size, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_delay_rejected() {
        let config = SchedulerConfig {
            poll_delay_seconds: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_long_delay_accepted() {
        let config = SchedulerConfig {
            poll_delay_seconds: 7 * 86400,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_pool_rejected() {
        let config = SchedulerConfig {
            execution_pool_size: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_workers_must_be_unique_and_present() {
        let config = SchedulerConfig {
            workers: vec![],
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = SchedulerConfig {
            workers: vec!["a".to_string(), "a".to_string()],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_reset_interval_validated_when_present() {
        let config = SchedulerConfig {
            reset_interval_seconds: Some(0),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = SchedulerConfig {
            reset_interval_seconds: Some(30),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
