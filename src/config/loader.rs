//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the
//! legal-holiday policy and statutory limits from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::calculation::WorkingTimeClassifier;
use crate::error::{EngineError, EngineResult};
use crate::models::{LegalHolidayPolicy, StatutoryLimits};

use super::types::EngineConfig;

/// Loads and provides access to the engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── policy.yaml   # Legal-holiday weekdays, specific date, week start (required)
/// └── limits.yaml   # Daily and weekly limits in minutes (optional)
/// ```
///
/// # Example
///
/// ```no_run
/// use worktime_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// let classifier = loader.classifier();
/// assert_eq!(classifier.limits().daily_limit_minutes, 480);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/default")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - `policy.yaml` is missing
    /// - Either file contains invalid YAML or an out-of-range `week_start_day`
    /// - The limits are inconsistent
    ///
    /// # Example
    ///
    /// ```no_run
    /// use worktime_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/default")?;
    /// # Ok::<(), worktime_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let policy_path = path.join("policy.yaml");
        let policy = Self::load_yaml::<LegalHolidayPolicy>(&policy_path)?;

        // limits.yaml is optional
        let limits_path = path.join("limits.yaml");
        let limits = if limits_path.exists() {
            Self::load_yaml::<StatutoryLimits>(&limits_path)?
        } else {
            StatutoryLimits::default()
        };
        limits.validate()?;

        debug!(
            path = %path.display(),
            week_start_day = policy.week_start_index(),
            daily_limit_minutes = limits.daily_limit_minutes,
            weekly_limit_minutes = limits.weekly_limit_minutes,
            "Configuration loaded"
        );

        Ok(Self::from_config(EngineConfig::new(policy, limits)))
    }

    /// Wraps an already-built configuration.
    pub fn from_config(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the configured legal-holiday policy.
    pub fn policy(&self) -> &LegalHolidayPolicy {
        &self.config.policy
    }

    /// Returns the configured limits.
    pub fn limits(&self) -> &StatutoryLimits {
        &self.config.limits
    }

    /// Builds a classifier from the configured policy and limits.
    pub fn classifier(&self) -> WorkingTimeClassifier {
        self.classifier_with_policy(self.config.policy.clone())
    }

    /// Builds a classifier with the configured limits and a caller-supplied policy.
    pub fn classifier_with_policy(&self, policy: LegalHolidayPolicy) -> WorkingTimeClassifier {
        WorkingTimeClassifier::new(policy).with_limits(self.config.limits)
    }
}
