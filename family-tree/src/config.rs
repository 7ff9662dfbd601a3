//! Store configuration
//!
//! Read from JSON (`{"max_age": 120}`) or from the environment, where
//! `FAMILY_TREE_MAX_AGE` overrides the default.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

pub const MAX_AGE_ENV: &str = "FAMILY_TREE_MAX_AGE";

const DEFAULT_MAX_AGE: i32 = 120;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("FAMILY_TREE_MAX_AGE must be an integer, got '{0}'")]
    InvalidEnv(String),
    #[error("max_age must be greater than 0, got {0}")]
    InvalidMaxAge(i32),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    /// Upper bound of the valid age range `[0, max_age]`.
    pub max_age: i32,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            max_age: DEFAULT_MAX_AGE,
        }
    }
}

impl TreeConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_json_str(&std::fs::read_to_string(path)?)
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_max_age_override(std::env::var(MAX_AGE_ENV).ok().as_deref())
    }

    /// Apply a raw `max_age` override, as found in the environment.
    pub fn with_max_age_override(mut self, raw: Option<&str>) -> Result<Self, ConfigError> {
        if let Some(raw) = raw {
            self.max_age = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidEnv(raw.to_string()))?;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_age < 1 {
            return Err(ConfigError::InvalidMaxAge(self.max_age));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TreeConfig::from_json_str("{}").unwrap();
        assert_eq!(config, TreeConfig::default());
        assert_eq!(config.max_age, 120);
    }

    #[test]
    fn test_json_max_age() {
        let config = TreeConfig::from_json_str(r#"{"max_age": 100}"#).unwrap();
        assert_eq!(config.max_age, 100);
        assert!(matches!(
            TreeConfig::from_json_str(r#"{"max_age": 0}"#),
            Err(ConfigError::InvalidMaxAge(0))
        ));
        assert!(matches!(
            TreeConfig::from_json_str("not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_env_override() {
        let config = TreeConfig::default()
            .with_max_age_override(Some(" 150 "))
            .unwrap();
        assert_eq!(config.max_age, 150);

        let untouched = TreeConfig::default().with_max_age_override(None).unwrap();
        assert_eq!(untouched.max_age, 120);

        assert!(matches!(
            TreeConfig::default().with_max_age_override(Some("old")),
            Err(ConfigError::InvalidEnv(raw)) if raw == "old"
        ));
        assert!(matches!(
            TreeConfig::default().with_max_age_override(Some("-5")),
            Err(ConfigError::InvalidMaxAge(-5))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            TreeConfig::load("/nonexistent/family-tree.json"),
            Err(ConfigError::Io(_))
        ));
    }
}
