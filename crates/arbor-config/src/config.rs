//! Top-level configuration.

use serde::{Deserialize, Serialize};

use crate::{ConfigError, LogFormat, LoggingConfig, RouterConfig};

/// Complete arbor configuration.
///
/// # Example
///
/// ```
/// use arbor_config::ArborConfig;
///
/// let config = ArborConfig::default();
/// assert!(config.router.redirect_trailing_slash);
/// assert_eq!(config.logging.level, "info");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct ArborConfig {
    /// Router behaviour flags.
    #[serde(default)]
    pub router: RouterConfig,

    /// Logging setup.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ArborConfig {
    /// Debug-level pretty logging and matched route paths recorded.
    #[must_use]
    pub fn development() -> Self {
        Self {
            router: RouterConfig {
                save_matched_route_path: true,
                ..RouterConfig::default()
            },
            logging: LoggingConfig {
                level: "debug".to_string(),
                format: LogFormat::Pretty,
                include_location: true,
                ..LoggingConfig::default()
            },
        }
    }

    /// Defaults, with JSON logging at info level.
    #[must_use]
    pub fn production() -> Self {
        Self::default()
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if:
    /// - logging is enabled and `logging.level` is not a valid filter
    /// - `router.global_allowed` has an empty or malformed method entry
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.logging.enabled {
            arbor_telemetry::create_env_filter(&self.logging.level)
                .map_err(|e| ConfigError::invalid_value("logging.level", e.to_string()))?;
        }

        if let Some(allowed) = &self.router.global_allowed {
            for method in allowed.split(',').map(str::trim) {
                if method.is_empty() || !method.bytes().all(|b| b.is_ascii_alphabetic()) {
                    return Err(ConfigError::invalid_value(
                        "router.global_allowed",
                        format!("invalid method '{method}' in '{allowed}'"),
                    ));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(ArborConfig::default().validate().is_ok());
        assert!(ArborConfig::development().validate().is_ok());
        assert_eq!(ArborConfig::production(), ArborConfig::default());
    }

    #[test]
    fn test_invalid_log_level() {
        let mut config = ArborConfig::default();
        config.logging.level = "arbor=[[[".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field, .. }) if field == "logging.level"
        ));

        config.logging.enabled = false;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_global_allowed_validation() {
        let mut config = ArborConfig::default();
        config.router.global_allowed = Some("GET, POST, OPTIONS".to_string());
        assert!(config.validate().is_ok());

        config.router.global_allowed = Some("GET,,POST".to_string());
        assert!(config.validate().is_err());

        config.router.global_allowed = Some("GET, /users".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_section_rejected() {
        let result: Result<ArborConfig, _> = toml::from_str("[server]\nport = 8080\n");
        assert!(result.is_err());
    }
}
