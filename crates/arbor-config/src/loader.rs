//! Layered configuration loading.

use std::env;
use std::fs;
use std::path::Path;

use crate::{ArborConfig, ConfigError, LogFormat};

/// Configuration loader.
///
/// Later layers override earlier ones:
/// 1. Defaults
/// 2. Configuration file or string (TOML or JSON)
/// 3. Environment variables (`PREFIX__SECTION__KEY`)
///
/// # Example
///
/// ```no_run
/// use arbor_config::ConfigLoader;
///
/// # fn main() -> Result<(), arbor_config::ConfigError> {
/// let config = ConfigLoader::new()
///     .with_defaults()
///     .with_optional_file("arbor.toml")?
///     .with_dotenv()?
///     .with_env_prefix("ARBOR")
///     .load()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ConfigLoader {
    config: ArborConfig,
    env_prefix: Option<String>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Creates a loader seeded with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: ArborConfig::default(),
            env_prefix: None,
        }
    }

    /// Resets to default values.
    #[must_use]
    pub fn with_defaults(mut self) -> Self {
        self.config = ArborConfig::default();
        self
    }

    /// Resets to the development preset.
    #[must_use]
    pub fn with_development(mut self) -> Self {
        self.config = ArborConfig::development();
        self
    }

    /// Loads a `.toml` or `.json` file, chosen by extension.
    ///
    /// Sections missing from the file take their default values.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::file_not_found(path));
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::read_error(path, e))?;

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);
        self.config = match extension.as_deref() {
            Some("toml") => toml::from_str(&content)?,
            Some("json") => serde_json::from_str(&content)?,
            _ => {
                return Err(ConfigError::validation_error(format!(
                    "unsupported configuration file format: {}",
                    path.display()
                )))
            }
        };

        Ok(self)
    }

    /// Like [`with_file`](Self::with_file), but a missing file is skipped.
    pub fn with_optional_file<P: AsRef<Path>>(self, path: P) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            self.with_file(path)
        } else {
            Ok(self)
        }
    }

    /// Loads configuration from a string in the given format (`toml` or `json`).
    ///
    /// # Example
    ///
    /// ```
    /// use arbor_config::ConfigLoader;
    ///
    /// let config = ConfigLoader::new()
    ///     .with_string("[router]\nhandle_options = false\n", "toml")
    ///     .unwrap()
    ///     .load()
    ///     .unwrap();
    ///
    /// assert!(!config.router.handle_options);
    /// ```
    pub fn with_string(mut self, content: &str, format: &str) -> Result<Self, ConfigError> {
        self.config = match format.to_lowercase().as_str() {
            "toml" => toml::from_str(content)?,
            "json" => serde_json::from_str(content)?,
            _ => {
                return Err(ConfigError::validation_error(format!(
                    "unsupported configuration format: {format}"
                )))
            }
        };
        Ok(self)
    }

    /// Enables environment overrides, e.g. with prefix `ARBOR`:
    /// - `ARBOR__ROUTER__REDIRECT_TRAILING_SLASH=false`
    /// - `ARBOR__LOGGING__LEVEL=arbor_router=debug`
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_uppercase());
        self
    }

    /// Loads variables from a `.env` file into the process environment.
    ///
    /// A missing `.env` file is not an error.
    pub fn with_dotenv(self) -> Result<Self, ConfigError> {
        match dotenvy::dotenv() {
            Ok(_) => Ok(self),
            Err(e) if e.not_found() => Ok(self),
            Err(e) => Err(ConfigError::validation_error(format!(
                "failed to load .env file: {e}"
            ))),
        }
    }

    /// Applies environment overrides and validates.
    pub fn load(mut self) -> Result<ArborConfig, ConfigError> {
        if let Some(prefix) = self.env_prefix.take() {
            let vars: Vec<(String, String)> = env::vars()
                .filter(|(k, _)| k.starts_with(&prefix))
                .collect();
            for (key, value) in vars {
                self.apply_env_var(&key, &value, &prefix)?;
            }
        }

        self.config.validate()?;
        Ok(self.config)
    }

    /// Returns the configuration without env overrides or validation.
    #[must_use]
    pub fn load_unvalidated(self) -> ArborConfig {
        self.config
    }

    fn apply_env_var(&mut self, key: &str, value: &str, prefix: &str) -> Result<(), ConfigError> {
        let Some(rest) = key.strip_prefix(prefix).and_then(|k| k.strip_prefix("__")) else {
            // e.g. ARBORETUM_HOME shares the prefix but not the separator
            return Ok(());
        };

        let parts: Vec<&str> = rest.split("__").collect();
        let bool_value = || {
            parse_bool(value).ok_or_else(|| ConfigError::env_parse_error(key, "expected boolean"))
        };

        let router = &mut self.config.router;
        let logging = &mut self.config.logging;
        match parts.as_slice() {
            ["ROUTER", "REDIRECT_TRAILING_SLASH"] => router.redirect_trailing_slash = bool_value()?,
            ["ROUTER", "REDIRECT_FIXED_PATH"] => router.redirect_fixed_path = bool_value()?,
            ["ROUTER", "HANDLE_METHOD_NOT_ALLOWED"] => {
                router.handle_method_not_allowed = bool_value()?;
            }
            ["ROUTER", "HANDLE_OPTIONS"] => router.handle_options = bool_value()?,
            ["ROUTER", "SAVE_MATCHED_ROUTE_PATH"] => router.save_matched_route_path = bool_value()?,
            ["ROUTER", "GLOBAL_ALLOWED"] => {
                router.global_allowed = if value.is_empty() {
                    None
                } else {
                    Some(value.to_string())
                };
            }

            ["LOGGING", "ENABLED"] => logging.enabled = bool_value()?,
            ["LOGGING", "LEVEL"] => logging.level = value.to_string(),
            ["LOGGING", "FORMAT"] => {
                logging.format = LogFormat::from_name(value).ok_or_else(|| {
                    ConfigError::env_parse_error(key, "expected 'json', 'pretty' or 'compact'")
                })?;
            }
            ["LOGGING", "INCLUDE_LOCATION"] => logging.include_location = bool_value()?,
            ["LOGGING", "THREAD_IDS"] => logging.thread_ids = bool_value()?,

            _ => {}
        }

        Ok(())
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn apply(pairs: &[(&str, &str)]) -> Result<ArborConfig, ConfigError> {
        let mut loader = ConfigLoader::new();
        for (key, value) in pairs {
            loader.apply_env_var(key, value, "ARBOR")?;
        }
        Ok(loader.load_unvalidated())
    }

    #[test]
    fn test_loader_new() {
        let config = ConfigLoader::new().load().unwrap();
        assert_eq!(config, ArborConfig::default());
    }

    #[test]
    fn test_loader_with_development() {
        let config = ConfigLoader::new().with_development().load().unwrap();
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert!(config.router.save_matched_route_path);

        let config = ConfigLoader::new()
            .with_development()
            .with_defaults()
            .load()
            .unwrap();
        assert_eq!(config, ArborConfig::default());
    }

    #[test]
    fn test_loader_with_string_json() {
        let json = r#"{"router": {"redirect_fixed_path": false}, "logging": {"level": "warn"}}"#;
        let config = ConfigLoader::new()
            .with_string(json, "JSON")
            .unwrap()
            .load()
            .unwrap();
        assert!(!config.router.redirect_fixed_path);
        assert!(config.router.redirect_trailing_slash);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_loader_with_string_unsupported() {
        let result = ConfigLoader::new().with_string("router: {}", "yaml");
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_loader_with_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        let content = r#"
            [router]
            save_matched_route_path = true
            global_allowed = "GET, POST"

            [logging]
            format = "compact"
        "#;
        file.write_all(content.as_bytes()).unwrap();

        let config = ConfigLoader::new()
            .with_file(file.path())
            .unwrap()
            .load()
            .unwrap();
        assert!(config.router.save_matched_route_path);
        assert_eq!(config.router.global_allowed.as_deref(), Some("GET, POST"));
        assert_eq!(config.logging.format, LogFormat::Compact);
    }

    #[test]
    fn test_loader_with_json_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"router": {{"handle_options": false}}}}"#).unwrap();

        let config = ConfigLoader::new()
            .with_file(file.path())
            .unwrap()
            .load()
            .unwrap();
        assert!(!config.router.handle_options);
    }

    #[test]
    fn test_loader_unknown_extension() {
        let file = tempfile::Builder::new().suffix(".ini").tempfile().unwrap();
        let result = ConfigLoader::new().with_file(file.path());
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_loader_unknown_field_in_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[router]\ncase_insensitive = true").unwrap();

        let result = ConfigLoader::new().with_file(file.path());
        assert!(matches!(result, Err(ConfigError::TomlError(_))));
    }

    #[test]
    fn test_loader_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        let result = ConfigLoader::new().with_file(&path);
        assert!(matches!(result, Err(ConfigError::FileNotFound { .. })));

        let config = ConfigLoader::new()
            .with_optional_file(&path)
            .unwrap()
            .load()
            .unwrap();
        assert_eq!(config, ArborConfig::default());
    }

    #[test]
    fn test_env_router_overrides() {
        let config = apply(&[
            ("ARBOR__ROUTER__REDIRECT_TRAILING_SLASH", "false"),
            ("ARBOR__ROUTER__HANDLE_METHOD_NOT_ALLOWED", "off"),
            ("ARBOR__ROUTER__SAVE_MATCHED_ROUTE_PATH", "1"),
            ("ARBOR__ROUTER__GLOBAL_ALLOWED", "GET, HEAD"),
        ])
        .unwrap();

        assert!(!config.router.redirect_trailing_slash);
        assert!(!config.router.handle_method_not_allowed);
        assert!(config.router.save_matched_route_path);
        assert!(config.router.redirect_fixed_path);
        assert_eq!(config.router.global_allowed.as_deref(), Some("GET, HEAD"));
    }

    #[test]
    fn test_env_logging_overrides() {
        let config = apply(&[
            ("ARBOR__LOGGING__LEVEL", "arbor_router=debug"),
            ("ARBOR__LOGGING__FORMAT", "Pretty"),
            ("ARBOR__LOGGING__THREAD_IDS", "yes"),
        ])
        .unwrap();

        assert_eq!(config.logging.level, "arbor_router=debug");
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert!(config.logging.thread_ids);
    }

    #[test]
    fn test_env_parse_errors() {
        let err = apply(&[("ARBOR__ROUTER__HANDLE_OPTIONS", "maybe")]).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::EnvParseError { var, .. } if var == "ARBOR__ROUTER__HANDLE_OPTIONS"
        ));

        let err = apply(&[("ARBOR__LOGGING__FORMAT", "xml")]).unwrap_err();
        assert!(matches!(err, ConfigError::EnvParseError { .. }));
    }

    #[test]
    fn test_env_unrelated_keys_ignored() {
        let config = apply(&[
            ("ARBORETUM_HOME", "/srv"),
            ("ARBOR__SERVER__PORT", "8080"),
        ])
        .unwrap();
        assert_eq!(config, ArborConfig::default());
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool("no"), Some(false));
        assert_eq!(parse_bool("2"), None);
    }
}
