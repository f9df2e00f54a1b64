//! Configuration section types.

use arbor_router::RouterOptions;
pub use arbor_telemetry::LogFormat;
use serde::{Deserialize, Serialize};

/// Router behaviour flags.
///
/// Mirrors the boolean fields of [`RouterOptions`]; handler slots are code,
/// not configuration, and are left alone by [`RouterConfig::apply`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RouterConfig {
    /// Redirect when only the trailing-slash variant of a path is routed.
    #[serde(default = "default_true")]
    pub redirect_trailing_slash: bool,

    /// Redirect to a cleaned, case-folded path when it has a handle.
    #[serde(default = "default_true")]
    pub redirect_fixed_path: bool,

    /// Answer 405 when only other methods route the path.
    #[serde(default = "default_true")]
    pub handle_method_not_allowed: bool,

    /// Answer OPTIONS requests automatically.
    #[serde(default = "default_true")]
    pub handle_options: bool,

    /// Report the registered pattern as `$matchedRoutePath`.
    #[serde(default)]
    pub save_matched_route_path: bool,

    /// Pre-computed `Allow` header value, e.g. `"GET, POST, OPTIONS"`.
    #[serde(default)]
    pub global_allowed: Option<String>,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            redirect_trailing_slash: true,
            redirect_fixed_path: true,
            handle_method_not_allowed: true,
            handle_options: true,
            save_matched_route_path: false,
            global_allowed: None,
        }
    }
}

impl RouterConfig {
    /// Builds router options from this section, with empty handler slots.
    #[must_use]
    pub fn to_options<H>(&self) -> RouterOptions<H> {
        let mut options = RouterOptions::default();
        self.apply(&mut options);
        options
    }

    /// Copies these flags onto existing options, keeping their handlers.
    pub fn apply<H>(&self, options: &mut RouterOptions<H>) {
        options.redirect_trailing_slash = self.redirect_trailing_slash;
        options.redirect_fixed_path = self.redirect_fixed_path;
        options.handle_method_not_allowed = self.handle_method_not_allowed;
        options.handle_options = self.handle_options;
        options.save_matched_route_path = self.save_matched_route_path;
        options.global_allowed.clone_from(&self.global_allowed);
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Enable logging.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Filter directive (e.g. `info`, `arbor_router=debug,warn`).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log output format: `json`, `pretty` or `compact`.
    #[serde(default, with = "log_format")]
    pub format: LogFormat,

    /// Include source file and line in logs.
    #[serde(default)]
    pub include_location: bool,

    /// Include thread IDs in logs.
    #[serde(default)]
    pub thread_ids: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: default_log_level(),
            format: LogFormat::default(),
            include_location: false,
            thread_ids: false,
        }
    }
}

impl LoggingConfig {
    /// Converts this section into a logging bootstrap config.
    #[must_use]
    pub fn to_log_config(&self) -> arbor_telemetry::LogConfig {
        arbor_telemetry::LogConfig {
            enabled: self.enabled,
            level: self.level.clone(),
            format: self.format,
            file_line_info: self.include_location,
            thread_ids: self.thread_ids,
            ..arbor_telemetry::LogConfig::default()
        }
    }
}

mod log_format {
    use arbor_telemetry::LogFormat;
    use serde::{de, Deserialize, Deserializer, Serializer};

    #[allow(clippy::trivially_copy_pass_by_ref)]
    pub fn serialize<S: Serializer>(format: &LogFormat, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(format.as_str())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<LogFormat, D::Error> {
        let name = String::deserialize(deserializer)?;
        LogFormat::from_name(&name).ok_or_else(|| {
            de::Error::invalid_value(de::Unexpected::Str(&name), &"json, pretty or compact")
        })
    }
}

const fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_router_config_defaults_match_options() {
        let config = RouterConfig::default();
        let options: RouterOptions<()> = config.to_options();
        let defaults: RouterOptions<()> = RouterOptions::default();

        assert_eq!(options.redirect_trailing_slash, defaults.redirect_trailing_slash);
        assert_eq!(options.redirect_fixed_path, defaults.redirect_fixed_path);
        assert_eq!(options.handle_method_not_allowed, defaults.handle_method_not_allowed);
        assert_eq!(options.handle_options, defaults.handle_options);
        assert_eq!(options.save_matched_route_path, defaults.save_matched_route_path);
        assert_eq!(options.global_allowed, None);
    }

    #[test]
    fn test_apply_keeps_handlers() {
        let config = RouterConfig {
            handle_options: false,
            save_matched_route_path: true,
            global_allowed: Some("GET, OPTIONS".to_string()),
            ..RouterConfig::default()
        };
        let mut options = RouterOptions::new().not_found("fallback");
        config.apply(&mut options);

        assert!(!options.handle_options);
        assert!(options.save_matched_route_path);
        assert_eq!(options.global_allowed.as_deref(), Some("GET, OPTIONS"));
        assert_eq!(options.not_found, Some("fallback"));
    }

    #[test]
    fn test_router_config_partial_toml() {
        let config: RouterConfig = toml::from_str("redirect_fixed_path = false").unwrap();
        assert!(!config.redirect_fixed_path);
        assert!(config.redirect_trailing_slash);
        assert!(config.handle_options);
    }

    #[test]
    fn test_router_config_rejects_unknown_fields() {
        let result: Result<RouterConfig, _> = toml::from_str("case_insensitive = true");
        assert!(result.is_err());
    }

    #[test]
    fn test_logging_config_conversion() {
        let config = LoggingConfig {
            level: "debug".to_string(),
            format: LogFormat::Pretty,
            include_location: true,
            ..LoggingConfig::default()
        };
        let log = config.to_log_config();
        assert_eq!(log.level, "debug");
        assert_eq!(log.format, arbor_telemetry::LogFormat::Pretty);
        assert!(log.file_line_info);
        assert!(!log.thread_ids);
    }

    #[test]
    fn test_log_format_serde() {
        let config: LoggingConfig = serde_json::from_str(r#"{"format":"compact"}"#).unwrap();
        assert_eq!(config.format, LogFormat::Compact);
        assert_eq!(config.level, "info");

        let json = serde_json::to_string(&LoggingConfig::default()).unwrap();
        assert!(json.contains(r#""format":"json""#));

        let result: Result<LoggingConfig, _> = toml::from_str(r#"format = "xml""#);
        assert!(result.is_err());
    }
}
