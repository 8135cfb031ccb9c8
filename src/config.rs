use crate::record::Severity;
use serde_json::{Map, Value};

/// Free-form configuration handed to the logger at construction.
///
/// Logging options live in a nested object under [`NAMESPACE`]; everything
/// else is ignored by this crate.
pub type ExtraConfig = Map<String, Value>;

/// Key of the logging section inside an [`ExtraConfig`].
pub const NAMESPACE: &str = "telemetry/logging";

/// Section key carrying the service name.
pub const PREFIX_KEY: &str = "prefix";
pub const LEVEL_KEY: &str = "level";
pub const STDOUT_KEY: &str = "stdout";
pub const EXIT_ON_FATAL_KEY: &str = "exit_on_fatal";

/// Service name used when the section carries no `prefix`.
pub const DEFAULT_SERVICE_NAME: &str = "SERVICE";

/// Overrides the service name (`prefix`) of the logging section.
pub const LOGSTASH_JSON_PREFIX_ENV: &str = "LOGSTASH_JSON_PREFIX";

/// Overrides the minimum level of the logging section.
pub const LOGSTASH_JSON_LEVEL_ENV: &str = "LOGSTASH_JSON_LEVEL";

/// Error type returned when the logging section cannot be used.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("malformed configuration: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("configuration root must be a JSON object")]
    NotAnObject,

    #[error("missing `telemetry/logging` configuration section")]
    MissingSection,

    #[error("`telemetry/logging` configuration section must be an object")]
    InvalidSection,

    #[error("unknown log level: {0}")]
    UnknownLevel(String),

    #[error("`{key}` must be a {expected}")]
    InvalidField {
        key: &'static str,
        expected: &'static str,
    },
}

/// Parse a JSON document into an [`ExtraConfig`].
pub fn parse_config(json: &str) -> Result<ExtraConfig, ConfigError> {
    match serde_json::from_str::<Value>(json)? {
        Value::Object(map) => Ok(map),
        _ => Err(ConfigError::NotAnObject),
    }
}

/// Take the service name out of the logging section.
///
/// The `prefix` key is removed from the section whether or not it holds a
/// string, so the underlying logger never sees it. Falls back to
/// [`DEFAULT_SERVICE_NAME`].
pub fn extract_service_name(cfg: &mut ExtraConfig) -> String {
    let prefix = cfg
        .get_mut(NAMESPACE)
        .and_then(Value::as_object_mut)
        .and_then(|section| section.remove(PREFIX_KEY));

    match prefix {
        Some(Value::String(name)) => name,
        _ => DEFAULT_SERVICE_NAME.to_string(),
    }
}

/// Overlay the `LOGSTASH_JSON_*` environment variables onto the logging
/// section, creating it when absent.
pub fn apply_env_overrides(cfg: &mut ExtraConfig) {
    apply_overrides(cfg, |key| std::env::var(key).ok());
}

fn apply_overrides(cfg: &mut ExtraConfig, lookup: impl Fn(&str) -> Option<String>) {
    let overrides = [
        (PREFIX_KEY, lookup(LOGSTASH_JSON_PREFIX_ENV)),
        (LEVEL_KEY, lookup(LOGSTASH_JSON_LEVEL_ENV)),
    ];
    if overrides.iter().all(|(_, v)| v.is_none()) {
        return;
    }

    let entry = cfg
        .entry(NAMESPACE.to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    if !entry.is_object() {
        *entry = Value::Object(Map::new());
    }
    if let Value::Object(section) = entry {
        for (key, value) in overrides {
            if let Some(value) = value {
                section.insert(key.to_string(), Value::String(value));
            }
        }
    }
}

/// Typed view of the logging section, as read by the bundled underlying
/// loggers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingSection {
    /// Minimum severity that gets written.
    pub level: Severity,
    /// Also write every line to standard output.
    pub stdout: bool,
    /// Terminate the process after a fatal call.
    pub exit_on_fatal: bool,
    /// Prefix still present in the section, if the caller left one.
    pub prefix: Option<String>,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: Severity::Debug,
            stdout: false,
            exit_on_fatal: true,
            prefix: None,
        }
    }
}

impl LoggingSection {
    pub fn from_config(cfg: &ExtraConfig) -> Result<Self, ConfigError> {
        let section = cfg
            .get(NAMESPACE)
            .ok_or(ConfigError::MissingSection)?
            .as_object()
            .ok_or(ConfigError::InvalidSection)?;

        let mut out = LoggingSection::default();

        if let Some(level) = section.get(LEVEL_KEY) {
            let level = level.as_str().ok_or(ConfigError::InvalidField {
                key: LEVEL_KEY,
                expected: "string",
            })?;
            out.level = level
                .parse()
                .map_err(|_| ConfigError::UnknownLevel(level.to_string()))?;
        }
        if let Some(stdout) = section.get(STDOUT_KEY) {
            out.stdout = bool_field(stdout, STDOUT_KEY)?;
        }
        if let Some(exit) = section.get(EXIT_ON_FATAL_KEY) {
            out.exit_on_fatal = bool_field(exit, EXIT_ON_FATAL_KEY)?;
        }
        out.prefix = section
            .get(PREFIX_KEY)
            .and_then(Value::as_str)
            .map(str::to_string);

        Ok(out)
    }
}

fn bool_field(value: &Value, key: &'static str) -> Result<bool, ConfigError> {
    value.as_bool().ok_or(ConfigError::InvalidField {
        key,
        expected: "boolean",
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn cfg(v: Value) -> ExtraConfig {
        v.as_object().cloned().unwrap()
    }

    #[test]
    fn service_name_comes_from_prefix_and_is_removed() {
        let mut c = cfg(json!({ NAMESPACE: { "prefix": "AUTH", "level": "INFO" } }));
        assert_eq!(extract_service_name(&mut c), "AUTH");
        assert!(c[NAMESPACE].get("prefix").is_none());
        assert_eq!(c[NAMESPACE]["level"], json!("INFO"));
    }

    #[test]
    fn service_name_defaults_without_section_or_prefix() {
        let mut empty = ExtraConfig::new();
        assert_eq!(extract_service_name(&mut empty), DEFAULT_SERVICE_NAME);

        let mut no_prefix = cfg(json!({ NAMESPACE: { "level": "INFO" } }));
        assert_eq!(extract_service_name(&mut no_prefix), DEFAULT_SERVICE_NAME);
    }

    #[test]
    fn non_string_prefix_is_removed_and_defaults() {
        let mut c = cfg(json!({ NAMESPACE: { "prefix": 12 } }));
        assert_eq!(extract_service_name(&mut c), DEFAULT_SERVICE_NAME);
        assert!(c[NAMESPACE].get("prefix").is_none());
    }

    #[test]
    fn parse_config_requires_an_object() {
        assert!(parse_config(r#"{"a": 1}"#).is_ok());
        assert!(matches!(parse_config("[1, 2]"), Err(ConfigError::NotAnObject)));
        assert!(matches!(parse_config("{"), Err(ConfigError::Malformed(_))));
    }

    #[test]
    fn section_defaults() {
        let c = cfg(json!({ NAMESPACE: {} }));
        assert_eq!(LoggingSection::from_config(&c).unwrap(), LoggingSection::default());
    }

    #[test]
    fn section_reads_known_keys() {
        let c = cfg(json!({ NAMESPACE: {
            "level": "warn",
            "stdout": true,
            "exit_on_fatal": false,
            "prefix": "[API]",
            "unknown": "ignored"
        }}));
        let s = LoggingSection::from_config(&c).unwrap();
        assert_eq!(s.level, Severity::Warning);
        assert!(s.stdout);
        assert!(!s.exit_on_fatal);
        assert_eq!(s.prefix.as_deref(), Some("[API]"));
    }

    #[test]
    fn section_errors() {
        assert!(matches!(
            LoggingSection::from_config(&ExtraConfig::new()),
            Err(ConfigError::MissingSection)
        ));
        assert!(matches!(
            LoggingSection::from_config(&cfg(json!({ NAMESPACE: "x" }))),
            Err(ConfigError::InvalidSection)
        ));
        assert!(matches!(
            LoggingSection::from_config(&cfg(json!({ NAMESPACE: { "level": "LOUD" } }))),
            Err(ConfigError::UnknownLevel(l)) if l == "LOUD"
        ));
        assert!(matches!(
            LoggingSection::from_config(&cfg(json!({ NAMESPACE: { "stdout": "yes" } }))),
            Err(ConfigError::InvalidField { key: "stdout", .. })
        ));
    }

    #[test]
    fn overrides_create_the_section() {
        let mut c = ExtraConfig::new();
        apply_overrides(&mut c, |key| match key {
            LOGSTASH_JSON_PREFIX_ENV => Some("BILLING".to_string()),
            _ => None,
        });
        assert_eq!(c[NAMESPACE], json!({ "prefix": "BILLING" }));
    }

    #[test]
    fn overrides_replace_existing_values() {
        let mut c = cfg(json!({ NAMESPACE: { "level": "DEBUG", "stdout": true } }));
        apply_overrides(&mut c, |key| match key {
            LOGSTASH_JSON_LEVEL_ENV => Some("ERROR".to_string()),
            _ => None,
        });
        assert_eq!(c[NAMESPACE], json!({ "level": "ERROR", "stdout": true }));
    }

    #[test]
    fn no_overrides_leave_config_untouched() {
        let mut c = ExtraConfig::new();
        apply_overrides(&mut c, |_| None);
        assert!(c.is_empty());
    }
}
