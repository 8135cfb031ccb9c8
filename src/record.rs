use chrono::{DateTime, Local};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Free-form caller fields merged into a record.
pub type Fields = Map<String, Value>;

pub const VERSION_KEY: &str = "@version";
pub const TIMESTAMP_KEY: &str = "@timestamp";
pub const MODULE_KEY: &str = "module";
pub const HOST_KEY: &str = "host";
pub const MESSAGE_KEY: &str = "message";
pub const LEVEL_KEY: &str = "level";

/// Keys owned by the enrichment step; caller fields with these names are
/// overwritten.
pub const RESERVED_KEYS: [&str; 6] = [
    VERSION_KEY,
    TIMESTAMP_KEY,
    MODULE_KEY,
    HOST_KEY,
    MESSAGE_KEY,
    LEVEL_KEY,
];

pub const RECORD_VERSION: u64 = 1;

/// Local time with microseconds and a `+HH:MM` offset.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f%:z";

/// Severity written into the `level` field, ordered from least to most
/// important.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl Severity {
    pub const ALL: [Severity; 5] = [
        Severity::Debug,
        Severity::Info,
        Severity::Warning,
        Severity::Error,
        Severity::Critical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
            Severity::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a level string does not name a [`Severity`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown severity: {0}")]
pub struct UnknownSeverity(pub String);

impl FromStr for Severity {
    type Err = UnknownSeverity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DEBUG" => Ok(Severity::Debug),
            "INFO" => Ok(Severity::Info),
            "WARNING" | "WARN" => Ok(Severity::Warning),
            "ERROR" => Ok(Severity::Error),
            "CRITICAL" => Ok(Severity::Critical),
            _ => Err(UnknownSeverity(s.to_string())),
        }
    }
}

/// A single enriched log entry.
///
/// Built from the caller's fields (possibly empty), enriched with the
/// reserved keys and serialized to one JSON line. Never retained past the
/// call that built it.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct LogRecord {
    fields: Fields,
}

impl LogRecord {
    pub fn from_fields(base: Fields) -> Self {
        Self { fields: base }
    }

    /// Write the reserved keys over whatever the caller supplied.
    pub fn enrich(
        mut self,
        timestamp: &DateTime<Local>,
        module: &str,
        host: &str,
        message: &str,
        level: Severity,
    ) -> Self {
        let f = &mut self.fields;
        f.insert(VERSION_KEY.to_string(), Value::from(RECORD_VERSION));
        f.insert(TIMESTAMP_KEY.to_string(), Value::String(format_timestamp(timestamp)));
        f.insert(MODULE_KEY.to_string(), Value::String(module.to_string()));
        f.insert(HOST_KEY.to_string(), Value::String(host.to_string()));
        f.insert(MESSAGE_KEY.to_string(), Value::String(message.to_string()));
        f.insert(LEVEL_KEY.to_string(), Value::String(level.as_str().to_string()));
        self
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    /// Serialize to a single-line JSON object.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.fields)
    }
}

pub fn format_timestamp(ts: &DateTime<Local>) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}
