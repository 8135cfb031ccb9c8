use chrono::Local;
use serde::Serialize;
use serde_json::Value;

use crate::backend::{Call, UnderlyingLogger};
use crate::config::{extract_service_name, ConfigError, ExtraConfig};
use crate::host::resolve_hostname;
use crate::record::{Fields, LogRecord};
use crate::writer::{Pattern, Sink, WriterLogger};

/// Why a log call produced no output.
#[derive(thiserror::Error, Debug)]
pub enum LogError {
    /// No message, or the first positional argument was not a string.
    #[error("nothing to log")]
    NothingToLog,

    #[error("failed to serialize log record: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}

/// Logger that turns every call into a logstash-style JSON line.
///
/// Each record carries `@version`, `@timestamp`, `module`, `host`, `message`
/// and `level`, plus any caller fields that do not collide with them. The
/// finished line is handed to the same-named method of the underlying
/// logger `L`.
///
/// The per-severity methods ([`debug`](Self::debug) .. [`fatal`](Self::fatal))
/// never report failures. Use [`log`](Self::log),
/// [`log_serialized`](Self::log_serialized) or [`log_args`](Self::log_args)
/// to observe them.
pub struct StructuredLogger<L = WriterLogger> {
    backend: L,
    service_name: String,
    host: String,
}

impl StructuredLogger<WriterLogger> {
    /// Build a logger writing to `sinks`.
    ///
    /// **Parameters**
    /// - `cfg`: configuration whose `telemetry/logging` section provides the
    ///   service name (`prefix`) and the writer options.
    /// - `sinks`: write destinations, passed unchanged to [`WriterLogger`].
    ///
    /// **Errors**
    /// - Any [`ConfigError`] raised by [`WriterLogger::new`].
    pub fn new(cfg: ExtraConfig, sinks: Vec<Sink>) -> Result<Self, ConfigError> {
        Self::from_config_with(cfg, |cfg| WriterLogger::new(cfg, sinks, Pattern::MessageOnly))
    }
}

impl<L: UnderlyingLogger> StructuredLogger<L> {
    /// Extract the service name from `cfg`, then build the underlying logger
    /// with `init` from the remaining configuration.
    ///
    /// `init` never sees the `prefix` key. Its error is returned unchanged.
    pub fn from_config_with<F, E>(mut cfg: ExtraConfig, init: F) -> Result<Self, E>
    where
        F: FnOnce(&ExtraConfig) -> Result<L, E>,
    {
        let service_name = extract_service_name(&mut cfg);
        let backend = init(&cfg)?;
        let host = resolve_hostname();

        tracing::debug!(service = %service_name, host = %host, "structured logger ready");
        Ok(Self::with_backend(service_name, host, backend))
    }

    pub fn with_backend(service_name: impl Into<String>, host: impl Into<String>, backend: L) -> Self {
        Self {
            backend,
            service_name: service_name.into(),
            host: host.into(),
        }
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn backend(&self) -> &L {
        &self.backend
    }

    /// Enrich `fields` and forward the record through `call`.
    pub fn log(&self, call: Call, message: &str, fields: Option<Fields>) -> Result<(), LogError> {
        self.emit(call, message, fields.unwrap_or_default())
    }

    /// Like [`log`](Self::log), with the extras taken from any serializable
    /// value. Values that do not serialize to a JSON object add no fields.
    pub fn log_serialized<T>(&self, call: Call, message: &str, extras: &T) -> Result<(), LogError>
    where
        T: Serialize + ?Sized,
    {
        let base = match serde_json::to_value(extras)? {
            Value::Object(map) => map,
            _ => Fields::new(),
        };
        self.emit(call, message, base)
    }

    /// Positional form: `args[0]` is the message, an optional `args[1]`
    /// object provides the extra fields. Further arguments are ignored.
    pub fn log_args(&self, call: Call, args: &[Value]) -> Result<(), LogError> {
        let message = args
            .first()
            .and_then(Value::as_str)
            .ok_or(LogError::NothingToLog)?;
        let base = args
            .get(1)
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();
        self.emit(call, message, base)
    }

    pub fn debug(&self, message: &str, fields: Option<Fields>) {
        self.log_quietly(Call::Debug, message, fields);
    }

    pub fn info(&self, message: &str, fields: Option<Fields>) {
        self.log_quietly(Call::Info, message, fields);
    }

    pub fn warning(&self, message: &str, fields: Option<Fields>) {
        self.log_quietly(Call::Warning, message, fields);
    }

    pub fn error(&self, message: &str, fields: Option<Fields>) {
        self.log_quietly(Call::Error, message, fields);
    }

    pub fn critical(&self, message: &str, fields: Option<Fields>) {
        self.log_quietly(Call::Critical, message, fields);
    }

    /// Recorded as `CRITICAL`, forwarded to the underlying `fatal`, which may
    /// terminate the process.
    pub fn fatal(&self, message: &str, fields: Option<Fields>) {
        self.log_quietly(Call::Fatal, message, fields);
    }

    fn log_quietly(&self, call: Call, message: &str, fields: Option<Fields>) {
        if let Err(e) = self.log(call, message, fields) {
            tracing::trace!(error = %e, "dropped log call");
        }
    }

    fn emit(&self, call: Call, message: &str, base: Fields) -> Result<(), LogError> {
        let line = LogRecord::from_fields(base)
            .enrich(
                &Local::now(),
                &self.service_name,
                &self.host,
                message,
                call.severity(),
            )
            .to_json()?;
        call.dispatch(&self.backend, &line);
        Ok(())
    }
}
