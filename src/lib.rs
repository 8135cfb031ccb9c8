//! Logstash-style JSON logging on top of a pluggable underlying logger.
//!
//! [`StructuredLogger`] enriches every call with `@version`, `@timestamp`,
//! `module`, `host`, `message` and `level`, serializes the record to one JSON
//! line and hands it to an [`UnderlyingLogger`]. Two are bundled:
//! [`WriterLogger`] for plain `io::Write` sinks and [`TracingLogger`] for
//! applications already using `tracing`.

pub mod record;
pub mod host;
pub mod config;
pub mod backend;
pub mod writer;
pub mod tracing_backend;
pub mod init;
pub mod logger;

pub use backend::{Call, UnderlyingLogger};
pub use config::{ConfigError, ExtraConfig};
pub use logger::{LogError, StructuredLogger};
pub use record::{Fields, Severity};
pub use tracing_backend::TracingLogger;
pub use writer::{Pattern, Sink, WriterLogger};
