use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

use chrono::Local;

use crate::backend::UnderlyingLogger;
use crate::config::{ConfigError, ExtraConfig, LoggingSection};
use crate::record::Severity;

/// A write destination supplied by the caller at construction time.
pub type Sink = Box<dyn Write + Send>;

/// How a line handed to [`WriterLogger`] is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pattern {
    /// The line verbatim, followed by a newline. Used when the line is
    /// already a complete structured record.
    MessageOnly,
    /// `[prefix] HH:MM:SS.mmm ▶ LEVE message`.
    #[default]
    Default,
}

/// Underlying logger that writes rendered lines to a set of [`Sink`]s.
///
/// Lines below the configured level are dropped. Sinks are written in order
/// under a single lock so concurrent callers never interleave partial lines.
pub struct WriterLogger {
    sinks: Mutex<Vec<Sink>>,
    section: LoggingSection,
    pattern: Pattern,
}

impl WriterLogger {
    /// Build a writer logger from the `telemetry/logging` section of `cfg`.
    ///
    /// **Errors**
    /// - [`ConfigError::MissingSection`] / [`ConfigError::InvalidSection`]
    ///   when the section is absent or not an object.
    /// - [`ConfigError::UnknownLevel`] / [`ConfigError::InvalidField`] for
    ///   malformed values.
    pub fn new(cfg: &ExtraConfig, sinks: Vec<Sink>, pattern: Pattern) -> Result<Self, ConfigError> {
        let section = LoggingSection::from_config(cfg)?;

        let mut sinks = sinks;
        if section.stdout {
            sinks.push(Box::new(io::stdout()));
        }

        Ok(Self {
            sinks: Mutex::new(sinks),
            section,
            pattern,
        })
    }

    pub fn section(&self) -> &LoggingSection {
        &self.section
    }

    pub fn pattern(&self) -> Pattern {
        self.pattern
    }

    fn render(&self, severity: Severity, line: &str) -> String {
        match self.pattern {
            Pattern::MessageOnly => format!("{line}\n"),
            Pattern::Default => {
                let level = &severity.as_str()[..4];
                let time = Local::now().format("%H:%M:%S%.3f");
                match &self.section.prefix {
                    Some(prefix) => format!("{prefix} {time} ▶ {level} {line}\n"),
                    None => format!("{time} ▶ {level} {line}\n"),
                }
            }
        }
    }

    fn write(&self, severity: Severity, line: &str) {
        if severity < self.section.level {
            return;
        }
        let rendered = self.render(severity, line);

        let mut sinks = self.sinks.lock().unwrap_or_else(PoisonError::into_inner);
        for (idx, sink) in sinks.iter_mut().enumerate() {
            if let Err(e) = sink
                .write_all(rendered.as_bytes())
                .and_then(|_| sink.flush())
            {
                tracing::warn!(sink = idx, error = %e, "failed to write log line");
            }
        }
    }
}

impl UnderlyingLogger for WriterLogger {
    fn debug(&self, line: &str) {
        self.write(Severity::Debug, line);
    }

    fn info(&self, line: &str) {
        self.write(Severity::Info, line);
    }

    fn warning(&self, line: &str) {
        self.write(Severity::Warning, line);
    }

    fn error(&self, line: &str) {
        self.write(Severity::Error, line);
    }

    fn critical(&self, line: &str) {
        self.write(Severity::Critical, line);
    }

    fn fatal(&self, line: &str) {
        self.write(Severity::Critical, line);
        if self.section.exit_on_fatal {
            std::process::exit(1);
        }
    }
}
