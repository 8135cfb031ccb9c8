use std::sync::Arc;

use crate::record::Severity;

/// Destination for fully rendered JSON lines.
///
/// Implementations own the actual I/O (writers, `tracing`, a test buffer).
/// The structured logger only ever hands them a finished line and never
/// inspects the outcome, so implementations must not panic on I/O errors.
///
/// Methods are called concurrently from any thread holding the logger.
pub trait UnderlyingLogger: Send + Sync {
    fn debug(&self, line: &str);
    fn info(&self, line: &str);
    fn warning(&self, line: &str);
    fn error(&self, line: &str);
    fn critical(&self, line: &str);

    /// Log at the highest severity. Implementations may terminate the
    /// process afterwards.
    fn fatal(&self, line: &str);
}

impl<L: UnderlyingLogger + ?Sized> UnderlyingLogger for Arc<L> {
    fn debug(&self, line: &str) {
        (**self).debug(line)
    }

    fn info(&self, line: &str) {
        (**self).info(line)
    }

    fn warning(&self, line: &str) {
        (**self).warning(line)
    }

    fn error(&self, line: &str) {
        (**self).error(line)
    }

    fn critical(&self, line: &str) {
        (**self).critical(line)
    }

    fn fatal(&self, line: &str) {
        (**self).fatal(line)
    }
}

impl<L: UnderlyingLogger + ?Sized> UnderlyingLogger for Box<L> {
    fn debug(&self, line: &str) {
        (**self).debug(line)
    }

    fn info(&self, line: &str) {
        (**self).info(line)
    }

    fn warning(&self, line: &str) {
        (**self).warning(line)
    }

    fn error(&self, line: &str) {
        (**self).error(line)
    }

    fn critical(&self, line: &str) {
        (**self).critical(line)
    }

    fn fatal(&self, line: &str) {
        (**self).fatal(line)
    }
}

/// The six entry points of the logging interface.
///
/// Each maps to the [`UnderlyingLogger`] method of the same name. `Fatal` is
/// recorded as [`Severity::Critical`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Call {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
    Fatal,
}

impl Call {
    pub fn severity(self) -> Severity {
        match self {
            Call::Debug => Severity::Debug,
            Call::Info => Severity::Info,
            Call::Warning => Severity::Warning,
            Call::Error => Severity::Error,
            Call::Critical | Call::Fatal => Severity::Critical,
        }
    }

    /// Forward `line` to the matching method of `backend`.
    pub fn dispatch<L: UnderlyingLogger + ?Sized>(self, backend: &L, line: &str) {
        match self {
            Call::Debug => backend.debug(line),
            Call::Info => backend.info(line),
            Call::Warning => backend.warning(line),
            Call::Error => backend.error(line),
            Call::Critical => backend.critical(line),
            Call::Fatal => backend.fatal(line),
        }
    }
}
