use crate::backend::UnderlyingLogger;

/// Target of events emitted for debug/info/warning/error lines.
pub const DEFAULT_TARGET: &str = "logstash_json";
/// Target of events emitted for critical lines.
pub const CRITICAL_TARGET: &str = "logstash_json::critical";
/// Target of events emitted for fatal lines.
pub const FATAL_TARGET: &str = "logstash_json::fatal";

/// Underlying logger that turns every line into a `tracing` event.
///
/// `tracing` has no level above `ERROR`, so critical and fatal lines are
/// emitted at `ERROR` under their own targets. Pair with
/// [`crate::init::init_message_only`] to print only the JSON body.
/// Never terminates the process.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl UnderlyingLogger for TracingLogger {
    fn debug(&self, line: &str) {
        tracing::debug!(target: DEFAULT_TARGET, "{line}");
    }

    fn info(&self, line: &str) {
        tracing::info!(target: DEFAULT_TARGET, "{line}");
    }

    fn warning(&self, line: &str) {
        tracing::warn!(target: DEFAULT_TARGET, "{line}");
    }

    fn error(&self, line: &str) {
        tracing::error!(target: DEFAULT_TARGET, "{line}");
    }

    fn critical(&self, line: &str) {
        tracing::error!(target: CRITICAL_TARGET, "{line}");
    }

    fn fatal(&self, line: &str) {
        tracing::error!(target: FATAL_TARGET, "{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::layer::SubscriberExt;

    #[derive(Clone, Default)]
    struct TestWriter(Arc<Mutex<Vec<u8>>>);

    impl TestWriter {
        fn output(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).to_string()
        }
    }

    impl Write for TestWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for TestWriter {
        type Writer = Self;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn message_only_output_is_the_line() {
        let writer = TestWriter::default();
        let subscriber = tracing_subscriber::registry()
            .with(crate::init::message_only_layer(writer.clone()));

        tracing::subscriber::with_default(subscriber, || {
            TracingLogger.info(r#"{"level":"INFO"}"#);
            TracingLogger.warning(r#"{"level":"WARNING"}"#);
        });

        let lines: Vec<String> = writer.output().lines().map(|l| l.trim().to_string()).collect();
        assert_eq!(lines, vec![r#"{"level":"INFO"}"#, r#"{"level":"WARNING"}"#]);
    }

    #[test]
    fn critical_and_fatal_use_dedicated_targets() {
        let writer = TestWriter::default();
        let layer = tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .without_time()
            .with_writer(writer.clone());
        let subscriber = tracing_subscriber::registry().with(layer);

        tracing::subscriber::with_default(subscriber, || {
            TracingLogger.critical("c");
            TracingLogger.fatal("f");
        });

        let out = writer.output();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("ERROR") && lines[0].contains(CRITICAL_TARGET), "{out}");
        assert!(lines[1].contains("ERROR") && lines[1].contains(FATAL_TARGET), "{out}");
    }
}
