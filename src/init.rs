use crate::tracing_backend::{CRITICAL_TARGET, DEFAULT_TARGET, FATAL_TARGET};
use tracing::subscriber::SetGlobalDefaultError;
use tracing::Subscriber;
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{Layer, Registry};

/// `fmt` layer that prints only the event message: no time, level, target
/// or colors.
///
/// Only events emitted by [`crate::tracing_backend::TracingLogger`] pass;
/// the crate's own diagnostics and the host application's events are left to
/// other layers.
pub fn message_only_layer<S, W>(writer: W) -> impl Layer<S>
where
    S: Subscriber + for<'span> LookupSpan<'span>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt::layer()
        .without_time()
        .with_level(false)
        .with_target(false)
        .with_ansi(false)
        .with_writer(writer)
        .with_filter(filter_fn(|meta| {
            matches!(meta.target(), DEFAULT_TARGET | CRITICAL_TARGET | FATAL_TARGET)
        }))
}

/// Install a global subscriber that prints bare messages to stdout.
///
/// **Errors**
///
/// Fails if a global default subscriber has already been set.
pub fn init_message_only() -> Result<(), SetGlobalDefaultError> {
    let subscriber = Registry::default().with(message_only_layer(std::io::stdout));
    tracing::subscriber::set_global_default(subscriber)
}
