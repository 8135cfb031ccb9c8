use serde_json::json;

use logstash_json::init::init_message_only;
use logstash_json::{Call, StructuredLogger, TracingLogger};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_message_only()?;

    let logger = StructuredLogger::with_backend(
        "BILLING",
        logstash_json::host::resolve_hostname(),
        TracingLogger,
    );

    logger.info("invoice issued", json!({ "invoice": "INV-7" }).as_object().cloned());

    if let Err(e) = logger.log_args(Call::Error, &[json!(500)]) {
        eprintln!("log call rejected: {e}");
    }

    logger.critical("payment gateway unreachable", None);

    Ok(())
}
