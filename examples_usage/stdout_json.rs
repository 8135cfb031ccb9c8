use serde_json::json;

use logstash_json::config::{apply_env_overrides, parse_config};
use logstash_json::StructuredLogger;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // LOGSTASH_JSON_PREFIX / LOGSTASH_JSON_LEVEL override the values below.
    let mut cfg = parse_config(
        r#"{
            "telemetry/logging": {
                "prefix": "AUTH",
                "level": "INFO",
                "stdout": true,
                "exit_on_fatal": false
            }
        }"#,
    )?;
    apply_env_overrides(&mut cfg);

    let logger = StructuredLogger::new(cfg, Vec::new())?;

    logger.debug("filtered out by level", None);
    logger.info(
        "user logged in",
        json!({ "user_id": 42 }).as_object().cloned(),
    );
    logger.warning("password expires soon", None);
    logger.fatal("not actually exiting", None);

    Ok(())
}
