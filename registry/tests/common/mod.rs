use std::io::IsTerminal;

use serde_json::{Value, json};
use tracing_subscriber::EnvFilter;

pub fn init_test_logger() {
    let in_ci = std::env::var("CI")
        .map(|val| val == "true")
        .unwrap_or(false);

    if std::io::stderr().is_terminal() || in_ci {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    } else {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .json()
            .try_init();
    }

    let _ = color_eyre::install();
}

/// An opaque request record, like a CALL payload
#[allow(dead_code)]
pub fn mock_request(value: &str) -> Value {
    json!({ "action": "DataTransfer", "data": value })
}
