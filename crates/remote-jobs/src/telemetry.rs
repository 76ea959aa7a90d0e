//! Tracing setup for the library and the service binary.

use crate::config::TelemetryConfig;
use tracing_subscriber::filter::{Directive, ParseError};
use tracing_subscriber::EnvFilter;

/// Transport crates that log every connection at `debug`; kept at `warn` unless named explicitly.
const QUIET_TARGETS: [&str; 3] = ["hyper", "reqwest", "h2"];

#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("invalid log level/filter '{value}': unable to build EnvFilter")]
    EnvFilter { value: String, source: ParseError },
    #[error("telemetry error: {0}")]
    Subscriber(Box<dyn std::error::Error + Send + Sync>),
}

/// Filter built from the configured level, with the transport crates held at `warn`.
pub fn configured_filter(log_level: &str) -> Result<EnvFilter, TelemetryError> {
    let invalid = |source: ParseError| TelemetryError::EnvFilter {
        value: log_level.to_string(),
        source,
    };

    let mut filter = EnvFilter::try_new(log_level).map_err(invalid)?;
    for target in QUIET_TARGETS {
        if log_level.contains(target) {
            continue;
        }
        let directive: Directive = format!("{target}=warn").parse().map_err(invalid)?;
        filter = filter.add_directive(directive);
    }
    Ok(filter)
}

/// Install the global fmt subscriber. `RUST_LOG` takes precedence over the configured level.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => configured_filter(&config.log_level)?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(TelemetryError::Subscriber)
}
