//! # D2A Telemetry
//!
//! Structured logging for agents embedding the D2A exchange core.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use d2a_telemetry::{init_tracing, TelemetryConfig};
//!
//! let config = TelemetryConfig::from_env();
//! init_tracing(&config).expect("Failed to init logging");
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `D2A_SERVICE_NAME` | `d2a-agent` | Service name in the startup log line |
//! | `D2A_LOG_LEVEL` | `info` | Log level filter (falls back to `RUST_LOG`) |
//! | `D2A_JSON_LOGS` | `false` | JSON output for log shippers |
//! | `D2A_LOG_SOURCE` | `false` | Include file and line numbers |

#![warn(missing_docs)]
#![warn(clippy::all)]

mod config;

pub use config::TelemetryConfig;

use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// The log level directive could not be parsed
    #[error("Invalid log filter: {0}")]
    Filter(String),

    /// A global subscriber is already installed
    #[error("Failed to install subscriber: {0}")]
    Install(String),
}

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` wins over `config.log_level` when both are set, matching the
/// usual `EnvFilter` convention.
pub fn init_tracing(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let env_filter = build_filter(&config.log_level)?;

    if config.json_logs {
        let json_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_file(config.with_source_location)
            .with_line_number(config.with_source_location);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(json_layer)
            .try_init()
            .map_err(|e| TelemetryError::Install(e.to_string()))?;
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_file(config.with_source_location)
            .with_line_number(config.with_source_location)
            .with_ansi(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()
            .map_err(|e| TelemetryError::Install(e.to_string()))?;
    }

    tracing::info!(
        service = %config.service_name,
        json = config.json_logs,
        "Logging initialized"
    );

    Ok(())
}

fn build_filter(level: &str) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|e| TelemetryError::Filter(e.to_string()))
}
