//! Telemetry configuration from environment variables.

use std::env;

/// Configuration for the logging stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// Service name attached to the startup log line
    pub service_name: String,

    /// Log level filter (trace, debug, info, warn, error, or a full directive)
    pub log_level: String,

    /// Whether to emit JSON formatted logs
    pub json_logs: bool,

    /// Whether to include file/line in log lines
    pub with_source_location: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "d2a-agent".to_string(),
            log_level: "info".to_string(),
            json_logs: false,
            with_source_location: false,
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `D2A_SERVICE_NAME`: Service name (default: d2a-agent)
    /// - `D2A_LOG_LEVEL` or `RUST_LOG`: Log level (default: info)
    /// - `D2A_JSON_LOGS`: Enable JSON logs (default: false, true in containers)
    /// - `D2A_LOG_SOURCE`: Include file and line (default: false)
    pub fn from_env() -> Self {
        let is_container =
            env::var("KUBERNETES_SERVICE_HOST").is_ok() || env::var("DOCKER_CONTAINER").is_ok();

        Self {
            service_name: env::var("D2A_SERVICE_NAME").unwrap_or_else(|_| "d2a-agent".to_string()),

            log_level: env::var("D2A_LOG_LEVEL")
                .or_else(|_| env::var("RUST_LOG"))
                .unwrap_or_else(|_| "info".to_string()),

            json_logs: env::var("D2A_JSON_LOGS")
                .map(|v| parse_flag(&v))
                .unwrap_or(is_container),

            with_source_location: env::var("D2A_LOG_SOURCE")
                .map(|v| parse_flag(&v))
                .unwrap_or(false),
        }
    }

    /// Override the service name.
    #[must_use]
    pub fn with_service_name(mut self, name: impl Into<String>) -> Self {
        self.service_name = name.into();
        self
    }
}

fn parse_flag(value: &str) -> bool {
    value.eq_ignore_ascii_case("true") || value == "1"
}
