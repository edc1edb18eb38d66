//! Configuration providers.

use crate::domain::ExchangeConfig;
use crate::ports::ConfigProvider;

/// Static configuration provider with hardcoded values.
///
/// Useful for testing and embedding. For deployments, use `TomlConfigProvider`.
#[derive(Debug, Clone, Default)]
pub struct StaticConfigProvider {
    config: ExchangeConfig,
}

impl StaticConfigProvider {
    /// Create with the default config (no relays).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the relay set.
    #[must_use]
    pub fn with_relays(mut self, relays: Vec<String>) -> Self {
        self.config.relays = relays;
        self
    }

    /// Replace the resonance threshold.
    #[must_use]
    pub fn with_resonance_threshold(mut self, threshold: f64) -> Self {
        self.config.resonance_threshold = threshold;
        self
    }

    /// Replace the whole config.
    #[must_use]
    pub fn with_config(mut self, config: ExchangeConfig) -> Self {
        self.config = config;
        self
    }
}

impl ConfigProvider for StaticConfigProvider {
    fn exchange_config(&self) -> ExchangeConfig {
        self.config.clone()
    }
}

// ============================================================================
// TomlConfigProvider - File-based config (requires "network" feature)
// ============================================================================

#[cfg(feature = "network")]
mod toml_config {
    use super::*;
    use serde::Deserialize;
    use std::fs;
    use std::path::Path;
    use thiserror::Error;
    use tracing::warn;

    /// Configuration file structure.
    #[derive(Debug, Deserialize, Default)]
    struct ConfigFile {
        #[serde(default)]
        relays: RelaysSection,
        #[serde(default)]
        exchange: ExchangeSection,
    }

    #[derive(Debug, Deserialize, Default)]
    struct RelaysSection {
        #[serde(default)]
        urls: Vec<String>,
    }

    #[derive(Debug, Deserialize, Default)]
    struct ExchangeSection {
        resonance_threshold: Option<f64>,
        peer_stale_after_ms: Option<u64>,
        relay_timeout_ms: Option<u64>,
    }

    /// TOML-based configuration provider.
    ///
    /// # Config File Format
    ///
    /// ```toml
    /// [relays]
    /// urls = ["wss://relay.example", "wss://relay2.example"]
    ///
    /// [exchange]
    /// resonance_threshold = 0.3
    /// peer_stale_after_ms = 3600000
    /// relay_timeout_ms = 5000
    /// ```
    ///
    /// The handshake timeout is a protocol constant and cannot be set here.
    #[derive(Debug, Clone)]
    pub struct TomlConfigProvider {
        config: ExchangeConfig,
    }

    impl TomlConfigProvider {
        /// Load configuration from a TOML file.
        ///
        /// # Errors
        ///
        /// Returns error if file cannot be read or parsed.
        pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
            let content = fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
                path: path.as_ref().display().to_string(),
                error: e.to_string(),
            })?;

            Self::parse(&content)
        }

        /// Parse configuration from a TOML string.
        pub fn parse(content: &str) -> Result<Self, ConfigError> {
            let file: ConfigFile =
                toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;

            let defaults = ExchangeConfig::default();
            let mut relays = Vec::new();
            for url in file.relays.urls {
                let url = url.trim().to_string();
                if url.is_empty() || relays.contains(&url) {
                    warn!(url = %url, "Skipping empty or duplicate relay URL");
                    continue;
                }
                relays.push(url);
            }

            let threshold = file
                .exchange
                .resonance_threshold
                .unwrap_or(defaults.resonance_threshold);
            if !(0.0..=1.0).contains(&threshold) {
                return Err(ConfigError::Invalid(format!(
                    "resonance_threshold {threshold} is outside [0, 1]"
                )));
            }

            let config = ExchangeConfig {
                relays,
                resonance_threshold: threshold,
                peer_stale_after_ms: file
                    .exchange
                    .peer_stale_after_ms
                    .unwrap_or(defaults.peer_stale_after_ms),
                relay_timeout_ms: file
                    .exchange
                    .relay_timeout_ms
                    .unwrap_or(defaults.relay_timeout_ms),
                ..defaults
            };

            Ok(Self { config })
        }
    }

    impl ConfigProvider for TomlConfigProvider {
        fn exchange_config(&self) -> ExchangeConfig {
            self.config.clone()
        }
    }

    /// Errors that can occur during config loading.
    #[derive(Debug, Clone, Error, PartialEq, Eq)]
    pub enum ConfigError {
        /// File I/O error.
        #[error("Failed to read {path}: {error}")]
        Io {
            /// File path
            path: String,
            /// Underlying error
            error: String,
        },
        /// TOML parsing error.
        #[error("Failed to parse config: {0}")]
        Parse(String),
        /// Value out of range.
        #[error("Invalid config: {0}")]
        Invalid(String),
    }
}

#[cfg(feature = "network")]
pub use toml_config::{ConfigError, TomlConfigProvider};

// ============================================================================
// Tests
// ============================================================================
