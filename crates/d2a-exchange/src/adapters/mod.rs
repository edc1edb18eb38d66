//! # Adapters Layer (Hexagonal Architecture)
//!
//! Concrete implementations of the outbound ports.
//!
//! ## Feature Flags
//!
//! - `network`: `RelayPool` (tokio fan-out) and `TomlConfigProvider`

mod config;
mod memory_relay;
#[cfg(feature = "network")]
mod relay_pool;
mod store;
mod time;
mod trust_graph;

pub use config::StaticConfigProvider;
#[cfg(feature = "network")]
pub use config::{ConfigError, TomlConfigProvider};
pub use memory_relay::InMemoryRelayNetwork;
#[cfg(feature = "network")]
pub use relay_pool::{RelayConnector, RelayError, RelayPool};
pub use store::{FileLedgerStore, MemoryLedgerStore};
pub use time::SystemTimeSource;
pub use trust_graph::StaticTrustGraph;
