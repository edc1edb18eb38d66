//! # Ports Layer - Hexagonal Architecture Boundaries
//!
//! - **Driving Port (Inbound):** [`AgentExchangeApi`], the API an embedding
//!   application calls to run the protocol
//! - **Driven Ports (Outbound):** relay transport, trust graph, ledger
//!   storage, time and configuration, supplied by adapters
//!
//! Only the relay transport suspends. Everything else is synchronous.

pub mod inbound;
pub mod outbound;

pub use inbound::AgentExchangeApi;
pub use outbound::{
    ConfigProvider, LedgerStore, PublishOutcome, RelayTransport, TimeSource, TrustGraph,
};
