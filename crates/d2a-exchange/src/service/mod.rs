//! # Exchange Service
//!
//! High-level service implementing the [`AgentExchangeApi`] port for one
//! local agent.
//!
//! The service owns the handshake registry and cached copies of both
//! ledgers. Ledger writes go through the [`LedgerStore`] port as
//! load -> mutate -> save, so the store stays the source of truth and the
//! domain layer never performs I/O.
//!
//! [`AgentExchangeApi`]: crate::ports::AgentExchangeApi
//! [`LedgerStore`]: crate::ports::LedgerStore

// Semantic submodules
mod api;
mod core;
mod events;
mod maintenance;

// Re-export public API
pub use self::core::ExchangeService;
