//! # D2A Exchange Test Suite
//!
//! Multi-agent tests that drive several [`d2a_exchange::ExchangeService`]
//! instances against one shared relay network.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/           # Agent-to-agent flows
//!     ├── e2e_choreography.rs  # Offer -> accept -> deliver -> settle
//!     └── resilience.rs        # Relay failures, expiry, restarts
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p d2a-tests
//!
//! # By category
//! cargo test -p d2a-tests integration::e2e_choreography
//! cargo test -p d2a-tests integration::resilience
//! ```

#![allow(dead_code)]

pub mod integration;
