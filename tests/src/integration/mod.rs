//! Agent-to-agent integration flows.

pub mod e2e_choreography;
pub mod resilience;

#[cfg(test)]
pub(crate) mod harness;
