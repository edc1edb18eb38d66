//! Concurrent relay fan-out.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::domain::{ExchangeConfig, ExchangeError};
use crate::ports::{PublishOutcome, RelayTransport};
use crate::protocol::SignedEvent;

/// Failure of a single relay.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RelayError {
    /// Relay could not be reached
    #[error("Relay unreachable: {0}")]
    Unreachable(String),
    /// Relay refused the event
    #[error("Relay rejected event: {0}")]
    Rejected(String),
    /// No answer within the per-relay timeout
    #[error("Relay timed out after {0:?}")]
    Timeout(Duration),
}

/// Sends one event to one relay. The wire protocol to the relay lives here.
#[async_trait]
pub trait RelayConnector: Send + Sync + 'static {
    /// Deliver `event` to `relay`.
    async fn send(&self, relay: &str, event: &SignedEvent) -> Result<(), RelayError>;
}

/// [`RelayTransport`] that publishes to every relay concurrently and
/// partitions the results.
pub struct RelayPool<C: RelayConnector> {
    connector: Arc<C>,
    relay_timeout: Duration,
}

impl<C: RelayConnector> RelayPool<C> {
    /// Pool with an explicit per-relay timeout.
    pub fn new(connector: C, relay_timeout: Duration) -> Self {
        Self {
            connector: Arc::new(connector),
            relay_timeout,
        }
    }

    /// Pool using `config.relay_timeout_ms`.
    pub fn from_config(connector: C, config: &ExchangeConfig) -> Self {
        Self::new(connector, Duration::from_millis(config.relay_timeout_ms))
    }

    /// The underlying connector.
    pub fn connector(&self) -> &C {
        &self.connector
    }
}

#[async_trait]
impl<C: RelayConnector> RelayTransport for RelayPool<C> {
    async fn publish(
        &self,
        event: &SignedEvent,
        relays: &[String],
    ) -> Result<PublishOutcome, ExchangeError> {
        let mut targets: Vec<String> = Vec::with_capacity(relays.len());
        for relay in relays {
            if !targets.contains(relay) {
                targets.push(relay.clone());
            }
        }

        let event = Arc::new(event.clone());
        let mut join_set = JoinSet::new();
        for (idx, relay) in targets.iter().enumerate() {
            let connector = Arc::clone(&self.connector);
            let event = Arc::clone(&event);
            let relay = relay.clone();
            let limit = self.relay_timeout;
            join_set.spawn(async move {
                let result = match tokio::time::timeout(limit, connector.send(&relay, &event)).await
                {
                    Ok(r) => r,
                    Err(_) => Err(RelayError::Timeout(limit)),
                };
                (idx, result)
            });
        }

        // Relays whose task never reports (panic, abort) count as failed
        let mut accepted = vec![false; targets.len()];
        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((idx, Ok(()))) => accepted[idx] = true,
                Ok((idx, Err(e))) => {
                    debug!(relay = %targets[idx], error = %e, "Relay publish failed");
                }
                Err(e) => warn!(error = %e, "Relay publish task aborted"),
            }
        }

        let mut outcome = PublishOutcome::default();
        for (relay, ok) in targets.into_iter().zip(accepted) {
            if ok {
                outcome.published.push(relay);
            } else {
                outcome.failed.push(relay);
            }
        }
        Ok(outcome)
    }
}
