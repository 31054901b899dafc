use anyhow::Result;
use async_trait::async_trait;
use kanal::{AsyncReceiver, AsyncSender};

use super::channel::ChannelOracle;
use super::mock::MockOracle;
use super::noop::NoopOracle;
use crate::config::OracleType;
use crate::traits::RandomnessOracle;
use crate::types::{Fulfillment, RandomnessCorrelation, RequestId};

/// Enum representing all possible randomness oracle implementations.
pub enum OracleVariant {
    Mock(MockOracle),
    Channel(ChannelOracle),
    Noop(NoopOracle),
}

impl OracleVariant {
    /// Create a new oracle instance based on the specified type.
    pub fn new(oracle_type: OracleType) -> Self {
        match oracle_type {
            OracleType::Mock => OracleVariant::Mock(MockOracle::default()),
            OracleType::Noop => OracleVariant::Noop(NoopOracle::new()),
        }
    }

    /// Create a channel oracle with custom transport endpoints.
    pub fn new_channel(
        request_tx: AsyncSender<(RequestId, RandomnessCorrelation)>,
        feed_rx: AsyncReceiver<Fulfillment>,
    ) -> Self {
        OracleVariant::Channel(ChannelOracle::new(request_tx, feed_rx))
    }
}

#[async_trait]
impl RandomnessOracle for OracleVariant {
    fn name(&self) -> &'static str {
        match self {
            OracleVariant::Mock(inner) => inner.name(),
            OracleVariant::Channel(inner) => inner.name(),
            OracleVariant::Noop(inner) => inner.name(),
        }
    }

    async fn open(&mut self, tx: AsyncSender<Fulfillment>) -> Result<()> {
        match self {
            OracleVariant::Mock(inner) => inner.open(tx).await,
            OracleVariant::Channel(inner) => inner.open(tx).await,
            OracleVariant::Noop(inner) => inner.open(tx).await,
        }
    }

    async fn request(&mut self, correlation: RandomnessCorrelation) -> Result<RequestId> {
        match self {
            OracleVariant::Mock(inner) => inner.request(correlation).await,
            OracleVariant::Channel(inner) => inner.request(correlation).await,
            OracleVariant::Noop(inner) => inner.request(correlation).await,
        }
    }

    async fn close(&mut self) -> Result<()> {
        match self {
            OracleVariant::Mock(inner) => inner.close().await,
            OracleVariant::Channel(inner) => inner.close().await,
            OracleVariant::Noop(inner) => inner.close().await,
        }
    }
}
