use anyhow::Result;
use async_trait::async_trait;
use kanal::AsyncSender;

use crate::types::{Fulfillment, RandomnessCorrelation, RequestId};

/// Trait for randomness providers (VRF services, beacons, test doubles).
///
/// Implementations deliver at most one `Fulfillment` per accepted request
/// into the channel handed to `open`, at an unspecified future point. The
/// channel is the authenticated binding: only the configured provider holds
/// the sender, so a fulfillment arriving on it is known to originate from
/// that provider. Correlation-id validation against the single outstanding
/// request happens in the coordinator, not here.
#[async_trait]
pub trait RandomnessOracle: Send + Sync {
    /// Human-readable provider name for logging.
    fn name(&self) -> &'static str;

    /// Open the binding with a channel to deliver fulfillments on.
    async fn open(&mut self, tx: AsyncSender<Fulfillment>) -> Result<()>;

    /// Issue one randomness request; returns its correlation identifier.
    async fn request(&mut self, correlation: RandomnessCorrelation) -> Result<RequestId>;

    /// Close the binding and release resources.
    async fn close(&mut self) -> Result<()>;
}
