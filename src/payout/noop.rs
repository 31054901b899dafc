use anyhow::Result;
use async_trait::async_trait;

use crate::traits::PayoutSink;
use crate::types::Address;

/// Noop payout sink that acknowledges transfers without moving anything.
pub struct NoopPayout;

impl NoopPayout {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NoopPayout {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PayoutSink for NoopPayout {
    fn name(&self) -> &'static str {
        "noop-payout"
    }

    async fn transfer(&mut self, winner: Address, amount: u64) -> Result<()> {
        tracing::info!(
            winner = %hex::encode(winner),
            amount,
            "NoopPayout: transfer acknowledged and discarded"
        );
        Ok(())
    }
}
