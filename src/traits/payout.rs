use anyhow::Result;
use async_trait::async_trait;

use crate::types::Address;

/// Trait for the external value-transfer rail used by settlement.
///
/// `transfer` is called strictly after the round reset is committed and the
/// ledger lock is released. A failure surfaces as `PayoutFailed` upstream
/// and is never retried at this layer.
#[async_trait]
pub trait PayoutSink: Send + Sync {
    /// Human-readable rail name for logging.
    fn name(&self) -> &'static str;

    /// Transfer `amount` to `winner`.
    async fn transfer(&mut self, winner: Address, amount: u64) -> Result<()>;
}
