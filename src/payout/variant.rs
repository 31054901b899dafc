use anyhow::Result;
use async_trait::async_trait;

use super::bank::MemoryBank;
use super::mock::MockPayout;
use super::noop::NoopPayout;
use crate::config::PayoutType;
use crate::traits::PayoutSink;
use crate::types::Address;

/// Enum representing all possible payout rail implementations.
pub enum PayoutVariant {
    Bank(MemoryBank),
    Mock(MockPayout),
    Noop(NoopPayout),
}

impl PayoutVariant {
    /// Create a new payout rail instance based on the specified type.
    pub fn new(payout_type: PayoutType) -> Self {
        match payout_type {
            PayoutType::Bank => PayoutVariant::Bank(MemoryBank::new()),
            PayoutType::Mock => PayoutVariant::Mock(MockPayout::new()),
            PayoutType::Noop => PayoutVariant::Noop(NoopPayout::new()),
        }
    }
}

#[async_trait]
impl PayoutSink for PayoutVariant {
    fn name(&self) -> &'static str {
        match self {
            PayoutVariant::Bank(inner) => inner.name(),
            PayoutVariant::Mock(inner) => inner.name(),
            PayoutVariant::Noop(inner) => inner.name(),
        }
    }

    async fn transfer(&mut self, winner: Address, amount: u64) -> Result<()> {
        match self {
            PayoutVariant::Bank(inner) => inner.transfer(winner, amount).await,
            PayoutVariant::Mock(inner) => inner.transfer(winner, amount).await,
            PayoutVariant::Noop(inner) => inner.transfer(winner, amount).await,
        }
    }
}
