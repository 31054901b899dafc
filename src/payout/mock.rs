use std::sync::{Arc, Mutex};

use anyhow::{bail, Result};
use async_trait::async_trait;

use crate::ledger::RoundLedger;
use crate::traits::PayoutSink;
use crate::types::{Address, RoundState};

/// Mock payout sink for testing.
///
/// Records transfers, can be told to fail, and can hold a handle to the
/// round ledger to observe round state from inside the transfer: the
/// re-entrancy probe for the commit-state-before-external-effect contract.
#[derive(Clone, Default)]
pub struct MockPayout {
    transfers: Arc<Mutex<Vec<(Address, u64)>>>,
    fail_next: Arc<Mutex<bool>>,
    ledger: Option<Arc<tokio::sync::Mutex<RoundLedger>>>,
    /// (state, pool, participant_count) seen mid-transfer.
    observed: Arc<Mutex<Vec<(RoundState, u64, u64)>>>,
}

impl MockPayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a ledger handle; every transfer will record the round state
    /// it observes through it.
    pub fn with_ledger(mut self, ledger: Arc<tokio::sync::Mutex<RoundLedger>>) -> Self {
        self.ledger = Some(ledger);
        self
    }

    /// Make the next transfer fail.
    pub fn set_fail(&self, fail: bool) {
        *self.fail_next.lock().unwrap() = fail;
    }

    /// Get all recorded transfers (for testing/verification).
    pub fn get_transfers(&self) -> Vec<(Address, u64)> {
        self.transfers.lock().unwrap().clone()
    }

    /// Get the round states observed from inside transfers.
    pub fn get_observed(&self) -> Vec<(RoundState, u64, u64)> {
        self.observed.lock().unwrap().clone()
    }
}

#[async_trait]
impl PayoutSink for MockPayout {
    fn name(&self) -> &'static str {
        "mock-payout"
    }

    async fn transfer(&mut self, winner: Address, amount: u64) -> Result<()> {
        if let Some(ledger) = &self.ledger {
            let ledger = ledger.lock().await;
            self.observed.lock().unwrap().push((
                ledger.state(),
                ledger.pool(),
                ledger.participant_count(),
            ));
        }

        if *self.fail_next.lock().unwrap() {
            bail!("simulated payout failure");
        }

        self.transfers.lock().unwrap().push((winner, amount));
        tracing::debug!(
            winner = %hex::encode(winner),
            amount,
            "MockPayout: recorded transfer"
        );
        Ok(())
    }
}
