use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::{bail, Result};
use async_trait::async_trait;

use crate::traits::PayoutSink;
use crate::types::Address;

/// In-memory balance book. Transfer rail for tests and demos; clones share
/// the same balances.
#[derive(Clone, Default)]
pub struct MemoryBank {
    balances: Arc<Mutex<HashMap<Address, u64>>>,
}

impl MemoryBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current balance credited to `address`.
    pub fn balance_of(&self, address: &Address) -> u64 {
        self.balances
            .lock()
            .unwrap()
            .get(address)
            .copied()
            .unwrap_or(0)
    }

    /// Sum of all credited balances (for conservation checks).
    pub fn total(&self) -> u64 {
        self.balances.lock().unwrap().values().sum()
    }
}

#[async_trait]
impl PayoutSink for MemoryBank {
    fn name(&self) -> &'static str {
        "memory-bank"
    }

    async fn transfer(&mut self, winner: Address, amount: u64) -> Result<()> {
        let mut balances = self.balances.lock().unwrap();
        let balance = balances.entry(winner).or_insert(0);
        let Some(updated) = balance.checked_add(amount) else {
            bail!("balance overflow for {}", hex::encode(winner));
        };
        *balance = updated;
        tracing::debug!(
            winner = %hex::encode(winner),
            amount,
            balance = updated,
            "MemoryBank: credited winner"
        );
        Ok(())
    }
}
