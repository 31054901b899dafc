use anyhow::{anyhow, Result};
use async_trait::async_trait;
use kanal::AsyncSender;

use crate::traits::RandomnessOracle;
use crate::types::{Fulfillment, RandomnessCorrelation, RequestId};

/// Mock oracle for testing.
///
/// Fulfills each accepted request with the next scripted random value,
/// optionally after a delay. Request identifiers count up from 1.
pub struct MockOracle {
    pub random_values: Vec<u64>,
    pub delay_ms: u64,
    next_request_id: RequestId,
    next_value: usize,
    tx: Option<AsyncSender<Fulfillment>>,
}

impl MockOracle {
    pub fn new(random_values: Vec<u64>, delay_ms: u64) -> Self {
        Self {
            random_values,
            delay_ms,
            next_request_id: 1,
            next_value: 0,
            tx: None,
        }
    }
}

impl Default for MockOracle {
    fn default() -> Self {
        Self::new(Vec::new(), 0)
    }
}

#[async_trait]
impl RandomnessOracle for MockOracle {
    fn name(&self) -> &'static str {
        "mock-oracle"
    }

    async fn open(&mut self, tx: AsyncSender<Fulfillment>) -> Result<()> {
        self.tx = Some(tx);
        Ok(())
    }

    async fn request(&mut self, correlation: RandomnessCorrelation) -> Result<RequestId> {
        let tx = self
            .tx
            .clone()
            .ok_or_else(|| anyhow!("mock oracle not opened"))?;

        let request_id = self.next_request_id;
        self.next_request_id += 1;

        // Scripted values are consumed in order; exhausted scripts fall
        // back to zero.
        let random_value = self.random_values.get(self.next_value).copied().unwrap_or(0);
        self.next_value += 1;

        let delay = self.delay_ms;
        tracing::debug!(
            request_id,
            random_value,
            pool = correlation.pool,
            participants = correlation.participant_count,
            "MockOracle: accepted request"
        );

        tokio::spawn(async move {
            if delay > 0 {
                tokio::time::sleep(tokio::time::Duration::from_millis(delay)).await;
            }
            let _ = tx
                .send(Fulfillment {
                    request_id,
                    random_value,
                })
                .await;
        });

        Ok(request_id)
    }

    async fn close(&mut self) -> Result<()> {
        self.tx = None;
        Ok(())
    }
}
