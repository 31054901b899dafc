use anyhow::Result;
use async_trait::async_trait;
use kanal::AsyncSender;

use crate::traits::RandomnessOracle;
use crate::types::{Fulfillment, RandomnessCorrelation, RequestId};

/// Noop oracle for demonstration purposes.
///
/// Accepts requests but never fulfills them, which leaves the round
/// Closing indefinitely: the documented stall behavior of an unfulfilled
/// request.
pub struct NoopOracle {
    next_request_id: RequestId,
}

impl NoopOracle {
    pub fn new() -> Self {
        Self { next_request_id: 1 }
    }
}

impl Default for NoopOracle {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RandomnessOracle for NoopOracle {
    fn name(&self) -> &'static str {
        "noop-oracle"
    }

    async fn open(&mut self, _tx: AsyncSender<Fulfillment>) -> Result<()> {
        tracing::info!("NoopOracle: open() called - no fulfillments will be delivered");
        Ok(())
    }

    async fn request(&mut self, _correlation: RandomnessCorrelation) -> Result<RequestId> {
        let request_id = self.next_request_id;
        self.next_request_id += 1;
        tracing::warn!(request_id, "NoopOracle: request accepted, will never fulfill");
        Ok(request_id)
    }

    async fn close(&mut self) -> Result<()> {
        tracing::info!("NoopOracle: close() called");
        Ok(())
    }
}
