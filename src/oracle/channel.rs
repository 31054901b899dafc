use anyhow::Result;
use async_trait::async_trait;
use kanal::{AsyncReceiver, AsyncSender};

use crate::traits::RandomnessOracle;
use crate::types::{Fulfillment, RandomnessCorrelation, RequestId};

/// Oracle bound to an external transport.
///
/// Requests are forwarded to `request_tx` for an external provider to pick
/// up; fulfillments arrive on the feed receiver and are forwarded into the
/// app's fulfillment channel. The forwarder is where transport-level source
/// authentication belongs when backed by a real provider.
pub struct ChannelOracle {
    request_tx: AsyncSender<(RequestId, RandomnessCorrelation)>,
    feed_rx: Option<AsyncReceiver<Fulfillment>>,
    next_request_id: RequestId,
}

impl ChannelOracle {
    pub fn new(
        request_tx: AsyncSender<(RequestId, RandomnessCorrelation)>,
        feed_rx: AsyncReceiver<Fulfillment>,
    ) -> Self {
        Self {
            request_tx,
            feed_rx: Some(feed_rx),
            next_request_id: 1,
        }
    }
}

#[async_trait]
impl RandomnessOracle for ChannelOracle {
    fn name(&self) -> &'static str {
        "channel-oracle"
    }

    async fn open(&mut self, tx: AsyncSender<Fulfillment>) -> Result<()> {
        let feed_rx = match self.feed_rx.take() {
            Some(rx) => rx,
            None => return Err(anyhow::anyhow!("channel oracle already opened")),
        };

        tokio::spawn(async move {
            while let Ok(fulfillment) = feed_rx.recv().await {
                if tx.send(fulfillment).await.is_err() {
                    break;
                }
            }
        });

        Ok(())
    }

    async fn request(&mut self, correlation: RandomnessCorrelation) -> Result<RequestId> {
        let request_id = self.next_request_id;
        self.next_request_id += 1;

        self.request_tx
            .send((request_id, correlation))
            .await
            .map_err(|e| anyhow::anyhow!("Failed to forward randomness request: {}", e))?;
        Ok(request_id)
    }

    async fn close(&mut self) -> Result<()> {
        Ok(())
    }
}
