use anyhow::Result;
use async_trait::async_trait;
use kanal::AsyncSender;

use crate::traits::EventSink;
use crate::types::LotteryEvent;

/// Channel sink that publishes lottery events to a kanal channel.
pub struct ChannelSink {
    sender: AsyncSender<LotteryEvent>,
}

impl ChannelSink {
    pub fn new(sender: AsyncSender<LotteryEvent>) -> Self {
        Self { sender }
    }
}

#[async_trait]
impl EventSink for ChannelSink {
    fn name(&self) -> &'static str {
        "channel"
    }

    async fn publish(&self, event: &LotteryEvent) -> Result<()> {
        self.sender
            .send(event.clone())
            .await
            .map_err(|e| anyhow::anyhow!("Failed to send to channel: {}", e))?;
        Ok(())
    }
}
