use anyhow::Result;
use async_trait::async_trait;

use crate::traits::EventSink;
use crate::types::LotteryEvent;

/// Blackhole sink that discards all events (no-op).
pub struct BlackholeSink;

impl BlackholeSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BlackholeSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventSink for BlackholeSink {
    fn name(&self) -> &'static str {
        "blackhole"
    }

    async fn publish(&self, _event: &LotteryEvent) -> Result<()> {
        // Discard all events
        Ok(())
    }
}
