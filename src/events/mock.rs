use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;

use crate::traits::EventSink;
use crate::types::LotteryEvent;

/// Mock event sink for testing.
/// Stores published events in memory for verification.
#[derive(Clone)]
pub struct MockSink {
    pub published: Arc<Mutex<Vec<LotteryEvent>>>,
}

impl MockSink {
    pub fn new() -> Self {
        Self {
            published: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Get all published events (for testing/verification).
    pub fn get_published(&self) -> Vec<LotteryEvent> {
        self.published.lock().unwrap().clone()
    }

    /// Clear published events.
    pub fn clear(&self) {
        self.published.lock().unwrap().clear();
    }
}

impl Default for MockSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventSink for MockSink {
    fn name(&self) -> &'static str {
        "mock-sink"
    }

    async fn publish(&self, event: &LotteryEvent) -> Result<()> {
        self.published.lock().unwrap().push(event.clone());
        tracing::debug!("MockSink: recorded event {:?}", event);
        Ok(())
    }
}
