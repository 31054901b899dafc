use anyhow::Result;
use async_trait::async_trait;
use kanal::AsyncSender;

use crate::traits::EntrySource;
use crate::types::EntryRequest;

/// Mock entry source for testing.
pub struct MockEntries {
    pub entries: Vec<EntryRequest>,
    pub delay_ms: u64,
}

impl MockEntries {
    pub fn new(entries: Vec<EntryRequest>, delay_ms: u64) -> Self {
        Self { entries, delay_ms }
    }
}

impl Default for MockEntries {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            delay_ms: 0,
        }
    }
}

#[async_trait]
impl EntrySource for MockEntries {
    fn name(&self) -> &'static str {
        "mock-entries"
    }

    async fn open(&mut self, tx: AsyncSender<EntryRequest>) -> Result<()> {
        let entries = self.entries.clone();
        let delay = self.delay_ms;

        tokio::spawn(async move {
            for entry in entries {
                if delay > 0 {
                    tokio::time::sleep(tokio::time::Duration::from_millis(delay)).await;
                }
                if tx.send(entry).await.is_err() {
                    break;
                }
            }
        });

        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        Ok(())
    }
}
