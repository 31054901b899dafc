use anyhow::Result;
use async_trait::async_trait;
use kanal::AsyncSender;

use crate::traits::EntrySource;
use crate::types::EntryRequest;

/// Noop entry source for demonstration purposes.
pub struct NoopEntries;

#[async_trait]
impl EntrySource for NoopEntries {
    fn name(&self) -> &'static str {
        "noop-entries"
    }

    async fn open(&mut self, _tx: AsyncSender<EntryRequest>) -> Result<()> {
        tracing::info!("NoopEntries: open() called - no entries to send");
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        tracing::info!("NoopEntries: close() called");
        Ok(())
    }
}
