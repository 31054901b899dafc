use anyhow::Result;
use async_trait::async_trait;
use kanal::AsyncSender;

use crate::types::EntryRequest;

/// Trait for entry front-ends (gateway listeners, test doubles).
///
/// Implementations are responsible for producing `EntryRequest`s into the
/// app's admission pipeline.
#[async_trait]
pub trait EntrySource: Send + Sync {
    /// Human-readable source name for logging.
    fn name(&self) -> &'static str;

    /// Open/start the source with a channel to send entry requests.
    ///
    /// Typical implementation:
    /// - spawn an async task,
    /// - read from the external surface,
    /// - push `EntryRequest`s into the provided channel.
    async fn open(&mut self, tx: AsyncSender<EntryRequest>) -> Result<()>;

    /// Close/stop the source and release resources.
    async fn close(&mut self) -> Result<()>;
}
