use anyhow::Result;
use async_trait::async_trait;

use crate::types::LotteryEvent;

/// Trait for notification consumers of lottery events.
#[async_trait]
pub trait EventSink: Send + Sync {
    /// Human-readable sink name for logging.
    fn name(&self) -> &'static str;

    /// Publish one event. Best-effort: a failed publish is logged by the
    /// caller and never rolls back the mutation it describes.
    async fn publish(&self, event: &LotteryEvent) -> Result<()>;
}
