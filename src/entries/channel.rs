use anyhow::Result;
use async_trait::async_trait;
use kanal::{AsyncReceiver, AsyncSender};

use crate::traits::EntrySource;
use crate::types::EntryRequest;

/// Entry source fed by an external channel (e.g. a gateway handler that
/// holds the sender half).
pub struct ChannelEntries {
    feed_rx: Option<AsyncReceiver<EntryRequest>>,
}

impl ChannelEntries {
    pub fn new(feed_rx: AsyncReceiver<EntryRequest>) -> Self {
        Self {
            feed_rx: Some(feed_rx),
        }
    }
}

#[async_trait]
impl EntrySource for ChannelEntries {
    fn name(&self) -> &'static str {
        "channel-entries"
    }

    async fn open(&mut self, tx: AsyncSender<EntryRequest>) -> Result<()> {
        let feed_rx = match self.feed_rx.take() {
            Some(rx) => rx,
            None => return Err(anyhow::anyhow!("channel entries already opened")),
        };

        tokio::spawn(async move {
            while let Ok(entry) = feed_rx.recv().await {
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
