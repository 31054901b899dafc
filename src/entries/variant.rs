use anyhow::Result;
use async_trait::async_trait;
use kanal::{AsyncReceiver, AsyncSender};

use super::channel::ChannelEntries;
use super::mock::MockEntries;
use super::noop::NoopEntries;
use crate::config::EntriesType;
use crate::traits::EntrySource;
use crate::types::EntryRequest;

/// Enum representing all possible entry source implementations.
pub enum EntrySourceVariant {
    Mock(MockEntries),
    Channel(ChannelEntries),
    Noop(NoopEntries),
}

impl EntrySourceVariant {
    /// Create a new entry source instance based on the specified type.
    pub fn new(entries_type: EntriesType) -> Self {
        match entries_type {
            EntriesType::Mock => EntrySourceVariant::Mock(MockEntries::default()),
            EntriesType::Noop => EntrySourceVariant::Noop(NoopEntries),
        }
    }

    /// Create a channel entry source with a custom receiver.
    pub fn new_channel(feed_rx: AsyncReceiver<EntryRequest>) -> Self {
        EntrySourceVariant::Channel(ChannelEntries::new(feed_rx))
    }
}

#[async_trait]
impl EntrySource for EntrySourceVariant {
    fn name(&self) -> &'static str {
        match self {
            EntrySourceVariant::Mock(inner) => inner.name(),
            EntrySourceVariant::Channel(inner) => inner.name(),
            EntrySourceVariant::Noop(inner) => inner.name(),
        }
    }

    async fn open(&mut self, tx: AsyncSender<EntryRequest>) -> Result<()> {
        match self {
            EntrySourceVariant::Mock(inner) => inner.open(tx).await,
            EntrySourceVariant::Channel(inner) => inner.open(tx).await,
            EntrySourceVariant::Noop(inner) => inner.open(tx).await,
        }
    }

    async fn close(&mut self) -> Result<()> {
        match self {
            EntrySourceVariant::Mock(inner) => inner.close().await,
            EntrySourceVariant::Channel(inner) => inner.close().await,
            EntrySourceVariant::Noop(inner) => inner.close().await,
        }
    }
}
